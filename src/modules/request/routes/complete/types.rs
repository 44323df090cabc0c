pub mod request {
    use crate::modules::request::Scope;

    pub struct Payload {
        pub id: String,
        pub scope: Scope,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        RequestCompleted,
        RequestAlreadyCompleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RequestCompleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Request completed" })),
                )
                    .into_response(),
                Self::RequestAlreadyCompleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Request was already completed" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        RequestNotFound,
        FailedToCompleteRequest,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RequestNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Request not found" })),
                )
                    .into_response(),
                Self::FailedToCompleteRequest => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to complete request" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
