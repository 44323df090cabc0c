pub mod request {
    use crate::modules::auth::middleware::StaffAuth;

    pub struct Payload {
        pub id: String,
        pub auth: StaffAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        TableDeactivated,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableDeactivated => (
                    StatusCode::OK,
                    Json(json!({ "message": "Table deactivated successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        TableNotFound,
        FailedToDeactivateTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Table not found" })),
                )
                    .into_response(),
                Self::FailedToDeactivateTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to deactivate table" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
