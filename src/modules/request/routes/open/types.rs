pub mod request {
    use crate::modules::request::Scope;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Query {
        #[validate(range(min = 1, max = 100))]
        pub limit: Option<u32>,
    }

    pub struct Payload {
        pub scope: Scope,
        pub query: Query,
    }
}

pub mod response {
    use crate::modules::request::repository::Request;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OpenRequests(Vec<Request>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OpenRequests(requests) => {
                    (StatusCode::OK, Json(json!(requests))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchRequests,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchRequests => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch requests" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
