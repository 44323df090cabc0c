pub mod request {
    use crate::modules::auth::middleware::StaffAuth;

    pub struct Payload {
        pub id: String,
        pub auth: StaffAuth,
    }
}

pub mod response {
    use crate::modules::table::service::TableDetails;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Table(TableDetails),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Table(details) => (StatusCode::OK, Json(json!(details))).into_response(),
            }
        }
    }

    pub enum Error {
        TableNotFound,
        FailedToFetchTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Table not found" })),
                )
                    .into_response(),
                Self::FailedToFetchTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch table" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
