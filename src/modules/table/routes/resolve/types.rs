pub mod request {
    pub struct Payload {
        pub token: String,
    }
}

pub mod response {
    use crate::modules::table::service::TableIdentity;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        TableResolved {
            identity: TableIdentity,
            restaurant_name: String,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableResolved {
                    identity,
                    restaurant_name,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "table_id": identity.table_id,
                        "restaurant_id": identity.restaurant_id,
                        "table_number": identity.table_number,
                        "restaurant_name": restaurant_name,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        TableUnavailable,
        FailedToResolveTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableUnavailable => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invalid or closed table" })),
                )
                    .into_response(),
                Self::FailedToResolveTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to resolve table" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
