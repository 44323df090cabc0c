pub mod request {
    use crate::modules::auth::middleware::StaffAuth;

    pub struct Payload {
        pub auth: StaffAuth,
    }
}

pub mod response {
    use crate::modules::table::service::TableDetails;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        TableProvisioned(TableDetails),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableProvisioned(details) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Table created!",
                        "id": details.table.id,
                        "table_number": details.table.table_number,
                        "token": details.table.token,
                        "qr_url": details.qr_url,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        FailedToProvisionTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::FailedToProvisionTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Table creation failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
