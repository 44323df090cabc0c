pub mod request {
    use crate::{modules::auth::middleware::StaffAuth, utils::pagination::Pagination};

    pub struct Payload {
        pub auth: StaffAuth,
        pub pagination: Pagination,
    }
}

pub mod response {
    use crate::{modules::table::service::TableDetails, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PaginatedTables(Paginated<TableDetails>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaginatedTables(tables) => {
                    (StatusCode::OK, Json(json!(tables))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchTables,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchTables => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch tables" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
