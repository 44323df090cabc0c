pub mod request {
    use serde::Deserialize;

    /// Only the call type is accepted from guests; status and timestamps are
    /// assigned by the server.
    #[derive(Deserialize)]
    pub struct Body {
        #[serde(rename = "type", default)]
        pub request_type: Option<serde_json::Value>,
    }

    impl Body {
        pub fn request_type(&self) -> Option<&str> {
            self.request_type.as_ref().and_then(|value| value.as_str())
        }
    }

    pub struct Payload {
        pub token: String,
        /// `None` when the body was not a JSON object.
        pub body: Option<Body>,
    }
}

pub mod response {
    use crate::modules::request::repository::Request;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        RequestCreated(Request),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RequestCreated(request) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Request sent!",
                        "id": request.id
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidRequestType,
        TableUnavailable,
        RequestCreationFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidRequestType => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid request type" })),
                )
                    .into_response(),
                Self::TableUnavailable => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invalid or closed table" })),
                )
                    .into_response(),
                Self::RequestCreationFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Request creation failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
