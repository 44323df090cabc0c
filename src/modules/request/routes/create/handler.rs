use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path(token): Path<String>,
    body: Result<Json<request::Body>, JsonRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(Json(body)) => Some(body),
        Err(err) => {
            tracing::debug!("Rejected request body: {}", err);
            None
        }
    };

    service(ctx, request::Payload { token, body }).await
}
