use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::StaffAuth, types::Context};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(auth: StaffAuth, State(ctx): State<Arc<Context>>) -> impl IntoResponse {
    service(ctx, request::Payload { auth }).await
}
