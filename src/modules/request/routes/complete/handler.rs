use super::service::service;
use super::types::request;
use crate::{
    modules::{
        auth::middleware::{AdminAuth, StaffAuth},
        request::Scope,
    },
    types::Context,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn panel_handler(
    auth: StaffAuth,
    State(ctx): State<Arc<Context>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            id,
            scope: Scope::Restaurant(auth.restaurant.id),
        },
    )
    .await
}

pub async fn admin_handler(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            id,
            scope: Scope::Global,
        },
    )
    .await
}
