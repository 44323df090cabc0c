use super::service::service;
use super::types::request;
use crate::{
    modules::{
        auth::middleware::{AdminAuth, StaffAuth},
        request::Scope,
    },
    types::Context,
    utils::validation::ValidatedQuery,
};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn panel_handler(
    auth: StaffAuth,
    State(ctx): State<Arc<Context>>,
    ValidatedQuery(query): ValidatedQuery<request::Query>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            scope: Scope::Restaurant(auth.restaurant.id),
            query,
        },
    )
    .await
}

pub async fn admin_handler(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    ValidatedQuery(query): ValidatedQuery<request::Query>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            scope: Scope::Global,
            query,
        },
    )
    .await
}
