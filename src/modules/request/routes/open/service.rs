use super::types::{request, response};
use crate::{
    modules::request::service::{self as request_service, MAX_SNAPSHOT_LIMIT},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    request_service::snapshot_open_requests(
        ctx,
        payload.scope,
        payload.query.limit.unwrap_or(MAX_SNAPSHOT_LIMIT),
    )
    .await
    .map(response::Success::OpenRequests)
    .map_err(|_| response::Error::FailedToFetchRequests)
}
