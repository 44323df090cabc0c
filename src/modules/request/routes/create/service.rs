use super::types::{request, response};
use crate::{
    modules::{
        request::{
            lifecycle::RequestType,
            service::{self as request_service, CreateRequestPayload},
        },
        table::service::{self as table_service, ResolveError},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let request_type = payload
        .body
        .as_ref()
        .and_then(request::Body::request_type)
        .and_then(|raw| raw.parse::<RequestType>().ok())
        .ok_or(response::Error::InvalidRequestType)?;

    let identity = table_service::resolve_table(ctx.clone(), payload.token)
        .await
        .map_err(|err| match err {
            ResolveError::NotFound | ResolveError::Inactive => response::Error::TableUnavailable,
            ResolveError::UnexpectedError => response::Error::RequestCreationFailed,
        })?;

    request_service::create_request(
        ctx,
        CreateRequestPayload {
            table_id: identity.table_id,
            request_type,
        },
    )
    .await
    .map_err(|err| match err {
        request_service::Error::TableUnavailable => response::Error::TableUnavailable,
        _ => response::Error::RequestCreationFailed,
    })
    .map(response::Success::RequestCreated)
}
