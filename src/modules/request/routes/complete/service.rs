use super::types::{request, response};
use crate::{
    modules::request::{lifecycle::Transition, service as request_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    request_service::complete_request(ctx, payload.id, payload.scope)
        .await
        .map(|transition| match transition {
            Transition::Completed => response::Success::RequestCompleted,
            Transition::AlreadyCompleted => response::Success::RequestAlreadyCompleted,
        })
        .map_err(|err| match err {
            request_service::Error::RequestNotFound => response::Error::RequestNotFound,
            _ => response::Error::FailedToCompleteRequest,
        })
}
