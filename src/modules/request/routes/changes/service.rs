use super::types::{request, response};
use crate::types::Context;
use axum::response::sse::{KeepAlive, Sse};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

pub fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    tracing::debug!(scope = ?payload.scope, "Change subscriber connected");

    let events = ctx.changes.subscribe(payload.scope).map(response::into_event);

    Sse::new(events.boxed()).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}
