mod deactivate;
mod get;
mod list;
mod provision;
mod resolve;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

/// Routes reachable with nothing but a table's capability token.
pub fn get_guest_router() -> Router<Arc<Context>> {
    Router::new().merge(resolve::get_router())
}

pub fn get_panel_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(provision::get_router())
        .merge(list::get_router())
        .merge(get::get_router())
        .merge(deactivate::get_router())
}
