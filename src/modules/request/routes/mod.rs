mod changes;
mod complete;
mod create;
mod open;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

/// Routes reachable with nothing but a table's capability token.
pub fn get_guest_router() -> Router<Arc<Context>> {
    Router::new().merge(create::get_router())
}

pub fn get_panel_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(open::get_panel_router())
        .merge(complete::get_panel_router())
        .merge(changes::get_panel_router())
}

pub fn get_admin_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(open::get_admin_router())
        .merge(complete::get_admin_router())
        .merge(changes::get_admin_router())
}
