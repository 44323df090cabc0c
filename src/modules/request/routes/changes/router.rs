use super::handler;
use crate::types::Context;
use axum::routing::{get, Router};
use std::sync::Arc;

pub fn get_panel_router() -> Router<Arc<Context>> {
    Router::new().route("/requests/changes", get(handler::panel_handler))
}

pub fn get_admin_router() -> Router<Arc<Context>> {
    Router::new().route("/requests/changes", get(handler::admin_handler))
}
