use super::handler;
use crate::types::Context;
use axum::routing::{get, Router};
use std::sync::Arc;

pub fn get_panel_router() -> Router<Arc<Context>> {
    Router::new().route("/requests/open", get(handler::panel_handler))
}

pub fn get_admin_router() -> Router<Arc<Context>> {
    Router::new().route("/requests/open", get(handler::admin_handler))
}
