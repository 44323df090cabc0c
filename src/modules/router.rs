use super::{request, restaurant, table};
use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest(
            "/tables",
            Router::new()
                .merge(table::routes::get_guest_router())
                .merge(request::routes::get_guest_router()),
        )
        .nest(
            "/panel",
            Router::new()
                .merge(restaurant::routes::get_router())
                .merge(table::routes::get_panel_router())
                .merge(request::routes::get_panel_router()),
        )
        .nest("/admin", request::routes::get_admin_router())
}
