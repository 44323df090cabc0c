use super::types::{request, response};
use crate::{
    modules::table::{repository, service::TableDetails},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_by_id(&ctx.db_conn.pool, payload.id, payload.auth.restaurant.id)
        .await
        .map_err(|_| response::Error::FailedToFetchTable)?
        .ok_or(response::Error::TableNotFound)
        .map(|table| response::Success::Table(TableDetails::new(&ctx.app, table)))
}
