use super::types::{request, response};
use crate::{
    modules::table::{repository, service::TableDetails},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant_id = payload.auth.restaurant.id;

    let total = repository::count_by_restaurant_id(&ctx.db_conn.pool, restaurant_id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchTables)?;

    let tables = repository::find_many(
        &ctx.db_conn.pool,
        restaurant_id,
        payload.pagination.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToFetchTables)?;

    Ok(response::Success::PaginatedTables(
        repository::paginate(tables, total, &payload.pagination)
            .map(|table| TableDetails::new(&ctx.app, table)),
    ))
}
