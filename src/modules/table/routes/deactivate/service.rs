use super::types::{request, response};
use crate::{modules::table::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let table = repository::deactivate_by_id(
        &ctx.db_conn.pool,
        payload.id,
        payload.auth.restaurant.id,
    )
    .await
    .map_err(|_| response::Error::FailedToDeactivateTable)?
    .ok_or(response::Error::TableNotFound)?;

    tracing::info!(
        table_id = %table.id,
        table_number = table.table_number,
        "Table deactivated"
    );

    Ok(response::Success::TableDeactivated)
}
