use super::types::{request, response};
use crate::{
    modules::{
        restaurant,
        table::service::{self as table_service, ResolveError},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let identity = table_service::resolve_table(ctx.clone(), payload.token)
        .await
        .map_err(|err| match err {
            ResolveError::NotFound | ResolveError::Inactive => response::Error::TableUnavailable,
            ResolveError::UnexpectedError => response::Error::FailedToResolveTable,
        })?;

    let restaurant = restaurant::repository::find_by_id(
        &ctx.db_conn.pool,
        identity.restaurant_id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToResolveTable)?
    .ok_or(response::Error::TableUnavailable)?;

    Ok(response::Success::TableResolved {
        identity,
        restaurant_name: restaurant.name,
    })
}
