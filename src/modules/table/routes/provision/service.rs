use super::types::{request, response};
use crate::{
    modules::table::service::{self as table_service, ProvisionError, TableDetails},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    table_service::provision_table(ctx.clone(), payload.auth.restaurant.id)
        .await
        .map_err(|err| match err {
            ProvisionError::RestaurantNotFound => response::Error::RestaurantNotFound,
            ProvisionError::UnexpectedError => response::Error::FailedToProvisionTable,
        })
        .map(|table| response::Success::TableProvisioned(TableDetails::new(&ctx.app, table)))
}
