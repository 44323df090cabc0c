use super::repository::{self, Table};
use crate::modules::restaurant;
use crate::types::{AppContext, Context};
use crate::utils::token;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// What a valid capability token grants access to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TableIdentity {
    pub table_id: String,
    pub restaurant_id: String,
    pub table_number: i32,
}

/// A table as shown to staff, with the link its QR code encodes.
#[derive(Serialize, Clone, Debug)]
pub struct TableDetails {
    #[serde(flatten)]
    pub table: Table,
    pub qr_url: String,
}

impl TableDetails {
    pub fn new(app: &AppContext, table: Table) -> Self {
        let qr_url = app.table_url(&table.token);
        Self { table, qr_url }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    Inactive,
    UnexpectedError,
}

pub fn identify(table: Option<Table>) -> Result<TableIdentity, ResolveError> {
    match table {
        None => Err(ResolveError::NotFound),
        Some(table) if !table.is_active => Err(ResolveError::Inactive),
        Some(table) => Ok(TableIdentity {
            table_id: table.id,
            restaurant_id: table.restaurant_id,
            table_number: table.table_number,
        }),
    }
}

pub async fn resolve_table(ctx: Arc<Context>, token: String) -> Result<TableIdentity, ResolveError> {
    let table = repository::find_by_token(&ctx.db_conn.pool, token)
        .await
        .map_err(|_| ResolveError::UnexpectedError)?;

    identify(table).map_err(|err| {
        tracing::debug!(kind = ?err, "Table token rejected");
        err
    })
}

/// Smallest positive integer not currently held by an active table.
pub fn next_table_number(active: impl IntoIterator<Item = i32>) -> i32 {
    let used: BTreeSet<i32> = active.into_iter().filter(|n| *n > 0).collect();

    let mut candidate = 1;
    for number in used {
        if number != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

#[derive(Debug)]
pub enum ProvisionError {
    RestaurantNotFound,
    UnexpectedError,
}

pub async fn provision_table(ctx: Arc<Context>, restaurant_id: String) -> Result<Table, ProvisionError> {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        ProvisionError::UnexpectedError
    })?;

    let exists = restaurant::repository::lock_by_id(&mut *tx, restaurant_id.clone())
        .await
        .map_err(|_| ProvisionError::UnexpectedError)?;
    if !exists {
        return Err(ProvisionError::RestaurantNotFound);
    }

    let active = repository::find_active_numbers(&mut *tx, restaurant_id.clone())
        .await
        .map_err(|_| ProvisionError::UnexpectedError)?;

    let table = repository::create(
        &mut *tx,
        repository::CreateTablePayload {
            restaurant_id,
            table_number: next_table_number(active),
            token: token::generate(),
        },
    )
    .await
    .map_err(|_| ProvisionError::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        ProvisionError::UnexpectedError
    })?;

    tracing::info!(
        table_id = %table.id,
        restaurant_id = %table.restaurant_id,
        table_number = table.table_number,
        "Table provisioned"
    );

    Ok(table)
}
