use super::feed::Change;
use super::lifecycle::{self, RequestType, Transition};
use super::repository::{self, Request};
use super::Scope;
use crate::types::Context;
use std::sync::Arc;

pub const MAX_SNAPSHOT_LIMIT: u32 = 100;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    TableUnavailable,
    RequestNotFound,
}

pub struct CreateRequestPayload {
    pub table_id: String,
    pub request_type: RequestType,
}

/// Opens a new service call on the table the guest's token resolved to.
/// Status and timestamp are always server-assigned; a table deactivated since
/// resolution is rejected even if its number has been handed out again.
pub async fn create_request(
    ctx: Arc<Context>,
    payload: CreateRequestPayload,
) -> Result<Request, Error> {
    let request = repository::create(
        &ctx.db_conn.pool,
        repository::CreateRequestPayload {
            table_id: payload.table_id,
            request_type: payload.request_type,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?
    .ok_or(Error::TableUnavailable)?;

    tracing::info!(
        request_id = %request.id,
        restaurant_id = %request.restaurant_id,
        table_number = request.table_number,
        request_type = %request.request_type,
        "Service call created"
    );

    ctx.changes.publish(Change::insert(request.clone()));

    Ok(request)
}

/// Staff "resolve" action. Completing an already completed request succeeds
/// without touching it again.
pub async fn complete_request(
    ctx: Arc<Context>,
    id: String,
    scope: Scope,
) -> Result<Transition, Error> {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        Error::UnexpectedError
    })?;

    let request = repository::find_by_id_for_update(&mut *tx, id.clone(), &scope)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or_else(|| {
            tracing::warn!(request_id = %id, "Resolve called on unknown request");
            Error::RequestNotFound
        })?;

    let transition = lifecycle::resolve(request.status);
    let completed = match transition {
        Transition::Completed => Some(
            repository::mark_completed(&mut *tx, id.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?,
        ),
        Transition::AlreadyCompleted => None,
    };

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        Error::UnexpectedError
    })?;

    match completed {
        Some(row) => {
            tracing::info!(request_id = %row.id, "Service call completed");
            ctx.changes.publish(Change::update(row));
        }
        None => tracing::debug!(request_id = %id, "Service call was already completed"),
    }

    Ok(transition)
}

pub async fn snapshot_open_requests(
    ctx: Arc<Context>,
    scope: Scope,
    limit: u32,
) -> Result<Vec<Request>, Error> {
    let limit = limit.clamp(1, MAX_SNAPSHOT_LIMIT);

    repository::find_open(&ctx.db_conn.pool, &scope, limit as i64)
        .await
        .map_err(|_| Error::UnexpectedError)
}
