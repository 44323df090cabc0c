use super::lifecycle::{RequestStatus, RequestType};
use super::Scope;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Request {
    pub id: String,
    pub restaurant_id: String,
    pub table_number: i32,
    #[sqlx(try_from = "String")]
    pub request_type: RequestType,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

pub struct CreateRequestPayload {
    pub table_id: String,
    pub request_type: RequestType,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Inserts a `waiting` request against the table with `table_id`, copying its
/// restaurant and current number. Returns `None` unless that table is active.
pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRequestPayload,
) -> Result<Option<Request>, Error> {
    sqlx::query_as::<_, Request>(
        "
        INSERT INTO requests
        (id, restaurant_id, table_number, request_type, status)
        SELECT $1, t.restaurant_id, t.table_number, $2, 'waiting'
        FROM restaurant_tables t
        WHERE
            t.id = $3
            AND t.is_active
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.request_type.as_str())
    .bind(&payload.table_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating a request for table {}: {}",
            payload.table_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    scope: &Scope,
) -> Result<Option<Request>, Error> {
    sqlx::query_as::<_, Request>(
        "
        SELECT * FROM requests
        WHERE
            id = $1
            AND ($2::text IS NULL OR restaurant_id = $2)
        FOR UPDATE
        ",
    )
    .bind(&id)
    .bind(scope.restaurant_id())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching request with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn mark_completed<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Request, Error> {
    sqlx::query_as::<_, Request>(
        "
        UPDATE requests SET
            status = 'completed',
            completed_at = NOW()
        WHERE
            id = $1
            AND status = 'waiting'
        RETURNING *
        ",
    )
    .bind(&id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to complete request {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

/// Open requests, most recent first. Ties break on id so the order is stable.
pub async fn find_open<'e, E: PgExecutor<'e>>(
    e: E,
    scope: &Scope,
    limit: i64,
) -> Result<Vec<Request>, Error> {
    sqlx::query_as::<_, Request>(
        "
        SELECT * FROM requests
        WHERE
            status = 'waiting'
            AND ($1::text IS NULL OR restaurant_id = $1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        ",
    )
    .bind(scope.restaurant_id())
    .bind(limit)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching open requests: {}", err);
        Error::UnexpectedError
    })
}
