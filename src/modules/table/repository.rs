use crate::utils::pagination::{Paginated, Pagination};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Table {
    pub id: String,
    pub restaurant_id: String,
    pub table_number: i32,
    pub token: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateTablePayload {
    pub restaurant_id: String,
    pub table_number: i32,
    pub token: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateTablePayload) -> Result<Table, Error> {
    sqlx::query_as::<_, Table>(
        "
        INSERT INTO restaurant_tables
        (id, restaurant_id, table_number, token)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.restaurant_id)
    .bind(payload.table_number)
    .bind(payload.token)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating table {} for restaurant {}: {}",
            payload.table_number,
            payload.restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_token<'e, E: PgExecutor<'e>>(e: E, token: String) -> Result<Option<Table>, Error> {
    sqlx::query_as::<_, Table>("SELECT * FROM restaurant_tables WHERE token = $1")
        .bind(token)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching table by token: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    restaurant_id: String,
) -> Result<Option<Table>, Error> {
    sqlx::query_as::<_, Table>(
        "SELECT * FROM restaurant_tables WHERE id = $1 AND restaurant_id = $2",
    )
    .bind(&id)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching table with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn find_active_numbers<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<i32>, Error> {
    sqlx::query_scalar::<_, i32>(
        "SELECT table_number FROM restaurant_tables WHERE restaurant_id = $1 AND is_active",
    )
    .bind(&restaurant_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching table numbers of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn count_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM restaurant_tables WHERE restaurant_id = $1")
        .bind(&restaurant_id)
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while counting tables of restaurant {}: {}",
                restaurant_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
    pagination: Pagination,
) -> Result<Vec<Table>, Error> {
    sqlx::query_as::<_, Table>(
        "
        SELECT * FROM restaurant_tables
        WHERE restaurant_id = $1
        ORDER BY is_active DESC, table_number ASC, created_at DESC
        LIMIT $2
        OFFSET $3
        ",
    )
    .bind(&restaurant_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch tables of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub fn paginate(tables: Vec<Table>, total: i64, pagination: &Pagination) -> Paginated<Table> {
    Paginated::new(
        tables,
        total.max(0) as u32,
        pagination.page.max(1),
        pagination.per_page.max(1),
    )
}

pub async fn deactivate_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    restaurant_id: String,
) -> Result<Option<Table>, Error> {
    sqlx::query_as::<_, Table>(
        "
        UPDATE restaurant_tables SET
            is_active = FALSE,
            updated_at = CASE WHEN is_active THEN NOW() ELSE updated_at END
        WHERE
            id = $1
            AND restaurant_id = $2
        RETURNING *
        ",
    )
    .bind(&id)
    .bind(restaurant_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to deactivate table {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}
