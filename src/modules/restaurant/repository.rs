use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    #[serde(skip_serializing)]
    pub panel_token: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching restaurant with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_panel_token<'e, E: PgExecutor<'e>>(
    e: E,
    panel_token: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE panel_token = $1")
        .bind(panel_token)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching restaurant by panel token: {}",
                err
            );
            Error::UnexpectedError
        })
}

/// Row lock that serializes table provisioning for one restaurant.
pub async fn lock_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool, Error> {
    sqlx::query_scalar::<_, String>("SELECT id FROM restaurants WHERE id = $1 FOR UPDATE")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map(|row| row.is_some())
        .map_err(|err| {
            tracing::error!("Error occurred while locking restaurant {}: {}", id, err);
            Error::UnexpectedError
        })
}
