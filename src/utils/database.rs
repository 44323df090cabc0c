use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5))
}

pub async fn connect(database_url: &str, max_connections: u32) -> DatabaseConnection {
    let pool = pool_options(max_connections)
        .connect(database_url)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            panic!("Error connecting to database");
        });

    tracing::info!(max_connections, "Connected to database");

    DatabaseConnection { pool }
}

/// A pool that only opens connections on first use.
pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, sqlx::Error> {
    let pool = pool_options(max_connections).connect_lazy(database_url)?;
    Ok(DatabaseConnection { pool })
}

pub async fn migrate(db_conn: &DatabaseConnection) {
    if let Err(err) = sqlx::migrate!().run(&db_conn.pool).await {
        tracing::error!("{}", err);
        panic!("Failed to run database migrations");
    }

    tracing::info!("Database migrations applied");
}
