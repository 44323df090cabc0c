pub use crate::utils::database;
use crate::modules::request::feed::ChangeFeed;
use async_trait::async_trait;
use std::env;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
    pub admin_token: Option<String>,
}

impl AppContext {
    /// Link encoded in a table's QR code.
    pub fn table_url(&self, token: &str) -> String {
        format!("{}/t/{}", self.url.trim_end_matches('/'), token)
    }
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub changes: ChangeFeed,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
    pub admin_token: Option<String>,
}

#[derive(Clone)]
pub struct ChangeFeedConfig {
    pub capacity: usize,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub changes: ChangeFeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "4".to_string())
            .parse::<u32>()
            .expect("Invalid DATABASE_MAX_CONNECTIONS");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let admin_token = env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        let change_feed_capacity = env::var("CHANGE_FEED_CAPACITY")
            .unwrap_or_else(|_| "256".to_string())
            .parse::<usize>()
            .expect("Invalid CHANGE_FEED_CAPACITY");

        Self {
            database: DatabaseConfig {
                url: database_url,
                max_connections: database_max_connections,
            },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
                admin_token,
            },
            changes: ChangeFeedConfig {
                capacity: change_feed_capacity,
            },
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        let db_conn =
            database::connect(self.database.url.as_str(), self.database.max_connections).await;
        database::migrate(&db_conn).await;

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
                admin_token: self.app.admin_token,
            },
            db_conn,
            changes: ChangeFeed::new(self.changes.capacity),
        }
    }
}
