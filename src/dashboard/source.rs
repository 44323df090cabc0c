use crate::modules::request::feed::Change;
use crate::modules::request::repository::Request;
use async_trait::async_trait;
use futures::stream::BoxStream;

pub type ChangeStream = BoxStream<'static, Result<Change, SourceError>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("request not found")]
    NotFound,
    #[error("dashboard token rejected")]
    Unauthorized,
    #[error("{0}")]
    Transient(String),
}

/// Where the dashboard reads open requests from and sends resolutions to.
#[async_trait]
pub trait RequestSource: Send + Sync {
    async fn snapshot_open_requests(&self, limit: u32) -> Result<Vec<Request>, SourceError>;

    async fn complete_request(&self, id: &str) -> Result<(), SourceError>;

    /// Opens the push channel. Ends or yields an error when the connection drops.
    async fn subscribe_changes(&self) -> Result<ChangeStream, SourceError>;
}
