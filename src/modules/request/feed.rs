//! In-process change stream for the `requests` table.
//!
//! Delivery is best-effort: a subscriber that falls behind skips what it
//! missed, and dashboards reconcile through their periodic snapshot.

use super::repository::Request;
use super::Scope;
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub op: ChangeOp,
    pub row: Request,
}

impl Change {
    pub fn insert(row: Request) -> Self {
        Self {
            op: ChangeOp::Insert,
            row,
        }
    }

    pub fn update(row: Request) -> Self {
        Self {
            op: ChangeOp::Update,
            row,
        }
    }
}

#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<Change>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, change: Change) {
        let id = change.row.id.clone();
        match self.sender.send(change) {
            Ok(receivers) => tracing::debug!(request_id = %id, receivers, "Change published"),
            Err(_) => tracing::debug!(request_id = %id, "Change dropped, no subscribers"),
        }
    }

    /// Changes visible to `scope`, from the moment of subscription onwards.
    pub fn subscribe(&self, scope: Scope) -> impl Stream<Item = Change> + Send + 'static {
        stream::unfold(self.sender.subscribe(), |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(change) => return Some((change, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Change subscriber lagged, events skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .filter(move |change| futures::future::ready(scope.includes(&change.row)))
    }
}
