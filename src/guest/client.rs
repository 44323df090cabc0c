use super::throttle::{Refusal, SubmissionThrottle};
use super::Error;
use crate::modules::request::lifecycle::RequestType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTable {
    pub table_id: String,
    pub restaurant_id: String,
    pub table_number: i32,
    pub restaurant_name: String,
}

/// The two guest-facing operations, keyed by the table's capability token.
#[async_trait]
pub trait GuestApi: Send + Sync {
    async fn resolve_table(&self, token: &str) -> Result<ResolvedTable, Error>;

    /// Returns the id of the created request.
    async fn create_request(&self, token: &str, request_type: RequestType) -> Result<String, Error>;
}

/// One guest session at one table.
pub struct GuestClient<A> {
    api: A,
    token: String,
    throttle: Mutex<SubmissionThrottle>,
}

struct InFlight<'a> {
    throttle: &'a Mutex<SubmissionThrottle>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.throttle).finish();
    }
}

fn lock(throttle: &Mutex<SubmissionThrottle>) -> MutexGuard<'_, SubmissionThrottle> {
    throttle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<A: GuestApi> GuestClient<A> {
    pub fn new(api: A, token: impl Into<String>) -> Self {
        Self::with_throttle(api, token, SubmissionThrottle::default())
    }

    pub fn with_cooldown(api: A, token: impl Into<String>, cooldown: Duration) -> Self {
        Self::with_throttle(api, token, SubmissionThrottle::new(cooldown))
    }

    fn with_throttle(api: A, token: impl Into<String>, throttle: SubmissionThrottle) -> Self {
        Self {
            api,
            token: token.into(),
            throttle: Mutex::new(throttle),
        }
    }

    pub async fn resolve(&self) -> Result<ResolvedTable, Error> {
        self.api.resolve_table(&self.token).await
    }

    /// Sends one service call. Never retried: a failed attempt still counts
    /// against the cooldown.
    pub async fn submit(&self, request_type: RequestType) -> Result<String, Error> {
        lock(&self.throttle)
            .try_begin(Instant::now())
            .map_err(|refusal| {
                match refusal {
                    Refusal::InFlight => tracing::debug!("Submission refused, one is in flight"),
                    Refusal::CoolingDown { remaining } => {
                        tracing::debug!(?remaining, "Submission refused, cooling down")
                    }
                }
                Error::Throttled
            })?;

        let _in_flight = InFlight {
            throttle: &self.throttle,
        };

        self.api.create_request(&self.token, request_type).await
    }

    /// Like [`GuestClient::submit`] for an untyped button value.
    pub async fn submit_raw(&self, request_type: &str) -> Result<String, Error> {
        let request_type = request_type
            .parse::<RequestType>()
            .map_err(|_| Error::InvalidInput)?;
        self.submit(request_type).await
    }
}
