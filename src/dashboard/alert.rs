use super::engine::ScheduledAlert;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct AlertError(pub String);

/// Audible output of the dashboard.
#[async_trait]
pub trait Alerter: Send + Sync {
    /// Called when staff turn sound on. Failing here keeps sound disabled.
    async fn unlock(&self) -> Result<(), AlertError>;

    async fn play(&self) -> Result<(), AlertError>;
}

/// Plays scheduled alerts in the background. Muting takes effect for alerts
/// that are already waiting out their stagger delay.
#[derive(Clone)]
pub struct Player {
    alerter: Arc<dyn Alerter>,
    enabled: Arc<AtomicBool>,
}

impl Player {
    pub fn new(alerter: Arc<dyn Alerter>, enabled: bool) -> Self {
        Self {
            alerter,
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub async fn unlock(&self) -> Result<(), AlertError> {
        self.alerter.unlock().await
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn schedule(&self, alert: ScheduledAlert) {
        let player = self.clone();

        tokio::spawn(async move {
            if !alert.delay.is_zero() {
                tokio::time::sleep(alert.delay).await;
            }
            if !player.enabled.load(Ordering::SeqCst) {
                return;
            }

            // playback failures never touch dashboard state
            if let Err(err) = player.alerter.play().await {
                tracing::debug!(request_id = %alert.request_id, "Alert playback failed: {}", err);
            }
        });
    }
}
