//! The dashboard actor.
//!
//! A single task owns the [`Engine`] and serializes everything that touches
//! it: poll ticks, pushed changes, staff commands and the results of resolve
//! calls running in the background. Renderers follow the published [`View`].

use super::alert::Player;
use super::engine::{Engine, Input, Outcome};
use super::preference::SoundPreference;
use super::source::{RequestSource, SourceError};
use crate::modules::request::feed::Change;
use crate::modules::request::repository::Request;
use crate::modules::request::service::MAX_SNAPSHOT_LIMIT;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

const COMMAND_BUFFER: usize = 64;

#[derive(Clone, Debug)]
pub struct Settings {
    pub poll_interval: Duration,
    pub alert_stagger: Duration,
    pub snapshot_limit: u32,
    pub push_retry: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            alert_stagger: super::engine::DEFAULT_ALERT_STAGGER,
            snapshot_limit: 100,
            push_retry: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("poll interval must be greater than zero")]
    PollInterval,
    #[error("push retry delay must be greater than zero")]
    PushRetry,
    #[error("snapshot limit must be between 1 and {}", MAX_SNAPSHOT_LIMIT)]
    SnapshotLimit,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.poll_interval.is_zero() {
            return Err(SettingsError::PollInterval);
        }
        if self.push_retry.is_zero() {
            return Err(SettingsError::PushRetry);
        }
        if !(1..=MAX_SNAPSHOT_LIMIT).contains(&self.snapshot_limit) {
            return Err(SettingsError::SnapshotLimit);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushStatus {
    Connecting,
    Live,
    Disconnected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub requests: Vec<Request>,
    /// False until the first snapshot has been merged.
    pub ready: bool,
    pub sound_enabled: bool,
    pub push: PushStatus,
    pub last_error: Option<String>,
}

enum Message {
    Refresh,
    Resolve(String),
    ResolveFinished {
        row: Request,
        result: Result<(), SourceError>,
    },
    EnableSound(oneshot::Sender<bool>),
    DisableSound,
    Change(Change),
    Push(PushStatus),
}

pub struct Dashboard {
    sender: mpsc::Sender<Message>,
    view: watch::Receiver<View>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Dashboard {
    /// Loads the stored sound preference and starts polling and listening.
    pub async fn start(
        source: Arc<dyn RequestSource>,
        player: Player,
        preference: SoundPreference,
        settings: Settings,
    ) -> Self {
        let sound_enabled = preference.load().await;
        player.set_enabled(sound_enabled);

        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view) = watch::channel(View {
            requests: Vec::new(),
            ready: false,
            sound_enabled,
            push: PushStatus::Connecting,
            last_error: None,
        });
        let cancel = CancellationToken::new();

        let listener = tokio::spawn(listen(
            source.clone(),
            sender.clone(),
            cancel.clone(),
            settings.push_retry,
        ));

        let worker = Worker {
            engine: Engine::new(sound_enabled, settings.alert_stagger),
            source,
            player,
            preference,
            settings,
            sender: sender.clone(),
            receiver,
            view: view_tx,
            push: PushStatus::Connecting,
            last_error: None,
            cancel: cancel.clone(),
        };
        let worker = tokio::spawn(worker.run());

        Self {
            sender,
            view,
            cancel,
            tasks: vec![worker, listener],
        }
    }

    pub fn view(&self) -> watch::Receiver<View> {
        self.view.clone()
    }

    async fn send(&self, message: Message) {
        if self.sender.send(message).await.is_err() {
            tracing::debug!("Dashboard worker has stopped, command dropped");
        }
    }

    /// Triggers an immediate snapshot.
    pub async fn refresh(&self) {
        self.send(Message::Refresh).await;
    }

    pub async fn resolve(&self, id: impl Into<String>) {
        self.send(Message::Resolve(id.into())).await;
    }

    /// Returns whether sound ended up enabled.
    pub async fn enable_sound(&self) -> bool {
        let (reply, enabled) = oneshot::channel();
        self.send(Message::EnableSound(reply)).await;
        enabled.await.unwrap_or(false)
    }

    pub async fn disable_sound(&self) {
        self.send(Message::DisableSound).await;
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(err) = task.await {
                tracing::error!("Dashboard task ended abnormally: {}", err);
            }
        }
    }
}

struct Worker {
    engine: Engine,
    source: Arc<dyn RequestSource>,
    player: Player,
    preference: SoundPreference,
    settings: Settings,
    sender: mpsc::Sender<Message>,
    receiver: mpsc::Receiver<Message>,
    view: watch::Sender<View>,
    push: PushStatus,
    last_error: Option<String>,
    cancel: CancellationToken,
}

impl Worker {
    async fn run(mut self) {
        let mut poll = tokio::time::interval(self.settings.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = poll.tick() => self.poll().await,
                message = self.receiver.recv() => match message {
                    Some(Message::Refresh) => {
                        self.poll().await;
                        poll.reset();
                    }
                    Some(message) => self.handle(message).await,
                    None => break,
                },
            }
        }

        tracing::debug!("Dashboard worker stopped");
    }

    async fn poll(&mut self) {
        match self
            .source
            .snapshot_open_requests(self.settings.snapshot_limit)
            .await
        {
            Ok(rows) => {
                let outcome = self.engine.merge(Input::Snapshot(rows));
                self.last_error = None;
                self.dispatch(outcome);
            }
            Err(err) => {
                // keep showing the last good list
                tracing::warn!("Failed to fetch open requests: {}", err);
                self.last_error = Some(format!("Could not refresh requests: {}", err));
            }
        }
        self.publish();
    }

    async fn handle(&mut self, message: Message) {
        match message {
            Message::Refresh => self.poll().await,
            Message::Change(change) => {
                let outcome = self.engine.merge(Input::Change(change));
                self.dispatch(outcome);
            }
            Message::Push(status) => {
                tracing::debug!(?status, "Push channel status changed");
                self.push = status;
            }
            Message::Resolve(id) => self.begin_resolve(id),
            Message::ResolveFinished { row, result } => self.finish_resolve(row, result),
            Message::EnableSound(reply) => {
                let enabled = self.enable_sound().await;
                let _ = reply.send(enabled);
            }
            Message::DisableSound => self.set_sound(false).await,
        }
        self.publish();
    }

    fn begin_resolve(&mut self, id: String) {
        let Some(row) = self.engine.begin_resolve(&id) else {
            tracing::debug!(request_id = %id, "Resolve ignored, request is not on screen");
            return;
        };

        let source = self.source.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = source.complete_request(&row.id).await;
            let _ = sender.send(Message::ResolveFinished { row, result }).await;
        });
    }

    fn finish_resolve(&mut self, row: Request, result: Result<(), SourceError>) {
        match result {
            Ok(()) => {
                tracing::debug!(request_id = %row.id, "Request resolved");
                self.engine.confirm_resolve(&row.id);
            }
            Err(SourceError::NotFound) => {
                tracing::warn!(request_id = %row.id, "Resolved request no longer exists");
                self.engine.confirm_resolve(&row.id);
            }
            Err(err) => {
                tracing::warn!(request_id = %row.id, "Failed to resolve request: {}", err);
                self.last_error = Some(format!(
                    "Could not resolve table {}: {}",
                    row.table_number, err
                ));
                self.engine.restore(row);
            }
        }
    }

    async fn enable_sound(&mut self) -> bool {
        match self.player.unlock().await {
            Ok(()) => {
                self.set_sound(true).await;
                true
            }
            Err(err) => {
                tracing::warn!("Audio could not be unlocked: {}", err);
                self.last_error = Some(format!("Sound unavailable: {}", err));
                self.set_sound(false).await;
                false
            }
        }
    }

    async fn set_sound(&mut self, enabled: bool) {
        self.engine.set_sound_enabled(enabled);
        self.player.set_enabled(enabled);

        if let Err(err) = self.preference.store(enabled).await {
            tracing::warn!("Failed to persist sound preference: {}", err);
        }
    }

    fn dispatch(&mut self, outcome: Outcome) {
        for id in &outcome.arrived {
            tracing::info!(request_id = %id, "New request arrived");
        }
        for alert in outcome.alerts {
            self.player.schedule(alert);
        }
    }

    fn publish(&self) {
        let next = View {
            requests: self.engine.visible().to_vec(),
            ready: !self.engine.is_booting(),
            sound_enabled: self.engine.sound_enabled(),
            push: self.push,
            last_error: self.last_error.clone(),
        };

        self.view.send_if_modified(|view| {
            if *view == next {
                return false;
            }
            *view = next;
            true
        });
    }
}

/// Keeps the push channel open, reconnecting after `retry` when it drops.
async fn listen(
    source: Arc<dyn RequestSource>,
    sender: mpsc::Sender<Message>,
    cancel: CancellationToken,
    retry: Duration,
) {
    loop {
        if sender.send(Message::Push(PushStatus::Connecting)).await.is_err() {
            return;
        }

        let subscribed = tokio::select! {
            _ = cancel.cancelled() => return,
            subscribed = source.subscribe_changes() => subscribed,
        };

        match subscribed {
            Ok(mut changes) => {
                let _ = sender.send(Message::Push(PushStatus::Live)).await;

                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => return,
                        change = changes.next() => match change {
                            Some(Ok(change)) => {
                                if sender.send(Message::Change(change)).await.is_err() {
                                    return;
                                }
                            }
                            Some(Err(err)) => {
                                tracing::warn!("Push channel failed: {}", err);
                                break;
                            }
                            None => {
                                tracing::debug!("Push channel closed");
                                break;
                            }
                        },
                    }
                }
            }
            Err(err) => tracing::warn!("Failed to open push channel: {}", err),
        }

        if sender.send(Message::Push(PushStatus::Disconnected)).await.is_err() {
            return;
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(retry) => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn zero_intervals_are_rejected() {
        let settings = Settings {
            poll_interval: Duration::ZERO,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::PollInterval));

        let settings = Settings {
            push_retry: Duration::ZERO,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::PushRetry));
    }

    #[test]
    fn snapshot_limit_must_be_accepted_by_the_server() {
        for snapshot_limit in [0, MAX_SNAPSHOT_LIMIT + 1] {
            let settings = Settings {
                snapshot_limit,
                ..Settings::default()
            };
            assert_eq!(settings.validate(), Err(SettingsError::SnapshotLimit));
        }

        let settings = Settings {
            snapshot_limit: MAX_SNAPSHOT_LIMIT,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Ok(()));
    }
}
