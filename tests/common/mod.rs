#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tablecall::dashboard::{
    AlertError, Alerter, ChangeStream, RequestSource, SourceError, View,
};
use tablecall::guest::{self, GuestApi, ResolvedTable};
use tablecall::modules::request::feed::{Change, ChangeFeed};
use tablecall::modules::request::lifecycle::{self, RequestStatus, RequestType, Transition};
use tablecall::modules::request::repository::Request;
use tablecall::modules::request::Scope;
use tokio::sync::watch;
use tokio::time::Instant;
use ulid::Ulid;

pub const RESTAURANT_ID: &str = "restaurant-1";
pub const RESTAURANT_NAME: &str = "Chez Test";

struct TableEntry {
    number: i32,
    active: bool,
}

#[derive(Default)]
struct State {
    tables: HashMap<String, TableEntry>,
    requests: Vec<Request>,
}

/// In-memory stand-in for the HTTP API, shared by guests and dashboards.
#[derive(Clone)]
pub struct FakeServer {
    state: Arc<Mutex<State>>,
    feed: ChangeFeed,
    pub create_calls: Arc<AtomicUsize>,
    pub fail_snapshots: Arc<AtomicBool>,
    pub fail_completes: Arc<AtomicBool>,
    pub push_enabled: Arc<AtomicBool>,
    pub create_delay: Arc<Mutex<Duration>>,
    pub complete_delay: Arc<Mutex<Duration>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            feed: ChangeFeed::new(64),
            create_calls: Arc::new(AtomicUsize::new(0)),
            fail_snapshots: Arc::new(AtomicBool::new(false)),
            fail_completes: Arc::new(AtomicBool::new(false)),
            push_enabled: Arc::new(AtomicBool::new(true)),
            create_delay: Arc::new(Mutex::new(Duration::ZERO)),
            complete_delay: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn with_table(self, token: &str, number: i32, active: bool) -> Self {
        self.state
            .lock()
            .unwrap()
            .tables
            .insert(token.to_string(), TableEntry { number, active });
        self
    }

    /// Inserts a waiting request as if a guest had just called.
    pub fn open_request(&self, table_number: i32, request_type: RequestType) -> Request {
        let request = Request {
            id: Ulid::new().to_string(),
            restaurant_id: RESTAURANT_ID.to_string(),
            table_number,
            request_type,
            status: RequestStatus::Waiting,
            created_at: Utc::now().naive_utc(),
            completed_at: None,
        };
        self.state.lock().unwrap().requests.push(request.clone());
        self.feed.publish(Change::insert(request.clone()));
        request
    }

    pub fn status_of(&self, id: &str) -> Option<RequestStatus> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status)
    }
}

#[async_trait]
impl GuestApi for FakeServer {
    async fn resolve_table(&self, token: &str) -> Result<ResolvedTable, guest::Error> {
        let state = self.state.lock().unwrap();
        match state.tables.get(token) {
            Some(table) if table.active => Ok(ResolvedTable {
                table_id: format!("table-{}", table.number),
                restaurant_id: RESTAURANT_ID.to_string(),
                table_number: table.number,
                restaurant_name: RESTAURANT_NAME.to_string(),
            }),
            _ => Err(guest::Error::Unavailable),
        }
    }

    async fn create_request(
        &self,
        token: &str,
        request_type: RequestType,
    ) -> Result<String, guest::Error> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.create_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let number = {
            let state = self.state.lock().unwrap();
            match state.tables.get(token) {
                Some(table) if table.active => table.number,
                _ => return Err(guest::Error::Unavailable),
            }
        };

        Ok(self.open_request(number, request_type).id)
    }
}

#[async_trait]
impl RequestSource for FakeServer {
    async fn snapshot_open_requests(&self, limit: u32) -> Result<Vec<Request>, SourceError> {
        if self.fail_snapshots.load(Ordering::SeqCst) {
            return Err(SourceError::Transient("database unavailable".to_string()));
        }

        let mut open: Vec<Request> = self
            .state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.status.is_open())
            .cloned()
            .collect();
        open.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        open.truncate(limit as usize);
        Ok(open)
    }

    async fn complete_request(&self, id: &str) -> Result<(), SourceError> {
        if self.fail_completes.load(Ordering::SeqCst) {
            return Err(SourceError::Transient("connection reset".to_string()));
        }

        let delay = *self.complete_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let completed = {
            let mut state = self.state.lock().unwrap();
            let request = state
                .requests
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(SourceError::NotFound)?;

            match lifecycle::resolve(request.status) {
                Transition::Completed => {
                    request.status = RequestStatus::Completed;
                    request.completed_at = Some(Utc::now().naive_utc());
                    Some(request.clone())
                }
                Transition::AlreadyCompleted => None,
            }
        };

        if let Some(row) = completed {
            self.feed.publish(Change::update(row));
        }
        Ok(())
    }

    async fn subscribe_changes(&self) -> Result<ChangeStream, SourceError> {
        if !self.push_enabled.load(Ordering::SeqCst) {
            return Err(SourceError::Transient("push unavailable".to_string()));
        }
        Ok(self.feed.subscribe(Scope::Global).map(Ok).boxed())
    }
}

/// Records when alerts were played.
#[derive(Clone, Default)]
pub struct RecordingAlerter {
    pub plays: Arc<Mutex<Vec<Instant>>>,
    pub refuse_unlock: Arc<AtomicBool>,
}

impl RecordingAlerter {
    pub fn play_count(&self) -> usize {
        self.plays.lock().unwrap().len()
    }
}

#[async_trait]
impl Alerter for RecordingAlerter {
    async fn unlock(&self) -> Result<(), AlertError> {
        if self.refuse_unlock.load(Ordering::SeqCst) {
            return Err(AlertError("autoplay blocked".to_string()));
        }
        Ok(())
    }

    async fn play(&self) -> Result<(), AlertError> {
        self.plays.lock().unwrap().push(Instant::now());
        Ok(())
    }
}

/// Waits until the published view satisfies `predicate`.
pub async fn wait_for(view: &mut watch::Receiver<View>, predicate: impl Fn(&View) -> bool) -> View {
    tokio::time::timeout(Duration::from_secs(60), async {
        loop {
            let current = view.borrow_and_update().clone();
            if predicate(&current) {
                return current;
            }
            view.changed().await.expect("dashboard stopped");
        }
    })
    .await
    .expect("view never reached the expected state")
}
