//! Merge logic behind the staff dashboard.
//!
//! The engine owns the list shown to staff and the set of request ids it has
//! already accounted for. Every input (a full snapshot from the poll, or a
//! single change from the push channel) goes through [`Engine::merge`], which
//! reports the genuinely new arrivals and the alerts to play for them.

use crate::modules::request::feed::{Change, ChangeOp};
use crate::modules::request::repository::Request;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_ALERT_STAGGER: Duration = Duration::from_millis(450);

#[derive(Debug, Clone)]
pub enum Input {
    Snapshot(Vec<Request>),
    Change(Change),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledAlert {
    pub request_id: String,
    pub delay: Duration,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Ids seen for the first time, oldest first.
    pub arrived: Vec<String>,
    pub alerts: Vec<ScheduledAlert>,
}

#[derive(Debug)]
pub struct Engine {
    observed: HashSet<String>,
    /// Resolved locally, server confirmation outstanding.
    pending: HashSet<String>,
    visible: Vec<Request>,
    boot: bool,
    sound_enabled: bool,
    stagger: Duration,
}

/// Most recent first; equal timestamps fall back to the id.
fn display_order(a: &Request, b: &Request) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

impl Engine {
    pub fn new(sound_enabled: bool, stagger: Duration) -> Self {
        Self {
            observed: HashSet::new(),
            pending: HashSet::new(),
            visible: Vec::new(),
            boot: true,
            sound_enabled,
            stagger,
        }
    }

    pub fn visible(&self) -> &[Request] {
        &self.visible
    }

    pub fn is_booting(&self) -> bool {
        self.boot
    }

    pub fn has_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn merge(&mut self, input: Input) -> Outcome {
        match input {
            Input::Snapshot(rows) => self.merge_snapshot(rows),
            Input::Change(change) => self.merge_change(change),
        }
    }

    fn merge_snapshot(&mut self, rows: Vec<Request>) -> Outcome {
        let mut seen = HashSet::with_capacity(rows.len());
        let mut rows: Vec<Request> = rows
            .into_iter()
            .filter(|row| {
                row.status.is_open()
                    && !self.pending.contains(&row.id)
                    && seen.insert(row.id.clone())
            })
            .collect();
        rows.sort_by(display_order);

        let outcome = if self.boot {
            // Everything already waiting when the dashboard opens is
            // accounted for silently.
            self.boot = false;
            self.observed.extend(rows.iter().map(|row| row.id.clone()));
            Outcome::default()
        } else {
            let mut arrived: Vec<&Request> = rows
                .iter()
                .filter(|row| !self.observed.contains(&row.id))
                .collect();
            arrived.reverse();
            let arrived = arrived.into_iter().map(|row| row.id.clone()).collect();
            self.record_arrivals(arrived)
        };

        self.visible = rows;
        outcome
    }

    fn merge_change(&mut self, change: Change) -> Outcome {
        let Change { op, row } = change;

        if !row.status.is_open() {
            self.observed.insert(row.id.clone());
            self.remove(&row.id);
            return Outcome::default();
        }

        if self.pending.contains(&row.id) {
            return Outcome::default();
        }

        let outcome = if self.boot || self.observed.contains(&row.id) {
            Outcome::default()
        } else {
            if op == ChangeOp::Update {
                tracing::debug!(request_id = %row.id, "Update for an unseen request treated as arrival");
            }
            self.record_arrivals(vec![row.id.clone()])
        };

        self.upsert(row);
        outcome
    }

    fn record_arrivals(&mut self, arrived: Vec<String>) -> Outcome {
        let mut alerts = Vec::new();

        for id in &arrived {
            self.observed.insert(id.clone());

            if self.sound_enabled {
                let delay = self.stagger * alerts.len() as u32;
                alerts.push(ScheduledAlert {
                    request_id: id.clone(),
                    delay,
                });
            }
        }

        Outcome { arrived, alerts }
    }

    fn upsert(&mut self, row: Request) {
        match self.visible.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.visible.push(row),
        }
        self.visible.sort_by(display_order);
    }

    fn remove(&mut self, id: &str) -> Option<Request> {
        let position = self.visible.iter().position(|row| row.id == id)?;
        Some(self.visible.remove(position))
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    /// Optimistically hides a request the staff member just resolved.
    /// Returns the removed row so it can be restored if the call fails.
    /// Until then, snapshots and events that still show it open are ignored.
    pub fn begin_resolve(&mut self, id: &str) -> Option<Request> {
        let row = self.remove(id)?;
        self.observed.insert(row.id.clone());
        self.pending.insert(row.id.clone());
        Some(row)
    }

    /// The server confirmed the resolution.
    pub fn confirm_resolve(&mut self, id: &str) {
        self.pending.remove(id);
        self.remove(id);
    }

    /// Puts back a row whose resolution failed.
    pub fn restore(&mut self, row: Request) {
        self.pending.remove(&row.id);
        if row.status.is_open() {
            self.upsert(row);
        }
    }
}
