//! Suspicion Ledger
//!
//! Aggregate state of one interview session. Only two mutations exist:
//! `append` and `reset`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::types::{CategoryCounts, SuspicionEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct SuspicionLedger {
    session_id: Uuid,
    counts: CategoryCounts,
    time_away_secs: u64,
    events: Vec<SuspicionEvent>,
    last_activity: DateTime<Utc>,
}

impl SuspicionLedger {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            counts: CategoryCounts::default(),
            time_away_secs: 0,
            events: Vec::new(),
            last_activity: started_at,
        }
    }

    /// Record one event: log, counter, away-time and last activity together
    pub fn append(&mut self, event: SuspicionEvent) {
        self.counts.increment(event.category);
        if let Some(secs) = event.duration_secs {
            self.time_away_secs = self.time_away_secs.saturating_add(secs);
        }
        if event.timestamp > self.last_activity {
            self.last_activity = event.timestamp;
        }
        self.events.push(event);
    }

    /// Replace with a fresh zero-state for a new session
    pub fn reset(&mut self, at: DateTime<Utc>) {
        *self = Self::new(at);
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    pub fn time_away_secs(&self) -> u64 {
        self.time_away_secs
    }

    pub fn events(&self) -> &[SuspicionEvent] {
        &self.events
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every counter must equal the number of its events in the log
    pub fn is_consistent(&self) -> bool {
        CategoryCounts::from_events(&self.events) == self.counts
    }
}
