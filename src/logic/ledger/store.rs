//! Ledger Store
//!
//! Copy-on-write holder of the current ledger. Readers get an immutable
//! `Arc` snapshot; writers derive the next ledger from the latest
//! committed one while holding the write lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::ledger::SuspicionLedger;
use super::types::SuspicionEvent;

pub struct LedgerStore {
    current: RwLock<Arc<SuspicionLedger>>,
}

impl LedgerStore {
    pub fn new(ledger: SuspicionLedger) -> Self {
        Self {
            current: RwLock::new(Arc::new(ledger)),
        }
    }

    pub fn snapshot(&self) -> Arc<SuspicionLedger> {
        Arc::clone(&self.current.read())
    }

    /// Read-current, compute-next, replace. Snapshots already handed out
    /// are never touched.
    pub fn append(&self, event: SuspicionEvent) -> Arc<SuspicionLedger> {
        let mut guard = self.current.write();
        Arc::make_mut(&mut guard).append(event);
        Arc::clone(&guard)
    }

    pub fn reset(&self, at: DateTime<Utc>) -> Arc<SuspicionLedger> {
        let mut guard = self.current.write();
        *guard = Arc::new(SuspicionLedger::new(at));
        Arc::clone(&guard)
    }
}
