//! Ledger Module - Suspicion Accounting
//!
//! Append-only record of suspicion events for one interview session.
//!
//! # Components
//! - `types.rs`: `SuspicionCategory`, `SuspicionEvent`, `CategoryCounts`
//! - `ledger.rs`: `SuspicionLedger` (append / reset)
//! - `store.rs`: `LedgerStore`, copy-on-write snapshots for readers

pub mod types;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod store;


pub use types::{CategoryCounts, SuspicionCategory, SuspicionEvent};
pub use ledger::SuspicionLedger;
pub use store::LedgerStore;
