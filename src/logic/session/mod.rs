//! Session Module - Submission Boundary
//!
//! Snapshots the ledger into the answer-submission payload and renders
//! stored payloads back into an integrity report.
//!
//! # Components
//! - `payload.rs`: `ProctoringData` (the `proctoring_data` JSON field)
//! - `report.rs`: `IntegrityReport` for the results page

pub mod payload;
pub mod report;


pub use payload::ProctoringData;
pub use report::{ActivityItem, IntegrityReport};

use crate::logic::error::ProctorResult;
use crate::logic::ledger::SuspicionLedger;

/// Attach a snapshot of `ledger` to `request` and return what was attached
pub fn bind_submission(
    ledger: &SuspicionLedger,
    request: &mut serde_json::Value,
) -> ProctorResult<ProctoringData> {
    let data = ProctoringData::from_ledger(ledger)?;
    data.attach_to(request)?;
    log::info!(
        "Proctoring data attached: session={} events={} time_away={}s",
        data.session_id,
        data.warnings.len(),
        data.time_away
    );
    Ok(data)
}
