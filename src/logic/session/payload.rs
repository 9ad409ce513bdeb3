//! Submission Payload
//!
//! Ledger snapshot attached verbatim to the answer-submission request
//! under `proctoring_data`. Downstream consumers treat it as opaque
//! telemetry; the digest only detects accidental corruption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::constants::PROCTORING_DATA_FIELD;
use crate::logic::error::{ProctorError, ProctorResult};
use crate::logic::integrity::raw_suspicion;
use crate::logic::ledger::{CategoryCounts, SuspicionEvent, SuspicionLedger};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProctoringData {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub counts: CategoryCounts,
    /// Raw suspicion (Σ count × weight), uncapped
    pub suspicious_score: u32,
    /// Seconds spent on other tabs
    pub time_away: u64,
    /// Chronological event log
    pub warnings: Vec<SuspicionEvent>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_activity: DateTime<Utc>,
    /// SHA-256 (hex) over session id, counters, away-time and event log
    pub digest: String,
}

/// Fields covered by the digest
#[derive(Serialize)]
struct DigestInput<'a> {
    session_id: &'a Uuid,
    counts: &'a CategoryCounts,
    time_away: u64,
    warnings: &'a [SuspicionEvent],
}

fn compute_digest(
    session_id: &Uuid,
    counts: &CategoryCounts,
    time_away: u64,
    warnings: &[SuspicionEvent],
) -> ProctorResult<String> {
    let input = DigestInput {
        session_id,
        counts,
        time_away,
        warnings,
    };
    let bytes = serde_json::to_vec(&input)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

impl ProctoringData {
    pub fn from_ledger(ledger: &SuspicionLedger) -> ProctorResult<Self> {
        let session_id = ledger.session_id();
        let counts = *ledger.counts();
        let warnings = ledger.events().to_vec();
        let digest = compute_digest(&session_id, &counts, ledger.time_away_secs(), &warnings)?;

        Ok(Self {
            session_id,
            counts,
            suspicious_score: raw_suspicion(&counts),
            time_away: ledger.time_away_secs(),
            warnings,
            last_activity: ledger.last_activity(),
            digest,
        })
    }

    /// Recompute the digest and compare; also checks counters against the log
    pub fn verify_digest(&self) -> bool {
        if CategoryCounts::from_events(&self.warnings) != self.counts {
            return false;
        }
        match compute_digest(&self.session_id, &self.counts, self.time_away, &self.warnings) {
            Ok(digest) => digest == self.digest,
            Err(e) => {
                log::warn!("Digest recompute failed: {}", e);
                false
            }
        }
    }

    pub fn to_json(&self) -> ProctorResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Insert under `proctoring_data` in an outgoing JSON request body
    pub fn attach_to(&self, request: &mut serde_json::Value) -> ProctorResult<()> {
        let value = self.to_json()?;
        let body = request.as_object_mut().ok_or(ProctorError::InvalidSubmission)?;
        body.insert(PROCTORING_DATA_FIELD.to_string(), value);
        Ok(())
    }

    /// Read back from a stored request body, if present
    pub fn extract_from(request: &serde_json::Value) -> ProctorResult<Option<Self>> {
        match request.get(PROCTORING_DATA_FIELD) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }
}
