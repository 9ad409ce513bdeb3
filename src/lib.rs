//! Interview Proctor - Integrity Scoring Engine
//!
//! Observes host signals during a timed interview (tab switches, pointer
//! leaving the viewport, clipboard use, focus loss, right-clicks), keeps a
//! per-session ledger, and derives a 0-100 integrity score with a
//! severity tier. The ledger is attached to the answer submission as
//! `proctoring_data`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use interview_proctor::{LocalSignalSource, Proctor, ProctorConfig, Signal};
//!
//! # async fn demo() -> interview_proctor::ProctorResult<()> {
//! let source = Arc::new(LocalSignalSource::new());
//! let proctor = Proctor::builder(source.clone())
//!     .config(ProctorConfig::from_env())
//!     .build()?;
//! proctor.activate();
//!
//! source.dispatch(Signal::Pasted);
//! println!("{}", proctor.integrity_score());
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::ProctorConfig;
pub use logic::error::{ProctorError, ProctorResult};
pub use logic::events::{names as event_names, ProctorListener};
pub use logic::integrity::{IntegrityAssessment, IntegrityLevel, SeverityTier};
pub use logic::ledger::{CategoryCounts, SuspicionCategory, SuspicionEvent, SuspicionLedger};
pub use logic::proctor::{Proctor, ProctorBuilder};
pub use logic::session::{IntegrityReport, ProctoringData};
pub use logic::signals::{LocalSignalSource, Signal, SignalKind, SignalResponse, SignalSource};
pub use logic::warning::WarningState;

/// Initialize `env_logger` with an `info` default. Safe to call twice.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    log::debug!("{} v{} logging ready", constants::ENGINE_NAME, constants::ENGINE_VERSION);
}
