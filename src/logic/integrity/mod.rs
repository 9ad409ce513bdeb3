//! Integrity Module
//!
//! Folds ledger counters into a 0-100 integrity score and a severity tier.
//!
//! ## Structure
//! - `types`: `SeverityTier`, `IntegrityLevel`, `IntegrityAssessment`
//! - `rules`: Weights and tier thresholds
//! - `calculator`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::integrity::assess;
//!
//! let result = assess(ledger.counts());
//! match result.tier {
//!     SeverityTier::Excellent | SeverityTier::Good => println!("Clean"),
//!     _ => println!("Review"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod calculator;

pub use types::{CategoryContribution, IntegrityAssessment, IntegrityLevel, SeverityTier};

pub use rules::weight;

pub use calculator::{assess, assess_ledger, integrity_score, raw_suspicion, score_from_raw, tier_for_score};
