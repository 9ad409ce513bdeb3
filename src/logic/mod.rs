//! Logic Module - Proctoring Engine
//!
//! Chứa các thành phần: Classifier, Ledger, Integrity, Warning, Session.
//!
//! ## Layout
//! - `classifier/`, `ledger/`, `integrity/`, `warning` - pure state, no timers
//! - `timer`, `clock`, `signals/` - seams to the host and the runtime
//! - `proctor/` - the runtime that wires everything together

// Ambient
pub mod config;
pub mod error;
pub mod events;

// Seams
pub mod clock;
pub mod signals;
pub mod timer;

// Engines
pub mod classifier;
pub mod integrity;
pub mod ledger;
pub mod warning;

// Boundary
pub mod proctor;
pub mod session;
