//! Signals Module
//!
//! Abstract subscription interface over the host environment
//! (visibility, pointer, clipboard, focus, context menu).
//!
//! ## Structure
//! - `types`: `Signal`, `SignalKind`, `SignalResponse`
//! - `source`: `SignalSource` trait + `LocalSignalSource`

pub mod types;
pub mod source;

pub use types::{Signal, SignalKind, SignalResponse};
pub use source::{LocalSignalSource, SignalHandler, SignalSource, SubscriptionId};
