//! Event Emitter - Proctor Notifications
//!
//! Lets the interview UI re-render when the ledger, the warning banner
//! or the activation state changes. Listeners are called outside the
//! engine lock, so they may read back from the proctor.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

/// Event names
pub mod names {
    pub const EVENT_RECORDED: &str = "proctor:event-recorded";
    pub const WARNING_CHANGED: &str = "proctor:warning";
    pub const LEDGER_RESET: &str = "proctor:reset";
    pub const ACTIVATION_CHANGED: &str = "proctor:activation";
}

pub trait ProctorListener: Send + Sync {
    fn on_event(&self, name: &str, payload: &serde_json::Value);
}

impl<F> ProctorListener for F
where
    F: Fn(&str, &serde_json::Value) + Send + Sync,
{
    fn on_event(&self, name: &str, payload: &serde_json::Value) {
        self(name, payload)
    }
}

/// A notification produced under the engine lock, delivered after it
#[derive(Debug, Clone)]
pub(crate) struct Notification {
    pub name: &'static str,
    pub payload: serde_json::Value,
}

impl Notification {
    pub fn new<S: Serialize>(name: &'static str, payload: &S) -> Option<Self> {
        match serde_json::to_value(payload) {
            Ok(payload) => Some(Self { name, payload }),
            Err(e) => {
                log::error!("Failed to serialize '{}' payload: {}", name, e);
                None
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct Emitter {
    listeners: RwLock<Vec<Arc<dyn ProctorListener>>>,
}

impl Emitter {
    pub fn add(&self, listener: Arc<dyn ProctorListener>) {
        self.listeners.write().push(listener);
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.read().is_empty()
    }

    /// Deliver to all listeners. Silent when nobody listens.
    pub fn deliver(&self, notifications: Vec<Notification>) {
        if notifications.is_empty() {
            return;
        }
        let listeners: Vec<Arc<dyn ProctorListener>> = self.listeners.read().clone();
        for note in &notifications {
            for listener in &listeners {
                listener.on_event(note.name, &note.payload);
            }
        }
    }
}
