//! Signal Source
//!
//! Capability interface over the host's listener registration.
//! `LocalSignalSource` is the in-process implementation: the host bridge
//! (or a test) pushes signals through `dispatch`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::types::{Signal, SignalKind, SignalResponse};
use crate::logic::error::{ProctorError, ProctorResult};

pub type SignalHandler = Arc<dyn Fn(Signal) -> SignalResponse + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

pub trait SignalSource: Send + Sync {
    fn subscribe(&self, kind: SignalKind, handler: SignalHandler) -> ProctorResult<SubscriptionId>;

    fn unsubscribe(&self, id: SubscriptionId);
}

// ============================================================================
// LOCAL SIGNAL SOURCE
// ============================================================================

struct Registration {
    id: SubscriptionId,
    kind: SignalKind,
    handler: SignalHandler,
}

pub struct LocalSignalSource {
    next_id: AtomicU64,
    registrations: RwLock<Vec<Registration>>,
    unavailable: HashSet<SignalKind>,
}

impl LocalSignalSource {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            registrations: RwLock::new(Vec::new()),
            unavailable: HashSet::new(),
        }
    }

    /// Host that cannot offer some kinds (subscribe fails for them)
    pub fn without(kinds: &[SignalKind]) -> Self {
        Self {
            unavailable: kinds.iter().copied().collect(),
            ..Self::new()
        }
    }

    /// Deliver a signal to every handler subscribed to its kind
    pub fn dispatch(&self, signal: Signal) -> SignalResponse {
        let kind = signal.kind();

        // Clone handlers out so a handler may (un)subscribe without deadlock
        let handlers: Vec<SignalHandler> = self
            .registrations
            .read()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| Arc::clone(&r.handler))
            .collect();

        handlers
            .into_iter()
            .fold(SignalResponse::Proceed, |acc, handler| {
                acc.merge(handler(signal.clone()))
            })
    }

    pub fn subscriber_count(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn subscriber_count_for(&self, kind: SignalKind) -> usize {
        self.registrations
            .read()
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }
}

impl Default for LocalSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for LocalSignalSource {
    fn subscribe(&self, kind: SignalKind, handler: SignalHandler) -> ProctorResult<SubscriptionId> {
        if self.unavailable.contains(&kind) {
            return Err(ProctorError::SubscriptionFailed {
                kind,
                reason: "not supported by host".to_string(),
            });
        }

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations.write().push(Registration { id, kind, handler });
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.registrations.write().retain(|r| r.id != id);
    }
}
