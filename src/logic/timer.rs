//! Timer Scheduling
//!
//! Delayed callbacks for the pointer debounce and the warning auto-dismiss.
//! Every scheduled task is identified by a `TimerToken`; cancel by token.
//! A cancelled task may still run if it had already started, so timer
//! bodies must compare their token against the current pending state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::error::{ProctorError, ProctorResult};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Allocate a process-wide unique token
    pub fn next() -> Self {
        TimerToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`, unless cancelled first
    fn schedule(&self, token: TimerToken, delay: Duration, task: TimerTask);

    fn cancel(&self, token: TimerToken);

    fn cancel_all(&self);

    /// Number of tasks scheduled and not yet fired or cancelled
    fn pending(&self) -> usize;
}

// ============================================================================
// TOKIO SCHEDULER
// ============================================================================

pub struct TokioScheduler {
    handle: Handle,
    tasks: Arc<Mutex<HashMap<TimerToken, JoinHandle<()>>>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Bind to the runtime of the calling context
    pub fn current() -> ProctorResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| ProctorError::RuntimeUnavailable)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, token: TimerToken, delay: Duration, task: TimerTask) {
        // Deadline is fixed now, not when the task is first polled
        let deadline = tokio::time::Instant::now() + delay;
        let tasks = Arc::clone(&self.tasks);

        // Hold the map lock across spawn so the task cannot remove itself
        // before it has been inserted.
        let mut guard = self.tasks.lock();
        let join = self.handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tasks.lock().remove(&token);
            task();
        });

        if let Some(previous) = guard.insert(token, join) {
            previous.abort();
        }
    }

    fn cancel(&self, token: TimerToken) {
        if let Some(join) = self.tasks.lock().remove(&token) {
            join.abort();
            log::trace!("Cancelled {}", token);
        }
    }

    fn cancel_all(&self) {
        let mut tasks = self.tasks.lock();
        for (_, join) in tasks.drain() {
            join.abort();
        }
    }

    fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
