//! Debounced Event Classifier
//!
//! Turns raw host signals into `SuspicionEvent`s.
//! CHỈ chứa logic classify - không giữ timers, không đụng ledger.
//! The caller owns scheduling: when a pointer leave is pending, the
//! classifier hands out a `PointerLeaveTicket` and the caller arranges for
//! `on_pointer_timer(token, ..)` to run after `ticket.delay`.
//!
//! Every entry point is a no-op while inactive.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::logic::config::ProctorConfig;
use crate::logic::ledger::{SuspicionCategory, SuspicionEvent};
use crate::logic::timer::TimerToken;


/// A pointer leave waiting out its debounce window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLeave {
    token: TimerToken,
    left_at: DateTime<Utc>,
}

/// Caller must schedule `token` after `delay`, and cancel `superseded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerLeaveTicket {
    pub token: TimerToken,
    pub delay: Duration,
    pub superseded: Option<TimerToken>,
}

/// Result of a pointer re-entering the viewport
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerEnterOutcome {
    /// Pending timer the caller should cancel
    pub cancelled: Option<TimerToken>,
    /// Leave that had already outlasted the window before the timer ran
    pub matured: Option<SuspicionEvent>,
}

#[derive(Debug)]
pub struct DebouncedClassifier {
    active: bool,
    pointer_debounce_ms: u64,
    snippet_max_chars: usize,
    hidden_since: Option<DateTime<Utc>>,
    pending_leave: Option<PendingLeave>,
}

impl DebouncedClassifier {
    /// Starts inactive
    pub fn new(config: &ProctorConfig) -> Self {
        Self {
            active: false,
            pointer_debounce_ms: config.pointer_debounce_ms,
            snippet_max_chars: config.snippet_max_chars,
            hidden_since: None,
            pending_leave: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the activation flag. Returns a pending timer to cancel.
    ///
    /// Deactivating drops the hidden timestamp and any pending leave.
    pub fn set_active(&mut self, active: bool) -> Option<TimerToken> {
        self.active = active;
        if active {
            None
        } else {
            self.clear_pending()
        }
    }

    /// Forget in-flight observations (new session / deactivation)
    pub fn clear_pending(&mut self) -> Option<TimerToken> {
        self.hidden_since = None;
        self.pending_leave.take().map(|p| p.token)
    }

    pub fn has_pending_leave(&self) -> bool {
        self.pending_leave.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden_since.is_some()
    }

    // ========================================================================
    // VISIBILITY
    // ========================================================================

    /// TabSwitch is emitted on the visible edge, carrying the time away
    pub fn on_visibility_change(&mut self, hidden: bool, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        if !self.active {
            return None;
        }

        if hidden {
            // Keep the first hidden timestamp until a visible edge consumes it
            if self.hidden_since.is_none() {
                self.hidden_since = Some(at);
            }
            return None;
        }

        let hidden_at = self.hidden_since.take()?;
        let away_ms = (at - hidden_at).num_milliseconds().max(0) as u64;

        Some(SuspicionEvent::new(SuspicionCategory::TabSwitch, at).with_duration(away_ms / 1000))
    }

    // ========================================================================
    // POINTER (debounced)
    // ========================================================================

    pub fn on_pointer_leave(&mut self, at: DateTime<Utc>) -> Option<PointerLeaveTicket> {
        if !self.active {
            return None;
        }

        let token = TimerToken::next();
        let superseded = self
            .pending_leave
            .replace(PendingLeave { token, left_at: at })
            .map(|p| p.token);

        Some(PointerLeaveTicket {
            token,
            delay: Duration::from_millis(self.pointer_debounce_ms),
            superseded,
        })
    }

    pub fn on_pointer_enter(&mut self, at: DateTime<Utc>) -> PointerEnterOutcome {
        if !self.active {
            return PointerEnterOutcome::default();
        }

        let Some(pending) = self.pending_leave.take() else {
            return PointerEnterOutcome::default();
        };

        let away_ms = (at - pending.left_at).num_milliseconds();
        let matured = if away_ms >= self.pointer_debounce_ms as i64 {
            Some(SuspicionEvent::new(SuspicionCategory::PointerLeave, at))
        } else {
            None
        };

        PointerEnterOutcome {
            cancelled: Some(pending.token),
            matured,
        }
    }

    /// Debounce timer body. Acts only if `token` is still the pending leave.
    pub fn on_pointer_timer(&mut self, token: TimerToken, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        if !self.active {
            return None;
        }

        match self.pending_leave {
            Some(pending) if pending.token == token => {
                self.pending_leave = None;
                Some(SuspicionEvent::new(SuspicionCategory::PointerLeave, at))
            }
            _ => None,
        }
    }

    // ========================================================================
    // IMMEDIATE SIGNALS
    // ========================================================================

    pub fn on_copy(&mut self, field_value: Option<&str>, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        if !self.active {
            return None;
        }

        let snippet = field_value
            .filter(|v| !v.is_empty())
            .map(|v| v.chars().take(self.snippet_max_chars).collect::<String>());

        Some(SuspicionEvent::new(SuspicionCategory::Copy, at).with_snippet(snippet))
    }

    pub fn on_paste(&mut self, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        self.immediate(SuspicionCategory::Paste, at)
    }

    pub fn on_focus_loss(&mut self, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        self.immediate(SuspicionCategory::FocusLoss, at)
    }

    pub fn on_context_menu(&mut self, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        self.immediate(SuspicionCategory::ContextMenu, at)
    }

    fn immediate(&self, category: SuspicionCategory, at: DateTime<Utc>) -> Option<SuspicionEvent> {
        if !self.active {
            return None;
        }
        Some(SuspicionEvent::new(category, at))
    }
}
