//! Warning Presenter
//!
//! At most one transient banner. `Hidden -> Visible` on every recorded
//! event; `Visible -> Hidden` on auto-dismiss or explicit dismiss.
//! Last event wins: a new message replaces the old one and restarts the
//! timer. The caller owns the timer, keyed by the returned token.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::timer::TimerToken;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningState {
    pub visible: bool,
    pub message: String,
}

/// Caller must schedule `token` after `delay`, and cancel `superseded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningTicket {
    pub token: TimerToken,
    pub delay: Duration,
    pub superseded: Option<TimerToken>,
}

#[derive(Debug)]
pub struct WarningPresenter {
    state: WarningState,
    dismiss_token: Option<TimerToken>,
    auto_dismiss: Duration,
}

impl WarningPresenter {
    pub fn new(auto_dismiss: Duration) -> Self {
        Self {
            state: WarningState::default(),
            dismiss_token: None,
            auto_dismiss,
        }
    }

    pub fn current(&self) -> &WarningState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn show(&mut self, message: String) -> WarningTicket {
        let token = TimerToken::next();
        let superseded = self.dismiss_token.replace(token);

        self.state = WarningState {
            visible: true,
            message,
        };

        WarningTicket {
            token,
            delay: self.auto_dismiss,
            superseded,
        }
    }

    /// Explicit dismiss. Returns the auto-dismiss timer to cancel.
    /// The message text is kept; only visibility changes.
    pub fn dismiss(&mut self) -> Option<TimerToken> {
        self.state.visible = false;
        self.dismiss_token.take()
    }

    /// Auto-dismiss timer body. Hides only if `token` is still current.
    pub fn on_dismiss_timer(&mut self, token: TimerToken) -> bool {
        if self.dismiss_token != Some(token) {
            return false;
        }
        self.dismiss_token = None;
        self.state.visible = false;
        true
    }

    /// Back to the initial empty state (new session)
    pub fn clear(&mut self) -> Option<TimerToken> {
        self.state = WarningState::default();
        self.dismiss_token.take()
    }
}
