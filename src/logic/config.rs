//! Proctor Configuration
//!
//! Timing and behavior knobs for the proctoring engine.
//! Scoring weights are NOT here - they are fixed constants in `integrity::rules`.

use serde::{Deserialize, Serialize};

use super::error::{ProctorError, ProctorResult};
use crate::constants::{
    DEFAULT_POINTER_DEBOUNCE_MS, DEFAULT_SNIPPET_MAX_CHARS, DEFAULT_WARNING_DISMISS_MS,
    ENV_BLOCK_CONTEXT_MENU, ENV_POINTER_DEBOUNCE_MS, ENV_SNIPPET_MAX_CHARS,
    ENV_WARNING_DISMISS_MS, ENV_WARN_ON_CONTEXT_MENU,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProctorConfig {
    /// Pointer must stay out this long to count as PointerLeave (ms)
    pub pointer_debounce_ms: u64,
    /// Warning auto-dismiss delay (ms)
    pub warning_dismiss_ms: u64,
    /// Copied text kept for audit, in characters
    pub snippet_max_chars: usize,
    /// Ask the host to suppress the native context menu
    pub block_context_menu: bool,
    /// Show a warning banner for right-clicks
    pub warn_on_context_menu: bool,
}

impl Default for ProctorConfig {
    fn default() -> Self {
        Self {
            pointer_debounce_ms: DEFAULT_POINTER_DEBOUNCE_MS,
            warning_dismiss_ms: DEFAULT_WARNING_DISMISS_MS,
            snippet_max_chars: DEFAULT_SNIPPET_MAX_CHARS,
            block_context_menu: false,
            warn_on_context_menu: true,
        }
    }
}

impl ProctorConfig {
    /// Strict mode - native context menu is suppressed
    pub fn strict() -> Self {
        Self {
            block_context_menu: true,
            ..Default::default()
        }
    }

    /// Lenient mode - right-clicks are recorded without a banner
    pub fn lenient() -> Self {
        Self {
            warn_on_context_menu: false,
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults
    /// for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            pointer_debounce_ms: lookup(ENV_POINTER_DEBOUNCE_MS)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.pointer_debounce_ms),

            warning_dismiss_ms: lookup(ENV_WARNING_DISMISS_MS)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.warning_dismiss_ms),

            snippet_max_chars: lookup(ENV_SNIPPET_MAX_CHARS)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.snippet_max_chars),

            block_context_menu: lookup(ENV_BLOCK_CONTEXT_MENU)
                .map(|s| parse_flag(&s))
                .unwrap_or(defaults.block_context_menu),

            warn_on_context_menu: lookup(ENV_WARN_ON_CONTEXT_MENU)
                .map(|s| parse_flag(&s))
                .unwrap_or(defaults.warn_on_context_menu),
        }
    }

    pub fn validate(&self) -> ProctorResult<()> {
        if self.pointer_debounce_ms == 0 {
            return Err(ProctorError::InvalidConfig(
                "pointer_debounce_ms must be greater than zero".to_string(),
            ));
        }
        if self.warning_dismiss_ms == 0 {
            return Err(ProctorError::InvalidConfig(
                "warning_dismiss_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && value != "no" && value != "off"
}
