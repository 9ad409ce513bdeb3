//! Central Configuration Constants
//!
//! Single source of truth for all proctoring defaults.
//! To change a default timing, only edit this file.

/// Pointer must stay outside the viewport this long before it counts (ms)
pub const DEFAULT_POINTER_DEBOUNCE_MS: u64 = 1_000;

/// Warning banner auto-hides after this delay (ms)
pub const DEFAULT_WARNING_DISMISS_MS: u64 = 4_000;

/// Max characters of copied text kept for audit display
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 50;

/// Perfect integrity score
pub const MAX_INTEGRITY_SCORE: u32 = 100;

/// Field name of the ledger snapshot inside the answer-submission request
pub const PROCTORING_DATA_FIELD: &str = "proctoring_data";

/// Engine version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const ENGINE_NAME: &str = "Interview Proctor";

// ============================================
// Environment variable names
// ============================================

pub const ENV_POINTER_DEBOUNCE_MS: &str = "PROCTOR_POINTER_DEBOUNCE_MS";
pub const ENV_WARNING_DISMISS_MS: &str = "PROCTOR_WARNING_DISMISS_MS";
pub const ENV_SNIPPET_MAX_CHARS: &str = "PROCTOR_SNIPPET_MAX_CHARS";
pub const ENV_BLOCK_CONTEXT_MENU: &str = "PROCTOR_BLOCK_CONTEXT_MENU";
pub const ENV_WARN_ON_CONTEXT_MENU: &str = "PROCTOR_WARN_ON_CONTEXT_MENU";
