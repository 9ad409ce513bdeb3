//! Error handling

use thiserror::Error;

use super::signals::SignalKind;

pub type ProctorResult<T> = Result<T, ProctorError>;

#[derive(Debug, Error)]
pub enum ProctorError {
    // Configuration errors
    #[error("Invalid proctor configuration: {0}")]
    InvalidConfig(String),

    // Host environment errors
    #[error("Signal source cannot provide {kind} signals: {reason}")]
    SubscriptionFailed { kind: SignalKind, reason: String },

    #[error("No tokio runtime available for proctor timers")]
    RuntimeUnavailable,

    // Submission errors
    #[error("Submission request must be a JSON object")]
    InvalidSubmission,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
