//! Signal Types
//!
//! Raw host notifications, before any classification.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

/// Subscription channels a host environment can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Document hidden / visible
    Visibility,
    /// Pointer leaving / entering the viewport
    Pointer,
    /// Copy and paste
    Clipboard,
    /// Window blur
    Focus,
    /// Right-click
    ContextMenu,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::Visibility,
        SignalKind::Pointer,
        SignalKind::Clipboard,
        SignalKind::Focus,
        SignalKind::ContextMenu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Visibility => "visibility",
            SignalKind::Pointer => "pointer",
            SignalKind::Clipboard => "clipboard",
            SignalKind::Focus => "focus",
            SignalKind::ContextMenu => "context_menu",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw notification from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    VisibilityChanged { hidden: bool },
    PointerLeft,
    PointerEntered,
    /// `field_value` is the value of the element the copy happened in, if any
    Copied { field_value: Option<String> },
    Pasted,
    FocusLost,
    ContextMenu,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::VisibilityChanged { .. } => SignalKind::Visibility,
            Signal::PointerLeft | Signal::PointerEntered => SignalKind::Pointer,
            Signal::Copied { .. } | Signal::Pasted => SignalKind::Clipboard,
            Signal::FocusLost => SignalKind::Focus,
            Signal::ContextMenu => SignalKind::ContextMenu,
        }
    }
}

/// What the host should do with its native default behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalResponse {
    #[default]
    Proceed,
    PreventDefault,
}

impl SignalResponse {
    /// Any handler asking to prevent wins
    pub fn merge(self, other: SignalResponse) -> SignalResponse {
        if self == SignalResponse::PreventDefault || other == SignalResponse::PreventDefault {
            SignalResponse::PreventDefault
        } else {
            SignalResponse::Proceed
        }
    }
}
