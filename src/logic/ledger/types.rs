//! Ledger Types
//!
//! Suspicion categories, classified events and per-category counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// SUSPICION CATEGORY
// ============================================================================

/// Monitored behavior categories.
///
/// Serialized names follow the telemetry the results page already reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuspicionCategory {
    #[serde(rename = "tab_switch")]
    TabSwitch,
    #[serde(rename = "mouse_leave")]
    PointerLeave,
    #[serde(rename = "copy")]
    Copy,
    #[serde(rename = "paste")]
    Paste,
    #[serde(rename = "focus_loss")]
    FocusLoss,
    #[serde(rename = "right_click")]
    ContextMenu,
}

impl SuspicionCategory {
    pub const ALL: [SuspicionCategory; 6] = [
        SuspicionCategory::TabSwitch,
        SuspicionCategory::PointerLeave,
        SuspicionCategory::Copy,
        SuspicionCategory::Paste,
        SuspicionCategory::FocusLoss,
        SuspicionCategory::ContextMenu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuspicionCategory::TabSwitch => "tab_switch",
            SuspicionCategory::PointerLeave => "mouse_leave",
            SuspicionCategory::Copy => "copy",
            SuspicionCategory::Paste => "paste",
            SuspicionCategory::FocusLoss => "focus_loss",
            SuspicionCategory::ContextMenu => "right_click",
        }
    }

    /// Label used in activity summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            SuspicionCategory::TabSwitch => "Tab Switches",
            SuspicionCategory::PointerLeave => "Mouse Leaves",
            SuspicionCategory::Copy => "Copy Events",
            SuspicionCategory::Paste => "Paste Events",
            SuspicionCategory::FocusLoss => "Focus Loss",
            SuspicionCategory::ContextMenu => "Right Clicks",
        }
    }

    /// Banner text shown when an event of this category is recorded
    pub fn warning_message(&self, duration_secs: Option<u64>) -> String {
        match self {
            SuspicionCategory::TabSwitch => {
                format!("Tab switching detected! ({}s away)", duration_secs.unwrap_or(0))
            }
            SuspicionCategory::PointerLeave => "Mouse left the interview window".to_string(),
            SuspicionCategory::Copy => "Copy event detected".to_string(),
            SuspicionCategory::Paste => "Paste event detected".to_string(),
            SuspicionCategory::FocusLoss => "Window focus lost".to_string(),
            SuspicionCategory::ContextMenu => "Right-click detected".to_string(),
        }
    }
}

impl std::fmt::Display for SuspicionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SUSPICION EVENT
// ============================================================================

/// One classified occurrence. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionEvent {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub category: SuspicionCategory,
    pub timestamp: DateTime<Utc>,
    /// Seconds away (TabSwitch only)
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    /// Start of the copied text, audit display only
    #[serde(rename = "text", default, skip_serializing_if = "Option::is_none")]
    pub context_snippet: Option<String>,
}

impl SuspicionEvent {
    pub(crate) fn new(category: SuspicionCategory, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            timestamp,
            duration_secs: None,
            context_snippet: None,
        }
    }

    pub(crate) fn with_duration(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub(crate) fn with_snippet(mut self, snippet: Option<String>) -> Self {
        self.context_snippet = snippet;
        self
    }

    pub fn warning_message(&self) -> String {
        self.category.warning_message(self.duration_secs)
    }
}

// ============================================================================
// CATEGORY COUNTS
// ============================================================================

/// Per-category counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub tab_switches: u32,
    pub mouse_leaves: u32,
    pub copy_events: u32,
    pub paste_events: u32,
    pub focus_loss: u32,
    pub right_clicks: u32,
}

impl CategoryCounts {
    pub fn get(&self, category: SuspicionCategory) -> u32 {
        match category {
            SuspicionCategory::TabSwitch => self.tab_switches,
            SuspicionCategory::PointerLeave => self.mouse_leaves,
            SuspicionCategory::Copy => self.copy_events,
            SuspicionCategory::Paste => self.paste_events,
            SuspicionCategory::FocusLoss => self.focus_loss,
            SuspicionCategory::ContextMenu => self.right_clicks,
        }
    }

    fn slot_mut(&mut self, category: SuspicionCategory) -> &mut u32 {
        match category {
            SuspicionCategory::TabSwitch => &mut self.tab_switches,
            SuspicionCategory::PointerLeave => &mut self.mouse_leaves,
            SuspicionCategory::Copy => &mut self.copy_events,
            SuspicionCategory::Paste => &mut self.paste_events,
            SuspicionCategory::FocusLoss => &mut self.focus_loss,
            SuspicionCategory::ContextMenu => &mut self.right_clicks,
        }
    }

    pub(crate) fn increment(&mut self, category: SuspicionCategory) {
        let slot = self.slot_mut(category);
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        SuspicionCategory::ALL
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(self.get(*c)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SuspicionCategory, u32)> + '_ {
        SuspicionCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Recount from an event log
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a SuspicionEvent>,
    {
        let mut counts = Self::default();
        for event in events {
            counts.increment(event.category);
        }
        counts
    }
}
