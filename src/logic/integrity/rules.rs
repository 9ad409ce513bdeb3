//! Integrity Scoring Rules
//!
//! Weights and tier thresholds.
//! KHÔNG chứa logic tính điểm - chỉ constants.

use crate::logic::ledger::SuspicionCategory;

// ============================================================================
// WEIGHTS (points of suspicion per event)
// ============================================================================

pub const TAB_SWITCH_WEIGHT: u32 = 10;
pub const POINTER_LEAVE_WEIGHT: u32 = 5;
pub const COPY_WEIGHT: u32 = 3;
pub const PASTE_WEIGHT: u32 = 8;
pub const FOCUS_LOSS_WEIGHT: u32 = 2;
pub const CONTEXT_MENU_WEIGHT: u32 = 1;

/// Raw suspicion above this no longer lowers the score
pub const MAX_PENALTY: u32 = 100;

// ============================================================================
// TIER THRESHOLDS (inclusive lower bounds)
// ============================================================================

pub const EXCELLENT_MIN: u32 = 90;
pub const GOOD_MIN: u32 = 70;
pub const FAIR_MIN: u32 = 50;
pub const POOR_MIN: u32 = 30;

pub fn weight(category: SuspicionCategory) -> u32 {
    match category {
        SuspicionCategory::TabSwitch => TAB_SWITCH_WEIGHT,
        SuspicionCategory::PointerLeave => POINTER_LEAVE_WEIGHT,
        SuspicionCategory::Copy => COPY_WEIGHT,
        SuspicionCategory::Paste => PASTE_WEIGHT,
        SuspicionCategory::FocusLoss => FOCUS_LOSS_WEIGHT,
        SuspicionCategory::ContextMenu => CONTEXT_MENU_WEIGHT,
    }
}
