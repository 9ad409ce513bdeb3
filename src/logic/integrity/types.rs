//! Integrity Types

use serde::{Deserialize, Serialize};

use crate::logic::ledger::SuspicionCategory;

// ============================================================================
// SEVERITY TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    Excellent,
    Good,
    Fair,
    Poor,
    Suspicious,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 5] = [
        SeverityTier::Excellent,
        SeverityTier::Good,
        SeverityTier::Fair,
        SeverityTier::Poor,
        SeverityTier::Suspicious,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Excellent => "Excellent",
            SeverityTier::Good => "Good",
            SeverityTier::Fair => "Fair",
            SeverityTier::Poor => "Poor",
            SeverityTier::Suspicious => "Suspicious",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::Excellent => "green",
            SeverityTier::Good => "blue",
            SeverityTier::Fair => "yellow",
            SeverityTier::Poor => "orange",
            SeverityTier::Suspicious => "red",
        }
    }

    /// Explanation shown under the result badge
    pub fn description(&self) -> &'static str {
        match self {
            SeverityTier::Excellent => {
                "Excellent integrity! No suspicious activity detected during the interview."
            }
            SeverityTier::Good => "Good integrity with minimal suspicious activity.",
            SeverityTier::Fair => "Fair integrity. Some suspicious activity was detected.",
            SeverityTier::Poor => "Poor integrity. Multiple suspicious activities detected.",
            SeverityTier::Suspicious => {
                "Suspicious activity detected. Interview integrity is questionable."
            }
        }
    }

    pub fn level(&self) -> IntegrityLevel {
        IntegrityLevel {
            label: self.label().to_string(),
            color: self.color().to_string(),
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// `{label, colorTag}` pair consumed by the interview UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityLevel {
    pub label: String,
    pub color: String,
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContribution {
    pub category: SuspicionCategory,
    pub count: u32,
    pub weight: u32,
    pub points: u32,
}

/// How the score was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityAssessment {
    pub contributions: Vec<CategoryContribution>,
    pub raw_suspicion: u32,
    /// `min(raw_suspicion, 100)`
    pub penalty: u32,
    pub integrity_score: u32,
    pub tier: SeverityTier,
}
