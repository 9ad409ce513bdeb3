//! Integrity Report
//!
//! Results-page view of a submitted payload. The score is recomputed from
//! the counters; `suspiciousScore` in the payload is informational only.

use serde::{Deserialize, Serialize};

use super::payload::ProctoringData;
use crate::logic::integrity::{assess, IntegrityLevel, SeverityTier};
use crate::logic::ledger::SuspicionCategory;

/// One non-zero line of the activity summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub integrity_score: u32,
    pub tier: SeverityTier,
    pub level: IntegrityLevel,
    pub explanation: String,
    pub activity: Vec<ActivityItem>,
}

impl IntegrityReport {
    pub fn from_payload(data: &ProctoringData) -> Self {
        let assessment = assess(&data.counts);

        // Right-clicks are scored but not listed, matching the results badge
        let mut activity: Vec<ActivityItem> = data
            .counts
            .iter()
            .filter(|(category, count)| *count > 0 && *category != SuspicionCategory::ContextMenu)
            .map(|(category, count)| ActivityItem {
                label: category.display_name().to_string(),
                value: count.to_string(),
            })
            .collect();

        if data.time_away > 0 {
            activity.push(ActivityItem {
                label: "Time Away".to_string(),
                value: format!("{}s", data.time_away),
            });
        }

        Self {
            integrity_score: assessment.integrity_score,
            tier: assessment.tier,
            level: assessment.tier.level(),
            explanation: assessment.tier.description().to_string(),
            activity,
        }
    }

    /// e.g. "Integrity: Good (83%)"
    pub fn badge_label(&self) -> String {
        format!("Integrity: {} ({}%)", self.level.label, self.integrity_score)
    }
}
