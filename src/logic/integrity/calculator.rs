//! Score Calculator
//!
//! Pure functions from counters to score and tier.
//! Deterministic - same counts, same result.

use super::rules::{weight, EXCELLENT_MIN, FAIR_MIN, GOOD_MIN, MAX_PENALTY, POOR_MIN};
use super::types::{CategoryContribution, IntegrityAssessment, SeverityTier};
use crate::constants::MAX_INTEGRITY_SCORE;
use crate::logic::ledger::{CategoryCounts, SuspicionLedger};

/// Σ count × weight over all categories
pub fn raw_suspicion(counts: &CategoryCounts) -> u32 {
    counts
        .iter()
        .fold(0u32, |acc, (category, count)| {
            acc.saturating_add(count.saturating_mul(weight(category)))
        })
}

pub fn score_from_raw(raw: u32) -> u32 {
    MAX_INTEGRITY_SCORE.saturating_sub(raw.min(MAX_PENALTY))
}

pub fn integrity_score(counts: &CategoryCounts) -> u32 {
    score_from_raw(raw_suspicion(counts))
}

pub fn tier_for_score(score: u32) -> SeverityTier {
    if score >= EXCELLENT_MIN {
        SeverityTier::Excellent
    } else if score >= GOOD_MIN {
        SeverityTier::Good
    } else if score >= FAIR_MIN {
        SeverityTier::Fair
    } else if score >= POOR_MIN {
        SeverityTier::Poor
    } else {
        SeverityTier::Suspicious
    }
}

pub fn assess(counts: &CategoryCounts) -> IntegrityAssessment {
    let contributions: Vec<CategoryContribution> = counts
        .iter()
        .map(|(category, count)| {
            let w = weight(category);
            CategoryContribution {
                category,
                count,
                weight: w,
                points: count.saturating_mul(w),
            }
        })
        .collect();

    let raw = raw_suspicion(counts);
    let score = score_from_raw(raw);

    IntegrityAssessment {
        contributions,
        raw_suspicion: raw,
        penalty: raw.min(MAX_PENALTY),
        integrity_score: score,
        tier: tier_for_score(score),
    }
}

pub fn assess_ledger(ledger: &SuspicionLedger) -> IntegrityAssessment {
    assess(ledger.counts())
}
