//! Risk classification — composite score, tier, workflow status and
//! explanations.
//!
//! Everything here is a pure function of the feature vector except the
//! status coin flip, which takes the caller's RNG.
//!
//! RULE: the tier thresholds were tuned against these exact weights.
//! Changing a weight means re-deriving every threshold below.

use crate::{
    model::{ExplanationCategory, RiskExplanation, RiskLevel, TransactionFeatures, TransactionStatus},
    rng::SynthRng,
};

// ── Composite weights (sum to 1.0) ──────────────────────────────────────────

pub const VELOCITY_WEIGHT: f64 = 0.25;
pub const AMOUNT_WEIGHT: f64 = 0.20;
pub const TIME_WEIGHT: f64 = 0.15;
pub const LOCATION_WEIGHT: f64 = 0.15;
pub const NETWORK_WEIGHT: f64 = 0.15;
pub const BEHAVIOR_WEIGHT: f64 = 0.10;

// ── Tier thresholds (exclusive lower bounds) ────────────────────────────────

pub const CRITICAL_THRESHOLD: f64 = 0.8;
pub const HIGH_THRESHOLD: f64 = 0.6;
pub const MEDIUM_THRESHOLD: f64 = 0.4;

// ── Status branch probabilities ─────────────────────────────────────────────

const CRITICAL_BLOCK_PROBABILITY: f64 = 0.5;
const HIGH_FLAG_PROBABILITY: f64 = 0.7;
const MEDIUM_FLAG_PROBABILITY: f64 = 0.3;

// ── Explanation thresholds ──────────────────────────────────────────────────

const VELOCITY_EXPLAIN_THRESHOLD: f64 = 0.7;
const AMOUNT_EXPLAIN_THRESHOLD: f64 = 0.6;
const LOCATION_EXPLAIN_THRESHOLD: f64 = 0.5;
const NETWORK_EXPLAIN_THRESHOLD: f64 = 0.4;

/// Weighted sum of the six scored sub-scores. Frequency is not included.
pub fn composite_score(features: &TransactionFeatures) -> f64 {
    features.velocity_score * VELOCITY_WEIGHT
        + features.amount_anomaly * AMOUNT_WEIGHT
        + features.time_anomaly * TIME_WEIGHT
        + features.location_anomaly * LOCATION_WEIGHT
        + features.network_risk * NETWORK_WEIGHT
        + features.behavior_score * BEHAVIOR_WEIGHT
}

/// Map an un-rounded composite score to its tier. First match wins.
pub fn risk_level_for(score: f64) -> RiskLevel {
    if score > CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score > HIGH_THRESHOLD {
        RiskLevel::High
    } else if score > MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Initial workflow status for a tier, given a roll in [0, 1).
pub fn status_for(level: RiskLevel, roll: f64) -> TransactionStatus {
    match level {
        RiskLevel::Critical if roll < CRITICAL_BLOCK_PROBABILITY => TransactionStatus::Blocked,
        RiskLevel::Critical => TransactionStatus::Investigating,
        RiskLevel::High if roll < HIGH_FLAG_PROBABILITY => TransactionStatus::Flagged,
        RiskLevel::High => TransactionStatus::Investigating,
        RiskLevel::Medium if roll < MEDIUM_FLAG_PROBABILITY => TransactionStatus::Flagged,
        RiskLevel::Medium => TransactionStatus::Pending,
        RiskLevel::Low => TransactionStatus::Approved,
    }
}

/// Tier and status for a score. Low-tier scores never consume a roll.
pub fn classify(score: f64, rng: &mut SynthRng) -> (RiskLevel, TransactionStatus) {
    let level = risk_level_for(score);
    let status = match level {
        RiskLevel::Low => TransactionStatus::Approved,
        _ => status_for(level, rng.next_f64()),
    };
    (level, status)
}

/// Explanation entries for every sub-score above its threshold,
/// in fixed order: velocity, amount, location, network.
pub fn explain(features: &TransactionFeatures) -> Vec<RiskExplanation> {
    let checks = [
        (
            features.velocity_score,
            VELOCITY_EXPLAIN_THRESHOLD,
            "Transaction Velocity",
            "High frequency of transactions in short time period",
            ExplanationCategory::Velocity,
        ),
        (
            features.amount_anomaly,
            AMOUNT_EXPLAIN_THRESHOLD,
            "Amount Anomaly",
            "Transaction amount significantly higher than usual pattern",
            ExplanationCategory::Amount,
        ),
        (
            features.location_anomaly,
            LOCATION_EXPLAIN_THRESHOLD,
            "Location Risk",
            "Transaction from high-risk jurisdiction",
            ExplanationCategory::Location,
        ),
        (
            features.network_risk,
            NETWORK_EXPLAIN_THRESHOLD,
            "Network Analysis",
            "Connected to accounts with suspicious activity",
            ExplanationCategory::Network,
        ),
    ];

    checks
        .into_iter()
        .filter(|(value, threshold, ..)| value > threshold)
        .map(|(value, _, feature, description, category)| RiskExplanation {
            feature: feature.to_string(),
            impact: value,
            description: description.to_string(),
            category,
        })
        .collect()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
