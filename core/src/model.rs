//! Domain records: transactions, explanations, alerts and metrics.
//!
//! Field names serialize in camelCase so the JSON shape matches what
//! the dashboard front end consumes.

use crate::types::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Transaction ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id:           EntityId,
    pub timestamp:    DateTime<Utc>,
    pub amount:       f64,
    pub currency:     Currency,
    pub from_account: String,
    pub to_account:   String,
    pub description:  String,
    pub risk_score:   f64,
    pub risk_level:   RiskLevel,
    pub status:       TransactionStatus,
    pub features:     TransactionFeatures,
    pub explanations: Vec<RiskExplanation>,
    pub metadata:     TransactionMetadata,
}

impl Transaction {
    /// High and critical transactions raise a notification on arrival.
    pub fn is_high_risk(&self) -> bool {
        self.risk_level >= RiskLevel::High
    }

    /// Flagged or under investigation: counted in the review queue.
    pub fn awaits_review(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Flagged | TransactionStatus::Investigating
        )
    }
}

/// The seven sub-scores behind a composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFeatures {
    pub velocity_score:   f64,
    pub amount_anomaly:   f64,
    pub time_anomaly:     f64,
    pub location_anomaly: f64,
    /// Drawn and reported, but not part of the composite.
    pub frequency_score:  f64,
    pub network_risk:     f64,
    pub behavior_score:   f64,
}

impl TransactionFeatures {
    /// Every sub-score rounded to three decimals.
    pub fn rounded(&self) -> Self {
        use crate::risk::round3;
        Self {
            velocity_score:   round3(self.velocity_score),
            amount_anomaly:   round3(self.amount_anomaly),
            time_anomaly:     round3(self.time_anomaly),
            location_anomaly: round3(self.location_anomaly),
            frequency_score:  round3(self.frequency_score),
            network_risk:     round3(self.network_risk),
            behavior_score:   round3(self.behavior_score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location:           Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_category:  Option<String>,
    pub time_of_day:        TimeOfDay,
    pub day_of_week:        String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskExplanation {
    pub feature:     String,
    pub impact:      f64,
    pub description: String,
    pub category:    ExplanationCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationCategory {
    Velocity,
    Amount,
    Behavior,
    Network,
    Temporal,
    Location,
}

/// Ordered: Low < Medium < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low      => "low",
            Self::Medium   => "medium",
            Self::High     => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Flagged,
    Investigating,
    Blocked,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 5] = [
        Self::Pending,
        Self::Approved,
        Self::Flagged,
        Self::Investigating,
        Self::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending       => "pending",
            Self::Approved      => "approved",
            Self::Flagged       => "flagged",
            Self::Investigating => "investigating",
            Self::Blocked       => "blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Eur => "€",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Morning before noon, afternoon before 18:00, evening otherwise.
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 18 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }
}

// ── Alert ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id:             EntityId,
    /// By value only. Not guaranteed to exist in the live transaction set.
    pub transaction_id: EntityId,
    #[serde(rename = "type")]
    pub alert_type:     AlertType,
    pub severity:       RiskLevel,
    pub title:          String,
    pub description:    String,
    pub timestamp:      DateTime<Utc>,
    pub status:         AlertStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to:    Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Fraud,
    Aml,
    Velocity,
    Behavioral,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [Self::Fraud, Self::Aml, Self::Velocity, Self::Behavioral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fraud      => "fraud",
            Self::Aml        => "aml",
            Self::Velocity   => "velocity",
            Self::Behavioral => "behavioral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    New,
    Investigating,
    Resolved,
    FalsePositive,
}

// ── Metrics ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_transactions:   u64,
    pub flagged_transactions: u64,
    pub false_positive_rate:  f64,
    pub average_risk_score:   f64,
    pub alerts_today:         u64,
    pub blocked_amount:       f64,
    pub review_backlog:       u64,
    /// Average human review time, in minutes.
    pub response_time:        f64,
}
