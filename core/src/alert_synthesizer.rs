//! Alert synthesizer.
//!
//! Alerts are drawn independently of the transaction stream. Each one
//! carries a freshly drawn transaction id that need not exist in the
//! live transaction set.

use crate::{
    model::{Alert, AlertStatus, AlertType, RiskLevel},
    reference_data::ReferenceData,
    rng::SynthRng,
    synthesizer::Synthesizer,
    transaction_synthesizer::transaction_id,
};
use chrono::{DateTime, Duration, Utc};

// ── Constants ────────────────────────────────────────────────────────────────

pub const ALERT_BATCH_SIZE: usize = 12;

const LOOKBACK_MS: f64 = 6.0 * 60.0 * 60.0 * 1000.0;
const NEW_STATUS_PROBABILITY: f64 = 0.4;
const ASSIGNED_PROBABILITY: f64 = 0.5;
const ALERT_DESCRIPTION: &str =
    "Automated ML model flagged this transaction for manual review based on risk patterns.";

// ── Synthesizer ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct AlertSynthesizer;

impl AlertSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Always exactly ALERT_BATCH_SIZE alerts, in draw order.
    pub fn synthesize_alerts(&self, now: DateTime<Utc>, rng: &mut SynthRng) -> Vec<Alert> {
        (0..ALERT_BATCH_SIZE).map(|_| self.synthesize_one(now, rng)).collect()
    }

    fn synthesize_one(&self, now: DateTime<Utc>, rng: &mut SynthRng) -> Alert {
        let id = format!("ALR{}", rng.base36_token(9).to_uppercase());
        let transaction_id = transaction_id(rng);
        let alert_type = *rng.pick(&AlertType::ALL);
        let severity = *rng.pick(&RiskLevel::ALL);
        // The title token is drawn separately from `alert_type`.
        let title_type = *rng.pick(&AlertType::ALL);
        let offset_ms = (rng.next_f64() * LOOKBACK_MS) as i64;
        let status = if rng.chance(NEW_STATUS_PROBABILITY) {
            AlertStatus::New
        } else {
            AlertStatus::Investigating
        };
        let assigned_to = rng
            .chance(ASSIGNED_PROBABILITY)
            .then(|| ReferenceData::alert_assignee().to_string());

        Alert {
            id,
            transaction_id,
            alert_type,
            severity,
            title: format!("Suspicious {} activity detected", title_type.as_str()),
            description: ALERT_DESCRIPTION.to_string(),
            timestamp: now - Duration::milliseconds(offset_ms),
            status,
            assigned_to,
        }
    }
}

impl Synthesizer for AlertSynthesizer {
    type Output = Vec<Alert>;

    fn name(&self) -> &'static str {
        "alert"
    }

    fn synthesize(&self, now: DateTime<Utc>, rng: &mut SynthRng) -> Vec<Alert> {
        self.synthesize_alerts(now, rng)
    }
}
