//! Transaction synthesizer.
//!
//! Draws one synthetic transaction:
//!   1. Timestamp within the 24 hours before `now`
//!   2. Amount in [1000, 1001000)
//!   3. Seven sub-scores, six of which feed the composite
//!   4. Tier and status from the un-rounded composite
//!   5. Explanations for sub-scores above their thresholds
//!   6. Rounding, currency, accounts and metadata

use crate::{
    model::{Currency, TimeOfDay, Transaction, TransactionFeatures, TransactionMetadata},
    reference_data::ReferenceData,
    risk,
    rng::SynthRng,
    synthesizer::Synthesizer,
};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};

// ── Constants ────────────────────────────────────────────────────────────────

const LOOKBACK_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;
const MIN_AMOUNT: f64 = 1_000.0;
const AMOUNT_SPAN: f64 = 1_000_000.0;

const LOCATION_ANOMALY_CAP: f64 = 0.8;
const NETWORK_RISK_CAP: f64 = 0.6;
const BEHAVIOR_SCORE_CAP: f64 = 0.7;

const USD_SHARE: f64 = 0.6;
const GBP_SHARE: f64 = 0.2;

const ID_TOKEN_LEN: usize = 9;
const DEVICE_TOKEN_LEN: usize = 8;

// ── Synthesizer ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionSynthesizer;

impl TransactionSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// `count` independent transactions, newest first.
    /// Ties keep their draw order.
    pub fn synthesize_many(
        &self,
        count: usize,
        now: DateTime<Utc>,
        rng: &mut SynthRng,
    ) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> =
            (0..count).map(|_| self.synthesize(now, rng)).collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        transactions
    }

    /// Raw sub-scores, before rounding.
    pub fn draw_features(rng: &mut SynthRng) -> TransactionFeatures {
        let velocity_score = rng.next_f64();
        let amount_anomaly = rng.next_f64();
        let time_anomaly = rng.next_f64();
        let location_anomaly = rng.uniform(0.0, LOCATION_ANOMALY_CAP);
        let network_risk = rng.uniform(0.0, NETWORK_RISK_CAP);
        let behavior_score = rng.uniform(0.0, BEHAVIOR_SCORE_CAP);
        let frequency_score = rng.next_f64();

        TransactionFeatures {
            velocity_score,
            amount_anomaly,
            time_anomaly,
            location_anomaly,
            frequency_score,
            network_risk,
            behavior_score,
        }
    }

    /// USD 60%, GBP 20%, EUR 20%.
    fn draw_currency(rng: &mut SynthRng) -> Currency {
        let roll = rng.next_f64();
        if roll < USD_SHARE {
            Currency::Usd
        } else if roll < USD_SHARE + GBP_SHARE {
            Currency::Gbp
        } else {
            Currency::Eur
        }
    }
}

impl Synthesizer for TransactionSynthesizer {
    type Output = Transaction;

    fn name(&self) -> &'static str {
        "transaction"
    }

    fn synthesize(&self, now: DateTime<Utc>, rng: &mut SynthRng) -> Transaction {
        let offset_ms = (rng.next_f64() * LOOKBACK_MS) as i64;
        let timestamp = now - Duration::milliseconds(offset_ms);
        let amount = MIN_AMOUNT + rng.next_f64() * AMOUNT_SPAN;

        let raw = Self::draw_features(rng);
        let score = risk::composite_score(&raw);
        // Tier uses the un-rounded score.
        let (risk_level, status) = risk::classify(score, rng);
        let explanations = risk::explain(&raw);

        let id = transaction_id(rng);
        let currency = Self::draw_currency(rng);
        let from_account = ReferenceData::pick_account(rng).to_string();
        let to_account = ReferenceData::pick_account(rng).to_string();
        let description = ReferenceData::pick_description(rng).to_string();

        let metadata = TransactionMetadata {
            location:           Some(ReferenceData::pick_location(rng).to_string()),
            device_fingerprint: Some(format!("DEV{}", rng.base36_token(DEVICE_TOKEN_LEN))),
            merchant_category:  Some(ReferenceData::pick_merchant_category(rng).to_string()),
            time_of_day:        TimeOfDay::from_hour(timestamp.hour()),
            day_of_week:        weekday_name(timestamp.weekday()).to_string(),
        };

        Transaction {
            id,
            timestamp,
            amount: risk::round2(amount),
            currency,
            from_account,
            to_account,
            description,
            risk_score: risk::round3(score),
            risk_level,
            status,
            features: raw.rounded(),
            explanations,
            metadata,
        }
    }
}

/// `TXN` followed by nine upper-case base-36 characters.
pub fn transaction_id(rng: &mut SynthRng) -> String {
    format!("TXN{}", rng.base36_token(ID_TOKEN_LEN).to_uppercase())
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
