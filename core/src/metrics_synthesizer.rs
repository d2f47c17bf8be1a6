//! Metrics synthesizer.
//!
//! Returns a fixed snapshot. The figures are not derived from the live
//! transaction or alert collections; live counts come from
//! `query::DashboardSummary` instead.

use crate::{model::DashboardMetrics, rng::SynthRng, synthesizer::Synthesizer};
use chrono::{DateTime, Utc};

#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsSynthesizer;

impl MetricsSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize_metrics(&self) -> DashboardMetrics {
        DashboardMetrics {
            total_transactions:   15_427,
            flagged_transactions: 342,
            false_positive_rate:  0.12,
            average_risk_score:   0.23,
            alerts_today:         23,
            blocked_amount:       2_847_392.45,
            review_backlog:       18,
            response_time:        4.2,
        }
    }
}

impl Synthesizer for MetricsSynthesizer {
    type Output = DashboardMetrics;

    fn name(&self) -> &'static str {
        "metrics"
    }

    fn synthesize(&self, _now: DateTime<Utc>, _rng: &mut SynthRng) -> DashboardMetrics {
        self.synthesize_metrics()
    }
}
