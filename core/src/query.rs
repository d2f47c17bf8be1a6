//! Read-side queries over the dashboard state: list filtering, alert
//! partitioning and the live counts shown on the summary cards.

use crate::{
    model::{Alert, AlertStatus, RiskLevel, Transaction, TransactionStatus},
    state::DashboardState,
};
use serde::{Deserialize, Serialize};

/// Transaction list filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    /// Case-insensitive substring over id, from-account and to-account.
    pub search:     Option<String>,
    pub status:     Option<TransactionStatus>,
    pub risk_level: Option<RiskLevel>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [&txn.id, &txn.from_account, &txn.to_account]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        };
        let matches_status = self.status.map_or(true, |s| txn.status == s);
        let matches_risk = self.risk_level.map_or(true, |r| txn.risk_level == r);

        matches_search && matches_status && matches_risk
    }

    /// Matching transactions, order preserved.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Split alerts into (new, everything else), order preserved.
pub fn partition_alerts(alerts: &[Alert]) -> (Vec<&Alert>, Vec<&Alert>) {
    alerts.iter().partition(|a| a.status == AlertStatus::New)
}

/// Live counts over the current collections. Reported next to the
/// static metrics snapshot, never merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_transactions: usize,
    /// Flagged or under investigation.
    pub flagged_for_review: usize,
    /// `flagged_for_review` as a percentage of the total; 0 when empty.
    pub flagged_share_pct:  f64,
    pub critical_risk:      usize,
    /// Alerts with status `new`.
    pub active_alerts:      usize,
}

impl DashboardSummary {
    pub fn from_state(state: &DashboardState) -> Self {
        let transactions = state.transactions();
        let total = transactions.len();
        let flagged = transactions.iter().filter(|t| t.awaits_review()).count();
        let critical = transactions
            .iter()
            .filter(|t| t.risk_level == RiskLevel::Critical)
            .count();
        let active_alerts = state
            .alerts()
            .iter()
            .filter(|a| a.status == AlertStatus::New)
            .count();
        let flagged_share_pct = if total == 0 {
            0.0
        } else {
            flagged as f64 / total as f64 * 100.0
        };

        Self {
            total_transactions: total,
            flagged_for_review: flagged,
            flagged_share_pct,
            critical_risk: critical,
            active_alerts,
        }
    }
}
