//! Dashboard state — the in-memory collections behind the desk.
//!
//! RULE: Only the owner of a DashboardState mutates it. Readers get
//! shared slices; review actions change `status` and nothing else.

use crate::{
    command::ReviewAction,
    error::{DeskError, DeskResult},
    model::{Alert, DashboardMetrics, Transaction, TransactionStatus},
    types::EntityId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    transactions: Vec<Transaction>,
    alerts:       Vec<Alert>,
    metrics:      Option<DashboardMetrics>,
    selected:     Option<EntityId>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// `None` until the first refresh.
    pub fn metrics(&self) -> Option<&DashboardMetrics> {
        self.metrics.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected transaction, if it is still in the collection.
    pub fn selected(&self) -> Option<&Transaction> {
        self.selected.as_deref().and_then(|id| self.transaction(id))
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn alert(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Replace all three collections and select the newest transaction.
    pub fn replace(
        &mut self,
        transactions: Vec<Transaction>,
        alerts: Vec<Alert>,
        metrics: DashboardMetrics,
    ) {
        self.selected = transactions.first().map(|t| t.id.clone());
        self.transactions = transactions;
        self.alerts = alerts;
        self.metrics = Some(metrics);
    }

    /// Set the status of exactly the matching transaction.
    /// Returns the status it had before.
    pub fn apply_action(&mut self, id: &str, action: ReviewAction) -> DeskResult<TransactionStatus> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DeskError::TransactionNotFound { id: id.to_string() })?;
        let previous = txn.status;
        txn.status = action.resulting_status();
        Ok(previous)
    }

    /// Prepend a new arrival and truncate to `max_len`.
    /// Returns how many of the oldest transactions were evicted.
    pub fn push_arrival(&mut self, transaction: Transaction, max_len: usize) -> usize {
        self.transactions.insert(0, transaction);
        let evicted = self.transactions.len().saturating_sub(max_len);
        self.transactions.truncate(max_len);
        evicted
    }

    pub fn select_transaction(&mut self, id: &str) -> DeskResult<()> {
        if self.transaction(id).is_none() {
            return Err(DeskError::TransactionNotFound { id: id.to_string() });
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Resolve an alert's transaction reference against the live set.
    /// Selects the transaction when present; keeps the old selection
    /// otherwise. Returns the alert and whether the reference resolved.
    pub fn select_alert(&mut self, alert_id: &str) -> DeskResult<(Alert, bool)> {
        let alert = self
            .alert(alert_id)
            .cloned()
            .ok_or_else(|| DeskError::AlertNotFound { id: alert_id.to_string() })?;
        let found = self.transaction(&alert.transaction_id).is_some();
        if found {
            self.selected = Some(alert.transaction_id.clone());
        }
        Ok((alert, found))
    }
}
