//! Desk events — everything the engine reports back to its front end.
//!
//! RULE: Every state change made by the engine is reported as a
//! DeskEvent. Notifications (toasts) are derived from events, never
//! raised on their own.

use crate::{
    command::ReviewAction,
    model::{RiskLevel, TransactionStatus},
    types::{EntityId, RunId, Tick},
};
use serde::{Deserialize, Serialize};

/// Every event emitted by the desk.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskEvent {
    DataRefreshed {
        tick:              Tick,
        transaction_count: usize,
        alert_count:       usize,
    },
    TransactionArrived {
        tick:           Tick,
        transaction_id: EntityId,
        risk_level:     RiskLevel,
        evicted:        usize,
    },
    HighRiskTransactionDetected {
        tick:           Tick,
        transaction_id: EntityId,
        risk_level:     RiskLevel,
    },
    TransactionReviewed {
        tick:            Tick,
        transaction_id:  EntityId,
        action:          ReviewAction,
        previous_status: TransactionStatus,
        new_status:      TransactionStatus,
    },
    TransactionSelected {
        tick:           Tick,
        transaction_id: EntityId,
    },
    AlertSelected {
        tick:              Tick,
        alert_id:          EntityId,
        title:             String,
        transaction_id:    EntityId,
        transaction_found: bool,
    },
    TickCompleted {
        tick: Tick,
    },
}

impl DeskEvent {
    /// Stable name, used for the event_type column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::DataRefreshed { .. }               => "data_refreshed",
            Self::TransactionArrived { .. }          => "transaction_arrived",
            Self::HighRiskTransactionDetected { .. } => "high_risk_transaction_detected",
            Self::TransactionReviewed { .. }         => "transaction_reviewed",
            Self::TransactionSelected { .. }         => "transaction_selected",
            Self::AlertSelected { .. }               => "alert_selected",
            Self::TickCompleted { .. }               => "tick_completed",
        }
    }

    /// The toast a reviewer sees for this event, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::DataRefreshed { .. } => Some(Notification::new(
                "Data Refreshed",
                "Dashboard data has been updated".to_string(),
                NotificationVariant::Default,
            )),
            Self::HighRiskTransactionDetected { transaction_id, .. } => Some(Notification::new(
                "High Risk Transaction Detected",
                format!("Transaction {transaction_id} flagged for review"),
                NotificationVariant::Destructive,
            )),
            Self::TransactionReviewed { transaction_id, action, .. } => {
                let (title, verb) = match action {
                    ReviewAction::Approve     => ("Transaction Approved", "approved"),
                    ReviewAction::Reject      => ("Transaction Blocked", "blocked"),
                    ReviewAction::Investigate => ("Transaction Under Investigation", "marked for investigation"),
                };
                let variant = if *action == ReviewAction::Reject {
                    NotificationVariant::Destructive
                } else {
                    NotificationVariant::Default
                };
                Some(Notification::new(
                    title,
                    format!("Transaction {transaction_id} has been {verb}"),
                    variant,
                ))
            }
            Self::AlertSelected { title, .. } => Some(Notification::new(
                "Alert Selected",
                format!("Viewing details for {title}"),
                NotificationVariant::Default,
            )),
            Self::TransactionArrived { .. }
            | Self::TransactionSelected { .. }
            | Self::TickCompleted { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title:       String,
    pub description: String,
    pub variant:     NotificationVariant,
}

impl Notification {
    fn new(title: &str, description: String, variant: NotificationVariant) -> Self {
        Self { title: title.to_string(), description, variant }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// One entry of the engine's in-memory event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub run_id:     RunId,
    pub tick:       Tick,
    pub component:  String,
    pub event_type: String,
    pub payload:    String, // JSON-serialized DeskEvent
}
