use crate::{
    error::DeskError,
    model::TransactionStatus,
    types::EntityId,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A reviewer's decision on one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
    Investigate,
}

impl ReviewAction {
    /// The status a transaction takes after this action.
    pub fn resulting_status(&self) -> TransactionStatus {
        match self {
            Self::Approve     => TransactionStatus::Approved,
            Self::Reject      => TransactionStatus::Blocked,
            Self::Investigate => TransactionStatus::Investigating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve     => "approve",
            Self::Reject      => "reject",
            Self::Investigate => "investigate",
        }
    }
}

impl FromStr for ReviewAction {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve"     => Ok(Self::Approve),
            "reject"      => Ok(Self::Reject),
            "investigate" => Ok(Self::Investigate),
            other         => Err(DeskError::UnknownAction(other.to_string())),
        }
    }
}

impl DeskCommand {
    /// Parse a `TRANSACTION_ID:ACTION` pair into a review command.
    pub fn parse_review(pair: &str) -> Result<Self, DeskError> {
        let (transaction_id, action) = pair
            .rsplit_once(':')
            .ok_or_else(|| DeskError::UnknownAction(pair.to_string()))?;
        Ok(Self::Review {
            transaction_id: transaction_id.to_string(),
            action:         action.parse()?,
        })
    }
}

/// All commands the desk accepts from its front end.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeskCommand {
    Refresh,
    Tick {
        count: u64,
    },
    Review {
        transaction_id: EntityId,
        action:         ReviewAction,
    },
    SelectTransaction {
        transaction_id: EntityId,
    },
    SelectAlert {
        alert_id: EntityId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_statuses() {
        assert_eq!(ReviewAction::Approve.resulting_status(), TransactionStatus::Approved);
        assert_eq!(ReviewAction::Reject.resulting_status(), TransactionStatus::Blocked);
        assert_eq!(
            ReviewAction::Investigate.resulting_status(),
            TransactionStatus::Investigating
        );
    }

    #[test]
    fn parse_rejects_unknown_action() {
        assert_eq!("reject".parse::<ReviewAction>().unwrap(), ReviewAction::Reject);
        assert!(matches!(
            "escalate".parse::<ReviewAction>(),
            Err(DeskError::UnknownAction(a)) if a == "escalate"
        ));
    }

    #[test]
    fn review_pair_parses_into_command() {
        assert_eq!(
            DeskCommand::parse_review("TXNABC123XYZ:approve").unwrap(),
            DeskCommand::Review {
                transaction_id: "TXNABC123XYZ".into(),
                action: ReviewAction::Approve,
            }
        );
        assert!(matches!(
            DeskCommand::parse_review("TXNABC123XYZ:escalate"),
            Err(DeskError::UnknownAction(a)) if a == "escalate"
        ));
        assert!(matches!(
            DeskCommand::parse_review("TXNABC123XYZ"),
            Err(DeskError::UnknownAction(_))
        ));
    }

    #[test]
    fn review_command_wire_shape() {
        let cmd: DeskCommand = serde_json::from_str(
            r#"{ "cmd": "review", "transaction_id": "TXN1", "action": "investigate" }"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            DeskCommand::Review {
                transaction_id: "TXN1".into(),
                action: ReviewAction::Investigate,
            }
        );
    }
}
