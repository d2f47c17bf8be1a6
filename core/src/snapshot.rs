//! Snapshot serialization — full desk state to/from JSON.
//!
//! A snapshot captures everything a front end needs to render the
//! desk: collections, static metrics, live summary, selection and
//! clock.

use crate::{
    clock::DeskClock,
    error::DeskResult,
    model::{Alert, DashboardMetrics, Transaction},
    query::DashboardSummary,
    types::{EntityId, RunId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub run_id:       RunId,
    pub tick:         Tick,
    pub clock:        DeskClock,
    pub transactions: Vec<Transaction>,
    pub alerts:       Vec<Alert>,
    pub metrics:      Option<DashboardMetrics>,
    pub summary:      DashboardSummary,
    pub selected:     Option<EntityId>,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> DeskResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DeskResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DeskResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
