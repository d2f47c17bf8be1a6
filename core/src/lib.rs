//! RiskDesk core: synthetic transactions, alerts and metrics for a
//! fraud-review desk, plus the state owner that reviewers act on.

pub mod alert_synthesizer;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod metrics_synthesizer;
pub mod model;
pub mod query;
pub mod reference_data;
pub mod risk;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod synthesizer;
pub mod transaction_synthesizer;
pub mod types;
