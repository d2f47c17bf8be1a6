use crate::error::{DeskError, DeskResult};
use serde::{Deserialize, Serialize};

/// Upper bound on simulated seconds per tick: one day.
pub const MAX_TICK_INTERVAL_SECS: u64 = 86_400;

/// Desk-level settings. Synthesis constants (weights, thresholds,
/// sub-score ranges) are code, not configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Transactions drawn on every refresh.
    pub initial_transactions: usize,
    /// Collection size after an arrival is prepended.
    pub max_transactions:     usize,
    /// Chance that a tick brings a new transaction.
    pub arrival_probability:  f64,
    /// Simulated seconds between ticks.
    pub tick_interval_secs:   u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            initial_transactions: 100,
            max_transactions:     100,
            arrival_probability:  0.3,
            tick_interval_secs:   15,
        }
    }
}

impl DeskConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use DeskConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DeskConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded desk config from {path}: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> DeskResult<()> {
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return Err(DeskError::InvalidConfig(format!(
                "arrival_probability must be in [0, 1], got {}",
                self.arrival_probability
            )));
        }
        if self.max_transactions == 0 {
            return Err(DeskError::InvalidConfig(
                "max_transactions must be at least 1".to_string(),
            ));
        }
        if self.initial_transactions > self.max_transactions {
            return Err(DeskError::InvalidConfig(format!(
                "initial_transactions ({}) exceeds max_transactions ({})",
                self.initial_transactions, self.max_transactions
            )));
        }
        if !(1..=MAX_TICK_INTERVAL_SECS).contains(&self.tick_interval_secs) {
            return Err(DeskError::InvalidConfig(format!(
                "tick_interval_secs must be in [1, {MAX_TICK_INTERVAL_SECS}], got {}",
                self.tick_interval_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: DeskConfig =
            serde_json::from_str(r#"{ "arrival_probability": 0.5 }"#).unwrap();
        assert_eq!(config.arrival_probability, 0.5);
        assert_eq!(config.max_transactions, 100);
        assert_eq!(config.tick_interval_secs, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let config = DeskConfig { arrival_probability: 1.5, ..DeskConfig::default() };
        assert!(matches!(config.validate(), Err(DeskError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = DeskConfig { max_transactions: 0, ..DeskConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tick_interval_is_bounded() {
        let zero = DeskConfig { tick_interval_secs: 0, ..DeskConfig::default() };
        assert!(matches!(zero.validate(), Err(DeskError::InvalidConfig(_))));

        let huge = DeskConfig { tick_interval_secs: 10_000_000_000_000, ..DeskConfig::default() };
        assert!(matches!(huge.validate(), Err(DeskError::InvalidConfig(_))));

        let one_day = DeskConfig { tick_interval_secs: MAX_TICK_INTERVAL_SECS, ..DeskConfig::default() };
        assert!(one_day.validate().is_ok());
    }

    #[test]
    fn initial_batch_must_fit_capacity() {
        let config = DeskConfig {
            initial_transactions: 150,
            max_transactions: 100,
            ..DeskConfig::default()
        };
        assert!(matches!(config.validate(), Err(DeskError::InvalidConfig(_))));

        let exact = DeskConfig { initial_transactions: 100, max_transactions: 100, ..DeskConfig::default() };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DeskConfig::load("/nonexistent/desk.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
