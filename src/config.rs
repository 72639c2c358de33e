//! Aggregation configuration

use serde::{Deserialize, Serialize};
use vitaltrend_binning::BinningPolicy;
use vitaltrend_core::{Error, Result};
use vitaltrend_summary::SpreadNormalization;

/// How passes bucket and reduce records
///
/// Loadable from JSON; missing fields fall back to the defaults
/// (fixed width 0.01, sample standard deviation).
///
/// ```rust
/// use vitaltrend::AggregationConfig;
///
/// let config = AggregationConfig::from_json(r#"{"binning": {"policy": "fixed_count", "buckets": 50}}"#).unwrap();
/// assert_eq!(config.binning.name(), "fixed_count");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub binning: BinningPolicy,
    pub spread: SpreadNormalization,
}

impl AggregationConfig {
    pub fn new(binning: BinningPolicy, spread: SpreadNormalization) -> Self {
        Self { binning, spread }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidParameter(format!("Invalid aggregation config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.binning.validate()
    }
}
