//! Mission configuration loaded from JSON
//!
//! Every field is optional in the file; missing fields take the reference
//! values (six-sample window, 10 lux threshold, two-second period).
//!
//! ```json
//! {
//!   "trend": { "capacity": 8, "critical_t_value": 2.446911851, "significance_level": 0.05 },
//!   "sequencer": { "low_lux_threshold": 12.0, "actuation": "on_deploying" },
//!   "sample_period_ms": 1000
//! }
//! ```

use crate::pacing::SleepPacer;
use crate::types::SequencerParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use trend_classifier::TrendParameters;
use trend_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub trend: TrendParameters,
    pub sequencer: SequencerParameters,
    pub sample_period_ms: u64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            trend: TrendParameters::default(),
            sequencer: SequencerParameters::default(),
            sample_period_ms: 2000,
        }
    }
}

impl MissionConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.trend.validate()?;
        self.sequencer.validate()?;
        if self.sample_period_ms == 0 {
            return Err(Error::InvalidParameter(
                "sample_period_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms)
    }

    pub fn pacer(&self) -> SleepPacer {
        SleepPacer::new(self.sample_period())
    }
}
