//! Scoring configuration
//!
//! Tunable numbers of the scoring pipeline. Vocabulary tables are fixed
//! and live next to the code that uses them.

use addrmatch_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cosine score at or above which a pair sharing a single number is
/// accepted without penalties
pub const DEFAULT_BYPASS_THRESHOLD: f64 = 0.98;

/// Factor applied once per triggered mismatch rule
pub const DEFAULT_MISMATCH_MULTIPLIER: f64 = 0.70;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    #[serde(default = "default_bypass_threshold")]
    pub bypass_threshold: f64,

    #[serde(default = "default_mismatch_multiplier")]
    pub mismatch_multiplier: f64,
}

fn default_bypass_threshold() -> f64 {
    DEFAULT_BYPASS_THRESHOLD
}

fn default_mismatch_multiplier() -> f64 {
    DEFAULT_MISMATCH_MULTIPLIER
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bypass_threshold: DEFAULT_BYPASS_THRESHOLD,
            mismatch_multiplier: DEFAULT_MISMATCH_MULTIPLIER,
        }
    }
}

impl ScoringConfig {
    /// Check that the threshold lies in [0, 1] and the multiplier in (0, 1]
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.bypass_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.bypass_threshold));
        }
        if !(self.mismatch_multiplier > 0.0 && self.mismatch_multiplier <= 1.0) {
            return Err(ConfigError::MultiplierOutOfRange(self.mismatch_multiplier));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("bypass_threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("mismatch_multiplier must be within (0, 1], got {0}")]
    MultiplierOutOfRange(f64),
}
