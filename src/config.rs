// File: src/config.rs
//! Configuration of a coherence measure.
//!
//! A measure is the combination of a counting mode, a segmentation scheme, a
//! confirmation calculation, a weighter and an aggregation. Configurations
//! are plain serde structs and can be loaded from JSON:
//!
//! ```json
//! {
//!   "frequency": { "mode": "sliding_window", "width": 10 },
//!   "segmentation": "one-one",
//!   "calculation": "log_ratio",
//!   "weighter": "equal",
//!   "aggregation": "arithmetic_mean",
//!   "epsilon": 1e-12
//! }
//! ```

use crate::aggregation::Aggregation;
use crate::calculation::{Calculation, DEFAULT_EPSILON};
use crate::core::segmentation::SegmentationScheme;
use crate::error::{CoherenceError, CoherenceResult};
use crate::frequency::FrequencyMode;
use crate::weight::Weighter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Window width used by the `uci` and `npmi` presets.
pub const DEFAULT_SLIDING_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceConfig {
    pub frequency: FrequencyMode,
    pub segmentation: SegmentationScheme,
    pub calculation: Calculation,
    pub weighter: Weighter,
    pub aggregation: Aggregation,
    /// Added to joint probabilities inside logarithms.
    pub epsilon: f64,
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            frequency: FrequencyMode::Document,
            segmentation: SegmentationScheme::OneOne,
            calculation: Calculation::Ratio,
            weighter: Weighter::Equal,
            aggregation: Aggregation::ArithmeticMean,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl CoherenceConfig {
    /// Named measures: `uci`, `npmi` and `umass`.
    pub fn preset(name: &str) -> CoherenceResult<Self> {
        let sliding = FrequencyMode::SlidingWindow {
            width: DEFAULT_SLIDING_WINDOW,
        };
        match name {
            "uci" => Ok(Self {
                frequency: sliding,
                calculation: Calculation::LogRatio,
                ..Self::default()
            }),
            "npmi" => Ok(Self {
                frequency: sliding,
                calculation: Calculation::NormalizedLogRatio,
                ..Self::default()
            }),
            "umass" => Ok(Self {
                calculation: Calculation::LogConditional,
                ..Self::default()
            }),
            other => Err(CoherenceError::Config(format!("unknown preset '{other}'"))),
        }
    }

    pub fn validate(&self) -> CoherenceResult<()> {
        self.frequency.validate()?;
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(CoherenceError::Config(format!(
                "epsilon must be a finite non-negative number, got {}",
                self.epsilon
            )));
        }
        if self.epsilon == 0.0 && self.calculation.uses_logarithm() {
            return Err(CoherenceError::Config(format!(
                "calculation {} needs a positive epsilon",
                self.calculation.name()
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> CoherenceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CoherenceResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> CoherenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
