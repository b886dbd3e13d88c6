// File: src/calculation/mod.rs
//! Probability-based confirmation measures.
//!
//! Each [`Calculation`] maps one (condition, segment) pair of subsets to a
//! number using the subset probabilities. Writing `c` for the condition, `s`
//! for the segment and `j = c ∪ s`:
//!
//! | name    | measure                 | value                              |
//! |---------|-------------------------|------------------------------------|
//! | `m_r`   | ratio                   | `P(j) / (P(c) P(s))`               |
//! | `m_lr`  | log-ratio (PMI)         | `ln((P(j) + ε) / (P(c) P(s)))`     |
//! | `m_nlr` | normalized log-ratio    | `m_lr / -ln(P(j) + ε)`             |
//! | `m_lc`  | log conditional         | `ln((P(j) + ε) / P(c))`            |
//! | `m_d`   | difference              | `P(j) / P(s) - P(c)`               |
//! | `m_j`   | Jaccard                 | `P(j) / (P(c) + P(s) - P(j))`      |
//!
//! Zero denominators yield 0 instead of NaN or infinity, and the ratio is 0
//! whenever the joint probability is 0. The normalized log-ratio is clamped
//! to 1 once `P(j) + ε` reaches 1 and to -1 when it is 0.

pub mod vector;

pub use vector::VectorCreator;

use crate::core::types::{SubsetIndex, SubsetProbabilities};
use crate::error::{CoherenceError, CoherenceResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Guard added to joint probabilities inside logarithms.
pub const DEFAULT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calculation {
    #[default]
    Ratio,
    LogRatio,
    NormalizedLogRatio,
    LogConditional,
    Difference,
    Jaccard,
}

impl Calculation {
    pub const ALL: [Calculation; 6] = [
        Calculation::Ratio,
        Calculation::LogRatio,
        Calculation::NormalizedLogRatio,
        Calculation::LogConditional,
        Calculation::Difference,
        Calculation::Jaccard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Calculation::Ratio => "m_r",
            Calculation::LogRatio => "m_lr",
            Calculation::NormalizedLogRatio => "m_nlr",
            Calculation::LogConditional => "m_lc",
            Calculation::Difference => "m_d",
            Calculation::Jaccard => "m_j",
        }
    }

    pub fn from_name(name: &str) -> CoherenceResult<Self> {
        Self::ALL
            .into_iter()
            .find(|calc| calc.name() == name)
            .ok_or_else(|| CoherenceError::InvalidInput(format!("unknown calculation '{name}'")))
    }

    /// Whether the measure takes the logarithm of a joint probability, which
    /// needs a positive ε.
    pub fn uses_logarithm(&self) -> bool {
        matches!(
            self,
            Calculation::LogRatio | Calculation::NormalizedLogRatio | Calculation::LogConditional
        )
    }

    /// Value of a single (condition, segment) pair.
    pub fn pair_value(
        &self,
        probabilities: &[f64],
        condition: SubsetIndex,
        segment: SubsetIndex,
        epsilon: f64,
    ) -> f64 {
        let p_c = probabilities[condition];
        let p_s = probabilities[segment];
        let p_j = probabilities[condition | segment];

        match self {
            Calculation::Ratio => {
                if p_j == 0.0 {
                    0.0
                } else {
                    p_j / (p_c * p_s)
                }
            }
            Calculation::LogRatio => {
                let marginal = p_c * p_s;
                if marginal > 0.0 {
                    ((p_j + epsilon) / marginal).ln()
                } else {
                    0.0
                }
            }
            Calculation::NormalizedLogRatio => {
                let marginal = p_c * p_s;
                let joint = p_j + epsilon;
                if marginal <= 0.0 {
                    0.0
                } else if joint <= 0.0 {
                    -1.0
                } else if joint >= 1.0 {
                    // Words present everywhere: perfect co-occurrence.
                    1.0
                } else {
                    (joint / marginal).ln() / -joint.ln()
                }
            }
            Calculation::LogConditional => {
                if p_c > 0.0 {
                    ((p_j + epsilon) / p_c).ln()
                } else {
                    0.0
                }
            }
            Calculation::Difference => {
                if p_s > 0.0 {
                    p_j / p_s - p_c
                } else {
                    0.0
                }
            }
            Calculation::Jaccard => {
                let union = p_c + p_s - p_j;
                if union > 0.0 {
                    p_j / union
                } else {
                    0.0
                }
            }
        }
    }

    /// Values of one condition against each of `segments`, in order.
    pub fn compute(
        &self,
        probabilities: &[f64],
        condition: SubsetIndex,
        segments: &[SubsetIndex],
        epsilon: f64,
    ) -> Vec<f64> {
        segments
            .iter()
            .map(|&segment| self.pair_value(probabilities, condition, segment, epsilon))
            .collect()
    }

    /// Values of every pair of the segmentation, in evaluation order.
    pub fn confirm(&self, probabilities: &SubsetProbabilities, epsilon: f64) -> Vec<f64> {
        let definition = &probabilities.definition;
        let mut values = Vec::with_capacity(definition.pair_count());
        for (&condition, segments) in definition.conditions.iter().zip(&definition.segments) {
            values.extend(self.compute(&probabilities.probabilities, condition, segments, epsilon));
        }
        if values.iter().any(|v| !v.is_finite()) {
            warn!(calculation = self.name(), "confirmation produced a non-finite value");
        }
        values
    }
}
