// File: src/aggregation.rs
use crate::error::{CoherenceError, CoherenceResult};
use serde::{Deserialize, Serialize};

/// Reduces weighted per-pair values to a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// `Σ wᵢ·vᵢ / Σ wᵢ`
    #[default]
    ArithmeticMean,
    /// `sqrt(Σ wᵢ·vᵢ² / Σ wᵢ)`
    QuadraticMean,
    /// Smallest value whose cumulative weight reaches half the total.
    Median,
    /// Smallest value among pairs with a positive weight.
    Min,
    /// Largest value among pairs with a positive weight.
    Max,
}

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::ArithmeticMean => "sigma_a",
            Aggregation::QuadraticMean => "sigma_q",
            Aggregation::Median => "sigma_m",
            Aggregation::Min => "sigma_n",
            Aggregation::Max => "sigma_x",
        }
    }

    pub fn aggregate(&self, values: &[f64], weights: &[f64]) -> CoherenceResult<f64> {
        if values.is_empty() {
            return Err(CoherenceError::InvalidInput(
                "nothing to aggregate".to_string(),
            ));
        }
        if values.len() != weights.len() {
            return Err(CoherenceError::InvalidInput(format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            )));
        }
        let total: f64 = weights.iter().sum();
        if total.is_nan() || total <= 0.0 || weights.iter().any(|&w| w < 0.0) {
            return Err(CoherenceError::InvalidInput(format!(
                "weights must be non-negative with a positive sum, got sum {total}"
            )));
        }

        let weighted_sum = |f: fn(f64) -> f64| -> f64 {
            values.iter().zip(weights).map(|(&v, &w)| w * f(v)).sum()
        };

        // Pairs with weight 0 take no part in min and max.
        let weighted_values = || {
            values
                .iter()
                .zip(weights)
                .filter(|&(_, &w)| w > 0.0)
                .map(|(&v, _)| v)
        };

        Ok(match self {
            Aggregation::ArithmeticMean => weighted_sum(|v| v) / total,
            Aggregation::QuadraticMean => (weighted_sum(|v| v * v) / total).sqrt(),
            Aggregation::Median => {
                let mut pairs: Vec<(f64, f64)> =
                    values.iter().copied().zip(weights.iter().copied()).collect();
                pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
                let half = total / 2.0;
                let mut cumulative = 0.0;
                let mut median = pairs[pairs.len() - 1].0;
                for (value, weight) in pairs {
                    cumulative += weight;
                    if cumulative >= half {
                        median = value;
                        break;
                    }
                }
                median
            }
            Aggregation::Min => weighted_values().fold(f64::INFINITY, f64::min),
            Aggregation::Max => weighted_values().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
