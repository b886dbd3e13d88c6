// File: src/weight.rs
use crate::core::types::{cardinality, SubsetProbabilities};
use crate::error::{CoherenceError, CoherenceResult};
use serde::{Deserialize, Serialize};

/// Decides how much each (condition, segment) pair contributes to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighter {
    /// Every pair weighs 1.0. Legacy behaviour, kept to reproduce historical scores.
    #[default]
    Equal,
    /// A pair weighs as many words as its segment holds.
    SegmentCardinality,
    /// A pair weighs the probability of its condition.
    ConditionProbability,
}

impl Weighter {
    pub fn name(&self) -> &'static str {
        match self {
            Weighter::Equal => "e",
            Weighter::SegmentCardinality => "e_card",
            Weighter::ConditionProbability => "e_cp",
        }
    }

    /// One weight per pair, in evaluation order. Overrides stored in the
    /// segmentation definition win over the weighter's own rule. When the
    /// rule gives every pair weight 0, all pairs weigh 1.0 instead.
    pub fn weights(&self, probabilities: &SubsetProbabilities) -> CoherenceResult<Vec<f64>> {
        let definition = &probabilities.definition;
        if let Some(overrides) = &definition.weights {
            if overrides.len() != definition.pair_count() {
                return Err(CoherenceError::InvalidInput(format!(
                    "{} weight overrides for {} pairs",
                    overrides.len(),
                    definition.pair_count()
                )));
            }
            return Ok(overrides.clone());
        }

        let weights = definition
            .pairs()
            .map(|(condition, segment)| match self {
                Weighter::Equal => Ok(1.0),
                Weighter::SegmentCardinality => Ok(f64::from(cardinality(segment))),
                Weighter::ConditionProbability => probabilities.get(condition).ok_or_else(|| {
                    CoherenceError::InvalidInput(format!(
                        "condition {condition:#b} has no probability"
                    ))
                }),
            })
            .collect::<CoherenceResult<Vec<f64>>>()?;

        // No condition was ever observed: every pair counts the same.
        if weights.iter().all(|&w| w == 0.0) {
            return Ok(vec![1.0; weights.len()]);
        }
        Ok(weights)
    }
}
