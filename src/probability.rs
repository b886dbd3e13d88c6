// File: src/probability.rs
use crate::core::types::{CountResult, SubsetProbabilities};
use crate::error::{CoherenceError, CoherenceResult};

/// Turns subset counts into relative frequencies.
///
/// `p[s] = counts[s] / denominators[s]`, with `p[0] = 1.0` for the empty
/// subset. No smoothing happens here; zero counts stay zero.
pub fn estimate(counts: &CountResult) -> CoherenceResult<SubsetProbabilities> {
    if counts.document_count == 0 {
        return Err(CoherenceError::EmptyCorpus);
    }
    if counts.counts.len() != counts.denominators.len() {
        return Err(CoherenceError::InvalidInput(format!(
            "{} counts but {} denominators",
            counts.counts.len(),
            counts.denominators.len()
        )));
    }

    let mut probabilities: Vec<f64> = counts
        .counts
        .iter()
        .zip(&counts.denominators)
        .map(|(&count, &denominator)| {
            if denominator == 0 {
                0.0
            } else {
                count as f64 / denominator as f64
            }
        })
        .collect();
    if let Some(empty) = probabilities.first_mut() {
        *empty = 1.0;
    }

    Ok(SubsetProbabilities::new(counts.definition.clone(), probabilities))
}
