// File: src/calculation/vector.rs
use crate::calculation::Calculation;
use crate::core::types::{subset_count, validate_wordset_size, word_subset, SegmentationDefinition};
use crate::error::{CoherenceError, CoherenceResult};

/// Builds one context vector per topic word from a scalar calculation.
///
/// Component `j` of the vector of word `i` is the calculation's value with
/// condition `{i}` and segment `{j}`, the word itself included. Reducing the
/// vectors to a score (cosine similarity and the like) is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorCreator {
    calculation: Calculation,
}

impl VectorCreator {
    pub fn new(calculation: Calculation) -> Self {
        Self { calculation }
    }

    pub fn calculation(&self) -> Calculation {
        self.calculation
    }

    /// Every word against every word: the pairs whose probabilities the
    /// vectors are made of.
    pub fn definition(&self, wordset_size: usize) -> CoherenceResult<SegmentationDefinition> {
        validate_wordset_size(wordset_size)?;
        let all: Vec<usize> = (0..wordset_size).map(word_subset).collect();
        Ok(SegmentationDefinition::new(all.clone(), vec![all; wordset_size]))
    }

    pub fn create_vectors(
        &self,
        probabilities: &[f64],
        wordset_size: usize,
        epsilon: f64,
    ) -> CoherenceResult<Vec<Vec<f64>>> {
        validate_wordset_size(wordset_size)?;
        if probabilities.len() < subset_count(wordset_size) {
            return Err(CoherenceError::InvalidInput(format!(
                "{} probabilities cannot describe {} words",
                probabilities.len(),
                wordset_size
            )));
        }
        let words: Vec<usize> = (0..wordset_size).map(word_subset).collect();
        Ok(words
            .iter()
            .map(|&word| self.calculation.compute(probabilities, word, &words, epsilon))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::DEFAULT_EPSILON;

    fn assert_vectors(actual: &[Vec<f64>], expected: &[[f64; 3]; 3]) {
        for (row, (got, want)) in actual.iter().zip(expected).enumerate() {
            for (col, (g, w)) in got.iter().zip(want).enumerate() {
                assert!((g - w).abs() < 1e-9, "vector {row}[{col}]: {g} != {w}");
            }
        }
    }

    #[test]
    fn difference_vectors_reference_values() {
        let creator = VectorCreator::new(Calculation::Difference);
        let cases: [([f64; 8], [[f64; 3]; 3]); 3] = [
            (
                [0.0, 1.0, 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3., 2. / 3.],
                [[0.0, 0.0, 0.0], [0.0, 1. / 3., 1. / 3.], [0.0, 1. / 3., 1. / 3.]],
            ),
            (
                [0.0, 2. / 3., 2. / 3., 1. / 3., 2. / 3., 1. / 3., 1. / 3., 0.0],
                [
                    [1. / 3., -1. / 6., -1. / 6.],
                    [-1. / 6., 1. / 3., -1. / 6.],
                    [-1. / 6., -1. / 6., 1. / 3.],
                ],
            ),
            (
                [0.0, 0.25, 0.5, 0.25, 0.5, 0.25, 0.25, 0.25],
                [[0.75, 0.25, 0.25], [0.5, 0.5, 0.0], [0.5, 0.0, 0.5]],
            ),
        ];
        for (probabilities, expected) in cases {
            let vectors = creator.create_vectors(&probabilities, 3, DEFAULT_EPSILON).unwrap();
            assert_eq!(vectors.len(), 3);
            assert_vectors(&vectors, &expected);
        }
    }

    #[test]
    fn definition_pairs_every_word_with_every_word() {
        let definition = VectorCreator::new(Calculation::Ratio).definition(3).unwrap();
        assert_eq!(definition.conditions, vec![1, 2, 4]);
        assert_eq!(definition.segments, vec![vec![1, 2, 4]; 3]);
        assert_eq!(definition.pair_count(), 9);
    }

    #[test]
    fn too_few_probabilities_fail() {
        let creator = VectorCreator::new(Calculation::Difference);
        assert!(creator.create_vectors(&[0.0, 1.0, 1.0], 2, DEFAULT_EPSILON).is_err());
    }
}
