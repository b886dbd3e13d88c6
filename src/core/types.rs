// src/core/types.rs
use crate::error::{CoherenceError, CoherenceResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of a document inside the corpus.
pub type DocId = u32;

/// A word subset encoded as a bitmask over the topic's word list.
/// Bit `i` set means word `i` is a member; `0` is the empty subset.
pub type SubsetIndex = usize;

/// (document length, number of documents with that length), ascending by length.
pub type DocumentSizeHistogram = Vec<(usize, u64)>;

/// Largest topic for which per-subset arrays (`2^n` entries) are built.
pub const MAX_WORDSET_SIZE: usize = 24;

/// The subset holding only word `word`.
#[inline]
pub fn word_subset(word: usize) -> SubsetIndex {
    1 << word
}

/// The subset holding every word of a topic of `wordset_size` words.
#[inline]
pub fn full_subset(wordset_size: usize) -> SubsetIndex {
    (1 << wordset_size) - 1
}

/// Number of words in a subset.
#[inline]
pub fn cardinality(subset: SubsetIndex) -> u32 {
    subset.count_ones()
}

/// Number of entries of a per-subset array for a topic of `wordset_size` words.
#[inline]
pub fn subset_count(wordset_size: usize) -> usize {
    1 << wordset_size
}

/// Checks that a topic of `wordset_size` words can be segmented.
pub fn validate_wordset_size(wordset_size: usize) -> CoherenceResult<()> {
    if wordset_size < 2 {
        return Err(CoherenceError::InvalidInput(format!(
            "a topic needs at least 2 words, got {wordset_size}"
        )));
    }
    if wordset_size > MAX_WORDSET_SIZE {
        return Err(CoherenceError::InvalidInput(format!(
            "a topic may hold at most {MAX_WORDSET_SIZE} words, got {wordset_size}"
        )));
    }
    Ok(())
}

/// Checks that a topic has a usable number of distinct, non-empty words.
pub fn validate_words<S: AsRef<str>>(words: &[S]) -> CoherenceResult<()> {
    validate_wordset_size(words.len())?;
    if let Some(pos) = words.iter().position(|w| w.as_ref().trim().is_empty()) {
        return Err(CoherenceError::InvalidInput(format!(
            "word #{pos} of the topic is empty"
        )));
    }
    validate_distinct(words)
}

/// Rejects word lists naming the same word twice. A repeated word would be
/// counted against its own occurrences.
pub fn validate_distinct<S: AsRef<str>>(words: &[S]) -> CoherenceResult<()> {
    let mut seen = HashSet::with_capacity(words.len());
    for (pos, word) in words.iter().enumerate() {
        if !seen.insert(word.as_ref()) {
            return Err(CoherenceError::InvalidInput(format!(
                "word #{pos} ('{}') repeats an earlier word of the topic",
                word.as_ref()
            )));
        }
    }
    Ok(())
}

/// Which subsets are compared against which for one topic.
///
/// Pairs are evaluated in the order `for i in conditions { for s in segments[i] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentationDefinition {
    pub conditions: Vec<SubsetIndex>,
    pub segments: Vec<Vec<SubsetIndex>>,
    /// Per-pair weight overrides, flattened in evaluation order.
    pub weights: Option<Vec<f64>>,
}

impl SegmentationDefinition {
    pub fn new(conditions: Vec<SubsetIndex>, segments: Vec<Vec<SubsetIndex>>) -> Self {
        Self { conditions, segments, weights: None }
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Total number of (condition, segment) pairs.
    pub fn pair_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// Iterates over every (condition, segment) pair in evaluation order.
    pub fn pairs(&self) -> impl Iterator<Item = (SubsetIndex, SubsetIndex)> + '_ {
        self.conditions
            .iter()
            .zip(self.segments.iter())
            .flat_map(|(&c, segs)| segs.iter().map(move |&s| (c, s)))
    }

    /// Marks every subset whose count is needed to evaluate this definition:
    /// each condition, each segment, their union and every single word.
    pub fn needed_subsets(&self, wordset_size: usize) -> Vec<bool> {
        let mut needed = vec![false; subset_count(wordset_size)];
        for word in 0..wordset_size {
            needed[word_subset(word)] = true;
        }
        for (c, s) in self.pairs() {
            needed[c] = true;
            needed[s] = true;
            needed[c | s] = true;
        }
        needed
    }
}

/// Co-occurrence counts of one topic, indexed by [`SubsetIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountResult {
    pub definition: SegmentationDefinition,
    pub counts: Vec<u64>,
    /// Number of windows (or documents) each count was drawn from.
    pub denominators: Vec<u64>,
    pub document_count: u64,
}

/// Probabilities of one topic's subsets, indexed by [`SubsetIndex`].
/// Index 0 (no condition) is always 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetProbabilities {
    pub definition: SegmentationDefinition,
    pub probabilities: Vec<f64>,
}

impl SubsetProbabilities {
    pub fn new(definition: SegmentationDefinition, probabilities: Vec<f64>) -> Self {
        Self { definition, probabilities }
    }

    /// Probability of `subset`, or `None` if it lies outside this topic.
    #[inline]
    pub fn get(&self, subset: SubsetIndex) -> Option<f64> {
        self.probabilities.get(subset).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_helpers() {
        assert_eq!(word_subset(0), 1);
        assert_eq!(word_subset(2), 4);
        assert_eq!(full_subset(3), 7);
        assert_eq!(cardinality(0b101), 2);
        assert_eq!(subset_count(3), 8);
    }

    #[test]
    fn validate_words_rejects_bad_topics() {
        assert!(validate_words(&["a"]).is_err());
        assert!(validate_words(&["a", " "]).is_err());
        let huge: Vec<String> = (0..=MAX_WORDSET_SIZE).map(|i| format!("w{i}")).collect();
        assert!(validate_words(huge.as_slice()).is_err());
        assert!(validate_words(&["a", "b"]).is_ok());
    }

    #[test]
    fn repeated_words_are_rejected() {
        assert!(matches!(
            validate_words(&["a", "b", "a"]),
            Err(CoherenceError::InvalidInput(_))
        ));
        assert!(validate_distinct(&["a", "A"]).is_ok());
    }

    #[test]
    fn probabilities_outside_the_topic_are_none() {
        let probs = SubsetProbabilities::new(
            SegmentationDefinition::default(),
            vec![1.0, 0.5, 0.25, 0.125],
        );
        assert_eq!(probs.get(3), Some(0.125));
        assert_eq!(probs.get(4), None);
    }

    #[test]
    fn pairs_follow_evaluation_order() {
        let def = SegmentationDefinition::new(vec![1, 2], vec![vec![2, 4], vec![4]]);
        assert_eq!(def.pair_count(), 3);
        assert_eq!(def.pairs().collect::<Vec<_>>(), vec![(1, 2), (1, 4), (2, 4)]);
    }

    #[test]
    fn needed_subsets_include_unions() {
        let def = SegmentationDefinition::new(vec![1], vec![vec![6]]);
        let needed = def.needed_subsets(3);
        let marked: Vec<usize> = (0..8).filter(|&i| needed[i]).collect();
        assert_eq!(marked, vec![1, 2, 4, 6, 7]);
    }
}
