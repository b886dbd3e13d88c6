// File: src/core/segmentation.rs
use crate::core::types::{
    full_subset, validate_wordset_size, word_subset, SegmentationDefinition, SubsetIndex,
};
use crate::error::{CoherenceError, CoherenceResult};
use serde::{Deserialize, Serialize};

/// Largest topic one-any segments. Its pair count grows as `n * 2^(n - 1)`.
pub const MAX_ONE_ANY_WORDSET_SIZE: usize = 12;

/// Rule deciding which word subsets of a topic are compared against which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentationScheme {
    /// Every unordered pair of single words, once.
    #[default]
    OneOne,
    /// Every word against the conjunction of all other words.
    OneAll,
    /// Every word against each word before it.
    OnePreceding,
    /// Every word against each non-empty subset of the other words.
    OneAny,
}

impl SegmentationScheme {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentationScheme::OneOne => "one-one",
            SegmentationScheme::OneAll => "one-all",
            SegmentationScheme::OnePreceding => "one-preceding",
            SegmentationScheme::OneAny => "one-any",
        }
    }

    pub fn from_name(name: &str) -> CoherenceResult<Self> {
        match name {
            "one-one" => Ok(SegmentationScheme::OneOne),
            "one-all" => Ok(SegmentationScheme::OneAll),
            "one-preceding" => Ok(SegmentationScheme::OnePreceding),
            "one-any" => Ok(SegmentationScheme::OneAny),
            other => Err(CoherenceError::InvalidInput(format!(
                "unknown segmentation scheme '{other}'"
            ))),
        }
    }

    /// Builds the segmentation of a topic with `wordset_size` words.
    pub fn generate(&self, wordset_size: usize) -> CoherenceResult<SegmentationDefinition> {
        validate_wordset_size(wordset_size)?;
        if *self == SegmentationScheme::OneAny && wordset_size > MAX_ONE_ANY_WORDSET_SIZE {
            return Err(CoherenceError::InvalidInput(format!(
                "one-any segmentation takes at most {MAX_ONE_ANY_WORDSET_SIZE} words, got {wordset_size}"
            )));
        }

        let all = full_subset(wordset_size);
        let (conditions, segments): (Vec<SubsetIndex>, Vec<Vec<SubsetIndex>>) = match self {
            SegmentationScheme::OneOne => (0..wordset_size)
                .map(|i| {
                    let others = (i + 1..wordset_size).map(word_subset).collect();
                    (word_subset(i), others)
                })
                .unzip(),
            SegmentationScheme::OneAll => (0..wordset_size)
                .map(|i| (word_subset(i), vec![all & !word_subset(i)]))
                .unzip(),
            SegmentationScheme::OnePreceding => (1..wordset_size)
                .map(|i| (word_subset(i), (0..i).map(word_subset).collect()))
                .unzip(),
            SegmentationScheme::OneAny => (0..wordset_size)
                .map(|i| {
                    let condition = word_subset(i);
                    let others = (1..=all).filter(|s| s & condition == 0).collect();
                    (condition, others)
                })
                .unzip(),
        };
        Ok(SegmentationDefinition::new(conditions, segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_one_lists_each_pair_once() {
        let def = SegmentationScheme::OneOne.generate(3).unwrap();
        assert_eq!(def.conditions, vec![1, 2, 4]);
        assert_eq!(def.segments, vec![vec![2, 4], vec![4], vec![]]);
        assert_eq!(def.pair_count(), 3);
    }

    #[test]
    fn one_all_merges_the_complement() {
        let def = SegmentationScheme::OneAll.generate(3).unwrap();
        assert_eq!(def.conditions, vec![1, 2, 4]);
        assert_eq!(def.segments, vec![vec![6], vec![5], vec![3]]);
    }

    #[test]
    fn one_preceding_skips_first_word() {
        let def = SegmentationScheme::OnePreceding.generate(4).unwrap();
        assert_eq!(def.conditions, vec![2, 4, 8]);
        assert_eq!(def.segments, vec![vec![1], vec![1, 2], vec![1, 2, 4]]);
    }

    #[test]
    fn one_any_covers_every_subset_of_the_rest() {
        let def = SegmentationScheme::OneAny.generate(3).unwrap();
        assert_eq!(def.segments[0], vec![2, 4, 6]);
        assert_eq!(def.segments[1], vec![1, 4, 5]);
        assert_eq!(def.segments[2], vec![1, 2, 3]);
    }

    #[test]
    fn one_any_caps_the_topic_size() {
        let def = SegmentationScheme::OneAny
            .generate(MAX_ONE_ANY_WORDSET_SIZE)
            .unwrap();
        assert_eq!(def.pair_count(), MAX_ONE_ANY_WORDSET_SIZE * 2047);
        assert!(matches!(
            SegmentationScheme::OneAny.generate(MAX_ONE_ANY_WORDSET_SIZE + 1),
            Err(CoherenceError::InvalidInput(_))
        ));
        assert!(SegmentationScheme::OneOne
            .generate(MAX_ONE_ANY_WORDSET_SIZE + 1)
            .is_ok());
    }

    #[test]
    fn generation_is_stable() {
        for scheme in [
            SegmentationScheme::OneOne,
            SegmentationScheme::OneAll,
            SegmentationScheme::OnePreceding,
            SegmentationScheme::OneAny,
        ] {
            assert_eq!(scheme.generate(5).unwrap(), scheme.generate(5).unwrap());
            assert_eq!(SegmentationScheme::from_name(scheme.name()).unwrap(), scheme);
        }
    }

    #[test]
    fn too_small_topics_fail() {
        assert!(matches!(
            SegmentationScheme::OneOne.generate(1),
            Err(CoherenceError::InvalidInput(_))
        ));
        assert!(SegmentationScheme::from_name("two-two").is_err());
    }
}
