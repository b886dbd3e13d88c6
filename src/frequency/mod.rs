// File: src/frequency/mod.rs
//! Co-occurrence counting over the corpus.
//!
//! A determiner turns a topic's words and segmentation into a [`CountResult`]:
//! one count and one denominator per word subset. Three counting modes exist:
//!
//! - [`DocumentFrequencyDeterminer`]: a subset counts once per document that
//!   contains all of its words.
//! - [`ContextWindowFrequencyDeterminer`]: word occurrences and pairs of
//!   occurrences lying within a radius of each other.
//! - [`SlidingWindowFrequencyDeterminer`]: fixed-width windows slid over every
//!   document; a subset counts once per window containing all of its words.
//!
//! Denominators are derived from the corpus document-size histogram, so
//! documents that contain none of the requested words are never fetched.

pub mod context_window;
pub mod document;
pub mod sliding_window;

pub use context_window::ContextWindowFrequencyDeterminer;
pub use document::DocumentFrequencyDeterminer;
pub use sliding_window::SlidingWindowFrequencyDeterminer;

use crate::core::types::{
    subset_count, validate_distinct, CountResult, SegmentationDefinition, SubsetIndex,
    MAX_WORDSET_SIZE,
};
use crate::corpus::CorpusAdapter;
use crate::error::{CoherenceError, CoherenceResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Computes subset counts for a batch of topics.
pub trait FrequencyDeterminer: Send + Sync {
    /// Returns one [`CountResult`] per entry of `word_sets`, which must be
    /// paired one-to-one with `definitions`.
    fn determine_counts(
        &self,
        corpus: &dyn CorpusAdapter,
        word_sets: &[Vec<String>],
        definitions: &[SegmentationDefinition],
    ) -> CoherenceResult<Vec<CountResult>>;
}

/// Serializable choice of counting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrequencyMode {
    #[default]
    Document,
    ContextWindow { radius: usize },
    SlidingWindow { width: usize },
}

impl FrequencyMode {
    pub fn validate(&self) -> CoherenceResult<()> {
        match *self {
            FrequencyMode::ContextWindow { radius: 0 } => Err(CoherenceError::InvalidInput(
                "context window radius must be at least 1".to_string(),
            )),
            FrequencyMode::SlidingWindow { width: 0 } => Err(CoherenceError::InvalidInput(
                "sliding window width must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Builds the determiner implementing this mode.
    pub fn determiner(&self) -> CoherenceResult<Box<dyn FrequencyDeterminer>> {
        Ok(match *self {
            FrequencyMode::Document => Box::new(DocumentFrequencyDeterminer),
            FrequencyMode::ContextWindow { radius } => {
                Box::new(ContextWindowFrequencyDeterminer::new(radius)?)
            }
            FrequencyMode::SlidingWindow { width } => {
                Box::new(SlidingWindowFrequencyDeterminer::new(width)?)
            }
        })
    }
}

/// Rejects batches whose word sets and definitions don't line up, word sets
/// that repeat a word, and definitions naming words a set doesn't have.
pub(crate) fn check_batch(
    word_sets: &[Vec<String>],
    definitions: &[SegmentationDefinition],
) -> CoherenceResult<()> {
    if word_sets.len() != definitions.len() {
        return Err(CoherenceError::InvalidInput(format!(
            "{} word sets but {} segmentation definitions",
            word_sets.len(),
            definitions.len()
        )));
    }
    if let Some(words) = word_sets.iter().find(|w| w.len() > MAX_WORDSET_SIZE) {
        return Err(CoherenceError::InvalidInput(format!(
            "a word set may hold at most {MAX_WORDSET_SIZE} words, got {}",
            words.len()
        )));
    }
    for (topic, (words, definition)) in word_sets.iter().zip(definitions).enumerate() {
        validate_distinct(words).map_err(|e| e.for_topic(topic))?;
        let limit = subset_count(words.len());
        let out_of_range = definition
            .conditions
            .iter()
            .chain(definition.segments.iter().flatten())
            .find(|&&subset| subset >= limit);
        if let Some(subset) = out_of_range {
            return Err(CoherenceError::InvalidInput(format!(
                "subset {subset:#b} of topic #{topic} refers to words beyond its {} words",
                words.len()
            )));
        }
        if definition.conditions.len() != definition.segments.len() {
            return Err(CoherenceError::InvalidInput(format!(
                "topic #{topic} has {} conditions but {} segment lists",
                definition.conditions.len(),
                definition.segments.len()
            )));
        }
    }
    Ok(())
}

/// Expands "how many documents/windows had exactly this set of words" into
/// per-subset counts: a subset is counted by every signature containing it.
pub(crate) fn expand_signatures(
    signature_counts: &HashMap<SubsetIndex, u64>,
    needed: &[bool],
) -> Vec<u64> {
    let mut counts = vec![0u64; needed.len()];
    for (subset, count) in counts.iter_mut().enumerate() {
        if subset == 0 || !needed[subset] {
            continue;
        }
        *count = signature_counts
            .iter()
            .filter(|&(&signature, _)| signature & subset == subset)
            .map(|(_, &n)| n)
            .sum();
    }
    counts
}
