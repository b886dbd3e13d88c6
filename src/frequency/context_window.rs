// File: src/frequency/context_window.rs
use crate::core::types::{
    cardinality, subset_count, word_subset, CountResult, DocumentSizeHistogram,
    SegmentationDefinition,
};
use crate::corpus::{document_count, CorpusAdapter};
use crate::error::{CoherenceError, CoherenceResult};
use crate::frequency::{check_batch, FrequencyDeterminer};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Counts co-occurrences inside context windows of `2 * radius + 1` tokens.
///
/// A single word counts once per occurrence. A pair of words counts once per
/// pair of occurrences at most `radius` tokens apart; windows are clipped at
/// the document bounds. Subsets of three or more words are never counted.
///
/// Denominators: the corpus token count for single words and the number of
/// position pairs at most `radius` apart for everything larger.
#[derive(Debug, Clone, Copy)]
pub struct ContextWindowFrequencyDeterminer {
    radius: usize,
}

impl ContextWindowFrequencyDeterminer {
    pub fn new(radius: usize) -> CoherenceResult<Self> {
        if radius == 0 {
            return Err(CoherenceError::InvalidInput(
                "context window radius must be at least 1".to_string(),
            ));
        }
        Ok(Self { radius })
    }

    /// Number of position pairs at most `radius` apart in a document.
    fn window_pairs(&self, doc_length: usize) -> u64 {
        let max_distance = self.radius.min(doc_length.saturating_sub(1));
        (1..=max_distance).map(|d| (doc_length - d) as u64).sum()
    }

    /// (token total, pair total) over the whole corpus.
    fn totals(&self, histogram: &DocumentSizeHistogram) -> (u64, u64) {
        histogram.iter().fold((0, 0), |(tokens, pairs), &(length, freq)| {
            (
                tokens + length as u64 * freq,
                pairs + self.window_pairs(length) * freq,
            )
        })
    }

    /// Adds the occurrences and close pairs of one document to `counts`.
    pub(crate) fn add_counts_from_document(
        &self,
        positions: &[Vec<usize>],
        doc_length: Option<usize>,
        counts: &mut [u64],
    ) {
        let mut occurrences: Vec<(usize, usize)> = positions
            .iter()
            .enumerate()
            .flat_map(|(word, list)| list.iter().map(move |&pos| (pos, word)))
            .filter(|&(pos, _)| doc_length.map_or(true, |length| pos < length))
            .collect();
        occurrences.sort_unstable();

        for (i, &(pos, word)) in occurrences.iter().enumerate() {
            counts[word_subset(word)] += 1;
            for &(_, other) in occurrences[i + 1..]
                .iter()
                .take_while(|&&(other_pos, _)| other_pos - pos <= self.radius)
            {
                if other != word {
                    counts[word_subset(word) | word_subset(other)] += 1;
                }
            }
        }
    }

    fn count_word_set(
        &self,
        corpus: &dyn CorpusAdapter,
        words: &[String],
        definition: &SegmentationDefinition,
        totals: (u64, u64),
        documents: u64,
    ) -> CoherenceResult<CountResult> {
        let mut doc_lengths = HashMap::new();
        let positions = corpus.request_word_positions_in_documents(words, &mut doc_lengths)?;
        debug!(
            words = words.len(),
            documents = positions.len(),
            radius = self.radius,
            "counting context window co-occurrences"
        );

        let mut counts = vec![0u64; subset_count(words.len())];
        for (doc, lists) in &positions {
            trace!(doc, "adding document");
            self.add_counts_from_document(lists, doc_lengths.get(doc).copied(), &mut counts);
        }

        let (tokens, pairs) = totals;
        let denominators = (0..counts.len())
            .map(|subset| if cardinality(subset) > 1 { pairs } else { tokens })
            .collect();

        Ok(CountResult {
            definition: definition.clone(),
            counts,
            denominators,
            document_count: documents,
        })
    }
}

impl FrequencyDeterminer for ContextWindowFrequencyDeterminer {
    fn determine_counts(
        &self,
        corpus: &dyn CorpusAdapter,
        word_sets: &[Vec<String>],
        definitions: &[SegmentationDefinition],
    ) -> CoherenceResult<Vec<CountResult>> {
        check_batch(word_sets, definitions)?;
        let histogram = corpus.document_size_histogram()?;
        let totals = self.totals(&histogram);
        let documents = document_count(&histogram);
        word_sets
            .iter()
            .zip(definitions)
            .map(|(words, definition)| {
                self.count_word_set(corpus, words, definition, totals, documents)
            })
            .collect()
    }
}
