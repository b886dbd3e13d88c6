// File: src/frequency/sliding_window.rs
use crate::core::types::{word_subset, CountResult, SegmentationDefinition, SubsetIndex};
use crate::corpus::{document_count, CorpusAdapter};
use crate::error::{CoherenceError, CoherenceResult};
use crate::frequency::{check_batch, expand_signatures, FrequencyDeterminer};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Slides a window of `width` tokens over every document, one token at a time,
/// and counts the windows containing all words of a subset.
///
/// A document of length `len` yields `len - width + 1` windows, or a single
/// window when it is not longer than `width`. Empty documents yield none.
#[derive(Debug, Clone, Copy)]
pub struct SlidingWindowFrequencyDeterminer {
    width: usize,
}

impl SlidingWindowFrequencyDeterminer {
    pub fn new(width: usize) -> CoherenceResult<Self> {
        if width == 0 {
            return Err(CoherenceError::InvalidInput(
                "sliding window width must be at least 1".to_string(),
            ));
        }
        Ok(Self { width })
    }

    pub fn windows_in_document(&self, doc_length: usize) -> u64 {
        match doc_length {
            0 => 0,
            len if len <= self.width => 1,
            len => (len - self.width + 1) as u64,
        }
    }

    /// Records the word signature of every window of one document.
    pub(crate) fn add_signatures_from_document(
        &self,
        positions: &[Vec<usize>],
        doc_length: usize,
        signature_counts: &mut HashMap<SubsetIndex, u64>,
    ) {
        let mut occurrences: Vec<(usize, usize)> = positions
            .iter()
            .enumerate()
            .flat_map(|(word, list)| list.iter().map(move |&pos| (pos, word)))
            .filter(|&(pos, _)| pos < doc_length)
            .collect();
        if occurrences.is_empty() {
            return;
        }
        occurrences.sort_unstable();

        if doc_length <= self.width {
            let signature = occurrences
                .iter()
                .fold(0, |sig, &(_, word)| sig | word_subset(word));
            *signature_counts.entry(signature).or_insert(0) += 1;
            return;
        }

        let mut in_window = vec![0usize; positions.len()];
        let mut signature: SubsetIndex = 0;
        let (mut entering, mut leaving) = (0, 0);
        for start in 0..=(doc_length - self.width) {
            let end = start + self.width;
            while entering < occurrences.len() && occurrences[entering].0 < end {
                let word = occurrences[entering].1;
                in_window[word] += 1;
                signature |= word_subset(word);
                entering += 1;
            }
            while leaving < occurrences.len() && occurrences[leaving].0 < start {
                let word = occurrences[leaving].1;
                in_window[word] -= 1;
                if in_window[word] == 0 {
                    signature &= !word_subset(word);
                }
                leaving += 1;
            }
            if signature != 0 {
                *signature_counts.entry(signature).or_insert(0) += 1;
            }
        }
    }

    fn count_word_set(
        &self,
        corpus: &dyn CorpusAdapter,
        words: &[String],
        definition: &SegmentationDefinition,
        windows: u64,
        documents: u64,
    ) -> CoherenceResult<CountResult> {
        let needed = definition.needed_subsets(words.len());
        let mut doc_lengths = HashMap::new();
        let positions = corpus.request_word_positions_in_documents(words, &mut doc_lengths)?;
        debug!(
            words = words.len(),
            documents = positions.len(),
            width = self.width,
            "counting sliding window co-occurrences"
        );

        let mut signature_counts = HashMap::new();
        for (doc, lists) in &positions {
            let length = *doc_lengths.get(doc).ok_or_else(|| {
                CoherenceError::Corpus(format!("no length reported for document {doc}"))
            })?;
            trace!(doc, length, "sliding over document");
            self.add_signatures_from_document(lists, length, &mut signature_counts);
        }

        Ok(CountResult {
            definition: definition.clone(),
            counts: expand_signatures(&signature_counts, &needed),
            denominators: vec![windows; needed.len()],
            document_count: documents,
        })
    }
}

impl FrequencyDeterminer for SlidingWindowFrequencyDeterminer {
    fn determine_counts(
        &self,
        corpus: &dyn CorpusAdapter,
        word_sets: &[Vec<String>],
        definitions: &[SegmentationDefinition],
    ) -> CoherenceResult<Vec<CountResult>> {
        check_batch(word_sets, definitions)?;
        let histogram = corpus.document_size_histogram()?;
        let windows: u64 = histogram
            .iter()
            .map(|&(length, freq)| self.windows_in_document(length) * freq)
            .sum();
        let documents = document_count(&histogram);
        word_sets
            .iter()
            .zip(definitions)
            .map(|(words, definition)| {
                self.count_word_set(corpus, words, definition, windows, documents)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segmentation::SegmentationScheme;
    use crate::corpus::InMemoryCorpus;

    fn count(texts: &[&str], topic: &[&str], width: usize) -> CountResult {
        let corpus = InMemoryCorpus::from_texts(texts).unwrap();
        let words: Vec<String> = topic.iter().map(|w| w.to_string()).collect();
        let definition = SegmentationScheme::OneAny.generate(topic.len()).unwrap();
        SlidingWindowFrequencyDeterminer::new(width)
            .unwrap()
            .determine_counts(&corpus, &[words], &[definition])
            .unwrap()
            .remove(0)
    }

    #[test]
    fn window_counts_per_document_length() {
        let determiner = SlidingWindowFrequencyDeterminer::new(3).unwrap();
        assert_eq!(determiner.windows_in_document(0), 0);
        assert_eq!(determiner.windows_in_document(2), 1);
        assert_eq!(determiner.windows_in_document(3), 1);
        assert_eq!(determiner.windows_in_document(7), 5);
    }

    #[test]
    fn counts_windows_holding_all_words() {
        // Windows of 3 over A B C B A C C:
        // [A B C] [B C B] [C B A] [B A C] [A C C]
        let result = count(&["A B C B A C C"], &["A", "B", "C"], 3);
        assert_eq!(result.counts, vec![0, 4, 4, 3, 5, 4, 4, 3]);
        assert_eq!(result.denominators, vec![5; 8]);
    }

    #[test]
    fn short_documents_are_a_single_window() {
        let result = count(&["A B C", "C"], &["A", "B", "C"], 5);
        assert_eq!(result.counts, vec![0, 1, 1, 1, 2, 1, 1, 1]);
        assert_eq!(result.denominators, vec![2; 8]);
    }

    #[test]
    fn documents_without_topic_words_only_add_windows() {
        let result = count(&["A x x x x B", "x x x x"], &["A", "B"], 2);
        // 5 windows in the first document, 3 in the second.
        assert_eq!(result.denominators, vec![8; 4]);
        assert_eq!(result.counts, vec![0, 1, 1, 0]);
    }
}
