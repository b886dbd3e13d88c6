// File: src/frequency/document.rs
use crate::core::types::{word_subset, CountResult, DocId, SegmentationDefinition, SubsetIndex};
use crate::corpus::{document_count, CorpusAdapter};
use crate::error::CoherenceResult;
use crate::frequency::{check_batch, expand_signatures, FrequencyDeterminer};
use std::collections::HashMap;
use tracing::debug;

/// Counts, for every needed subset, the documents containing all of its words.
/// Every denominator is the number of documents in the corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFrequencyDeterminer;

impl DocumentFrequencyDeterminer {
    fn count_word_set(
        &self,
        corpus: &dyn CorpusAdapter,
        words: &[String],
        definition: &SegmentationDefinition,
        documents: u64,
    ) -> CoherenceResult<CountResult> {
        let needed = definition.needed_subsets(words.len());
        let doc_sets = corpus.request_documents_with_words(words)?;

        let mut signatures: HashMap<DocId, SubsetIndex> = HashMap::new();
        for (word, docs) in doc_sets.iter().enumerate().take(words.len()) {
            for &doc in docs {
                *signatures.entry(doc).or_insert(0) |= word_subset(word);
            }
        }
        debug!(
            words = words.len(),
            documents = signatures.len(),
            "counting document co-occurrences"
        );

        let mut signature_counts: HashMap<SubsetIndex, u64> = HashMap::new();
        for &signature in signatures.values() {
            *signature_counts.entry(signature).or_insert(0) += 1;
        }

        Ok(CountResult {
            definition: definition.clone(),
            counts: expand_signatures(&signature_counts, &needed),
            denominators: vec![documents; needed.len()],
            document_count: documents,
        })
    }
}

impl FrequencyDeterminer for DocumentFrequencyDeterminer {
    fn determine_counts(
        &self,
        corpus: &dyn CorpusAdapter,
        word_sets: &[Vec<String>],
        definitions: &[SegmentationDefinition],
    ) -> CoherenceResult<Vec<CountResult>> {
        check_batch(word_sets, definitions)?;
        let documents = document_count(&corpus.document_size_histogram()?);
        word_sets
            .iter()
            .zip(definitions)
            .map(|(words, definition)| self.count_word_set(corpus, words, definition, documents))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segmentation::SegmentationScheme;
    use crate::corpus::InMemoryCorpus;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn count(corpus: &InMemoryCorpus, topic: &[&str], scheme: SegmentationScheme) -> CountResult {
        let definition = scheme.generate(topic.len()).unwrap();
        DocumentFrequencyDeterminer
            .determine_counts(corpus, &[words(topic)], &[definition])
            .unwrap()
            .remove(0)
    }

    #[test]
    fn counts_documents_containing_every_word() {
        // w1 in all three documents, w2 and w3 in the last two.
        let corpus = InMemoryCorpus::from_texts(&["w1 x", "w1 w2 w3", "w3 w1 w2 w2"]).unwrap();
        let result = count(&corpus, &["w1", "w2", "w3"], SegmentationScheme::OneAny);
        assert_eq!(result.counts, vec![0, 3, 2, 2, 2, 2, 2, 2]);
        assert_eq!(result.denominators, vec![3; 8]);
        assert_eq!(result.document_count, 3);
    }

    #[test]
    fn only_needed_subsets_are_counted() {
        let corpus = InMemoryCorpus::from_texts(&["a b c", "a b"]).unwrap();
        let result = count(&corpus, &["a", "b", "c"], SegmentationScheme::OneOne);
        // One-one never needs the triple.
        assert_eq!(result.counts, vec![0, 2, 2, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn unknown_words_count_zero() {
        let corpus = InMemoryCorpus::from_texts(&["a b", "b"]).unwrap();
        let result = count(&corpus, &["a", "zzz"], SegmentationScheme::OneOne);
        assert_eq!(result.counts, vec![0, 1, 0, 0]);
        assert_eq!(result.denominators, vec![2; 4]);
    }

    #[test]
    fn shrinking_a_subset_never_lowers_its_count() {
        let corpus = InMemoryCorpus::from_texts(&[
            "a b c d", "a c", "b d", "a b d", "c", "d a", "b c d",
        ])
        .unwrap();
        let result = count(&corpus, &["a", "b", "c", "d"], SegmentationScheme::OneAny);
        for superset in 1..result.counts.len() {
            for subset in 1..result.counts.len() {
                if subset & superset == subset {
                    assert!(
                        result.counts[subset] >= result.counts[superset],
                        "count({subset:b}) < count({superset:b})"
                    );
                }
            }
        }
    }

    #[test]
    fn batches_keep_topic_order() {
        let corpus = InMemoryCorpus::from_texts(&["a b", "c d", "c"]).unwrap();
        let topics = vec![words(&["a", "b"]), words(&["c", "d"])];
        let definitions = vec![SegmentationScheme::OneOne.generate(2).unwrap(); 2];
        let results = DocumentFrequencyDeterminer
            .determine_counts(&corpus, &topics, &definitions)
            .unwrap();
        assert_eq!(results[0].counts, vec![0, 1, 1, 1]);
        assert_eq!(results[1].counts, vec![0, 2, 1, 1]);
    }
}
