// File: src/corpus/memory.rs
use crate::core::types::{DocId, DocumentSizeHistogram};
use crate::corpus::CorpusAdapter;
use crate::error::{CoherenceError, CoherenceResult};
use std::collections::{BTreeMap, HashMap};

/// Occurrences of one word: (document, ascending positions) per document.
type Postings = Vec<(DocId, Vec<usize>)>;

/// Collects tokenized documents into an [`InMemoryCorpus`].
#[derive(Default)]
pub struct InMemoryCorpusBuilder {
    doc_lengths: Vec<usize>,
    postings: HashMap<String, Postings>,
}

impl InMemoryCorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document and returns its id. Ids are assigned in insertion order.
    pub fn add_document<I, S>(&mut self, tokens: I) -> CoherenceResult<DocId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doc = DocId::try_from(self.doc_lengths.len())
            .map_err(|_| CoherenceError::Corpus("document id space exhausted".to_string()))?;

        let mut length = 0;
        for (pos, token) in tokens.into_iter().enumerate() {
            let postings = self.postings.entry(token.as_ref().to_string()).or_default();
            match postings.last_mut() {
                Some((last_doc, positions)) if *last_doc == doc => positions.push(pos),
                _ => postings.push((doc, vec![pos])),
            }
            length = pos + 1;
        }
        self.doc_lengths.push(length);
        Ok(doc)
    }

    pub fn build(self) -> InMemoryCorpus {
        InMemoryCorpus {
            doc_lengths: self.doc_lengths,
            postings: self.postings,
        }
    }
}

/// A positional inverted index held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCorpus {
    doc_lengths: Vec<usize>,
    postings: HashMap<String, Postings>,
}

impl InMemoryCorpus {
    /// Indexes documents given as whitespace separated text.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> CoherenceResult<Self> {
        let mut builder = InMemoryCorpusBuilder::new();
        for text in texts {
            builder.add_document(text.as_ref().split_whitespace())?;
        }
        Ok(builder.build())
    }

    pub fn document_count(&self) -> usize {
        self.doc_lengths.len()
    }
}

impl CorpusAdapter for InMemoryCorpus {
    fn document_size_histogram(&self) -> CoherenceResult<DocumentSizeHistogram> {
        let mut histogram: BTreeMap<usize, u64> = BTreeMap::new();
        for &length in &self.doc_lengths {
            *histogram.entry(length).or_insert(0) += 1;
        }
        Ok(histogram.into_iter().collect())
    }

    fn request_word_positions_in_documents(
        &self,
        words: &[String],
        doc_lengths: &mut HashMap<DocId, usize>,
    ) -> CoherenceResult<HashMap<DocId, Vec<Vec<usize>>>> {
        let mut positions: HashMap<DocId, Vec<Vec<usize>>> = HashMap::new();
        for (word_id, word) in words.iter().enumerate() {
            let Some(postings) = self.postings.get(word) else {
                continue;
            };
            for (doc, doc_positions) in postings {
                let lists = positions
                    .entry(*doc)
                    .or_insert_with(|| vec![Vec::new(); words.len()]);
                lists[word_id].extend_from_slice(doc_positions);
                doc_lengths.insert(*doc, self.doc_lengths[*doc as usize]);
            }
        }
        Ok(positions)
    }

    fn request_documents_with_words(&self, words: &[String]) -> CoherenceResult<Vec<Vec<DocId>>> {
        Ok(words
            .iter()
            .map(|word| {
                self.postings
                    .get(word)
                    .map(|postings| postings.iter().map(|(doc, _)| *doc).collect())
                    .unwrap_or_default()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> InMemoryCorpus {
        InMemoryCorpus::from_texts(&["A B C B A C C", "B B", "D A", ""]).unwrap()
    }

    #[test]
    fn histogram_counts_every_document_once() {
        let corpus = corpus();
        let histogram = corpus.document_size_histogram().unwrap();
        assert_eq!(histogram, vec![(0, 1), (2, 2), (7, 1)]);
        assert_eq!(crate::corpus::document_count(&histogram), 4);
        assert_eq!(corpus.document_count(), 4);
    }

    #[test]
    fn positions_are_grouped_per_document() {
        let corpus = corpus();
        let words = vec!["A".to_string(), "C".to_string(), "Z".to_string()];
        let mut lengths = HashMap::new();
        let positions = corpus
            .request_word_positions_in_documents(&words, &mut lengths)
            .unwrap();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[&0], vec![vec![0, 4], vec![2, 5, 6], vec![]]);
        assert_eq!(positions[&2], vec![vec![1], vec![], vec![]]);
        assert_eq!(lengths[&0], 7);
        assert_eq!(lengths[&2], 2);
        assert!(!lengths.contains_key(&1));
    }

    #[test]
    fn membership_matches_positions() {
        let corpus = corpus();
        let words = vec!["A".to_string(), "B".to_string(), "Z".to_string()];
        let direct = corpus.request_documents_with_words(&words).unwrap();
        assert_eq!(direct, vec![vec![0, 2], vec![0, 1], vec![]]);

        // The trait's default derives the same answer from positions.
        struct PositionsOnly(InMemoryCorpus);
        impl CorpusAdapter for PositionsOnly {
            fn document_size_histogram(&self) -> CoherenceResult<DocumentSizeHistogram> {
                self.0.document_size_histogram()
            }
            fn request_word_positions_in_documents(
                &self,
                words: &[String],
                doc_lengths: &mut HashMap<DocId, usize>,
            ) -> CoherenceResult<HashMap<DocId, Vec<Vec<usize>>>> {
                self.0.request_word_positions_in_documents(words, doc_lengths)
            }
        }
        let derived = PositionsOnly(corpus)
            .request_documents_with_words(&words)
            .unwrap();
        assert_eq!(derived, direct);
    }
}
