// File: src/corpus/mod.rs
//! Access to the reference corpus.
//!
//! The coherence pipeline never reads documents directly. Everything it needs
//! (document lengths, word positions, document membership) comes through a
//! [`CorpusAdapter`], which may be backed by an inverted index or by the
//! [`InMemoryCorpus`] shipped with this crate.

pub mod memory;

pub use memory::{InMemoryCorpus, InMemoryCorpusBuilder};

use crate::core::types::{DocId, DocumentSizeHistogram};
use crate::error::CoherenceResult;
use std::collections::HashMap;

/// Read-only queries the coherence pipeline issues against a corpus.
///
/// Implementations are shared between topics scored in parallel, so every
/// query takes `&self`.
pub trait CorpusAdapter: Send + Sync {
    /// Every distinct document length with the number of documents having it.
    /// The frequencies sum to the number of documents in the corpus.
    fn document_size_histogram(&self) -> CoherenceResult<DocumentSizeHistogram>;

    /// Positions of `words` in every document containing at least one of them.
    ///
    /// Each returned entry holds one ascending position list per requested word,
    /// empty when the word does not occur in that document. The length of every
    /// returned document is written to `doc_lengths`.
    fn request_word_positions_in_documents(
        &self,
        words: &[String],
        doc_lengths: &mut HashMap<DocId, usize>,
    ) -> CoherenceResult<HashMap<DocId, Vec<Vec<usize>>>>;

    /// For each of `words`, the ascending ids of the documents containing it.
    fn request_documents_with_words(&self, words: &[String]) -> CoherenceResult<Vec<Vec<DocId>>> {
        let mut doc_lengths = HashMap::new();
        let positions = self.request_word_positions_in_documents(words, &mut doc_lengths)?;
        let mut documents = vec![Vec::new(); words.len()];
        for (&doc, lists) in &positions {
            for (word, list) in lists.iter().enumerate().take(words.len()) {
                if !list.is_empty() {
                    documents[word].push(doc);
                }
            }
        }
        for docs in documents.iter_mut() {
            docs.sort_unstable();
        }
        Ok(documents)
    }

    /// Releases resources held by the adapter. Called by the owner once all
    /// topics are scored.
    fn close(&self) -> CoherenceResult<()> {
        Ok(())
    }
}

/// Number of documents described by a histogram.
pub fn document_count(histogram: &[(usize, u64)]) -> u64 {
    histogram.iter().map(|&(_, freq)| freq).sum()
}
