// src/lib.rs
//! Topic coherence from corpus co-occurrence statistics.
//!
//! A topic's words are split into (condition, segment) pairs, the pairs'
//! co-occurrences are counted over a reference corpus, the counts become
//! probabilities and a confirmation measure turns them into one score:
//!
//! ```
//! use std::sync::Arc;
//! use coherence_core::{CoherenceConfig, CoherenceEngine, InMemoryCorpus};
//!
//! let corpus = InMemoryCorpus::from_texts(&["apple banana", "apple banana cherry", "cherry"]).unwrap();
//! let engine = CoherenceEngine::new(Arc::new(corpus), CoherenceConfig::default()).unwrap();
//! let score = engine.score_topic(&["apple", "banana"]).unwrap();
//! assert!((score - 1.5).abs() < 1e-9);
//! ```

pub mod aggregation;
pub mod calculation;
pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod probability;
pub mod weight;

pub use crate::aggregation::Aggregation;
pub use crate::calculation::{Calculation, VectorCreator, DEFAULT_EPSILON};
pub use crate::config::CoherenceConfig;
pub use crate::core::engine::{BatchScores, CoherenceEngine};
pub use crate::core::segmentation::SegmentationScheme;
pub use crate::core::types::{
    CountResult, DocId, SegmentationDefinition, SubsetIndex, SubsetProbabilities,
};
pub use crate::corpus::{CorpusAdapter, InMemoryCorpus, InMemoryCorpusBuilder};
pub use crate::error::{CoherenceError, CoherenceResult};
pub use crate::frequency::{FrequencyDeterminer, FrequencyMode};
pub use crate::weight::Weighter;
