// File: src/core/engine.rs
use crate::calculation::VectorCreator;
use crate::config::CoherenceConfig;
use crate::core::types::{validate_words, SegmentationDefinition, SubsetProbabilities};
use crate::corpus::CorpusAdapter;
use crate::error::{CoherenceError, CoherenceResult};
use crate::frequency::FrequencyDeterminer;
use crate::probability::estimate;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Scores of a batch of topics.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchScores {
    /// One score per topic, in input order.
    pub scores: Vec<f64>,
    /// Arithmetic mean of `scores`.
    pub mean: f64,
}

/// Runs the coherence pipeline for topics against one corpus.
///
/// The engine holds no per-topic state, so topics can be scored from several
/// threads at once.
pub struct CoherenceEngine {
    corpus: Arc<dyn CorpusAdapter>,
    config: CoherenceConfig,
    determiner: Box<dyn FrequencyDeterminer>,
}

impl CoherenceEngine {
    pub fn new(corpus: Arc<dyn CorpusAdapter>, config: CoherenceConfig) -> CoherenceResult<Self> {
        config.validate()?;
        let determiner = config.frequency.determiner()?;
        Ok(Self {
            corpus,
            config,
            determiner,
        })
    }

    pub fn config(&self) -> &CoherenceConfig {
        &self.config
    }

    /// Coherence of one topic.
    pub fn score_topic<S: AsRef<str>>(&self, words: &[S]) -> CoherenceResult<f64> {
        let words = owned_words(words)?;
        let definition = self.config.segmentation.generate(words.len())?;
        let probabilities = self.probabilities(&words, definition)?;

        let values = self
            .config
            .calculation
            .confirm(&probabilities, self.config.epsilon);
        let weights = self.config.weighter.weights(&probabilities)?;
        let score = self.config.aggregation.aggregate(&values, &weights)?;
        debug!(
            words = words.len(),
            pairs = values.len(),
            calculation = self.config.calculation.name(),
            score,
            "scored topic"
        );
        Ok(score)
    }

    /// One context vector per topic word, built with the configured
    /// calculation. Reducing them to a score is up to the caller.
    pub fn topic_vectors<S: AsRef<str>>(&self, words: &[S]) -> CoherenceResult<Vec<Vec<f64>>> {
        let words = owned_words(words)?;
        let creator = VectorCreator::new(self.config.calculation);
        let definition = creator.definition(words.len())?;
        let probabilities = self.probabilities(&words, definition)?;
        creator.create_vectors(&probabilities.probabilities, words.len(), self.config.epsilon)
    }

    /// Scores independent topics in parallel. The first failure aborts the
    /// batch and names the topic's position.
    pub fn score_topics<S>(&self, topics: &[Vec<S>]) -> CoherenceResult<BatchScores>
    where
        S: AsRef<str> + Sync,
    {
        if topics.is_empty() {
            return Err(CoherenceError::InvalidInput("no topics to score".to_string()));
        }
        let scores = topics
            .par_iter()
            .enumerate()
            .map(|(topic, words)| {
                self.score_topic(words.as_slice())
                    .map_err(|e| e.for_topic(topic))
            })
            .collect::<CoherenceResult<Vec<f64>>>()?;
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(BatchScores { scores, mean })
    }

    /// Releases the corpus adapter's resources.
    pub fn close(&self) -> CoherenceResult<()> {
        self.corpus.close()
    }

    fn probabilities(
        &self,
        words: &[String],
        definition: SegmentationDefinition,
    ) -> CoherenceResult<SubsetProbabilities> {
        let counts = self
            .determiner
            .determine_counts(
                self.corpus.as_ref(),
                std::slice::from_ref(&words.to_vec()),
                std::slice::from_ref(&definition),
            )?
            .pop()
            .ok_or_else(|| CoherenceError::Corpus("no counts produced".to_string()))?;
        estimate(&counts)
    }
}

fn owned_words<S: AsRef<str>>(words: &[S]) -> CoherenceResult<Vec<String>> {
    validate_words(words)?;
    Ok(words.iter().map(|w| w.as_ref().to_string()).collect())
}
