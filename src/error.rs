// File: src/error.rs
//! Error types for the coherence pipeline.

use thiserror::Error;

/// Errors that can occur while scoring a topic.
#[derive(Debug, Error)]
pub enum CoherenceError {
    /// Malformed topic, window parameter or aggregation input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The corpus reported zero documents.
    #[error("The corpus contains no documents")]
    EmptyCorpus,

    /// A failure while scoring one topic of a batch.
    #[error("Topic #{topic} failed: {source}")]
    Topic {
        /// Position of the topic inside the batch
        topic: usize,
        /// The underlying failure
        #[source]
        source: Box<CoherenceError>,
    },

    /// The corpus adapter could not answer a query.
    #[error("Corpus adapter error: {0}")]
    Corpus(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoherenceError {
    /// Labels this error with the batch position of the topic that caused it.
    pub fn for_topic(self, topic: usize) -> Self {
        CoherenceError::Topic {
            topic,
            source: Box::new(self),
        }
    }
}

/// Result alias used throughout the crate.
pub type CoherenceResult<T> = Result<T, CoherenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_label_wraps_source() {
        let err = CoherenceError::EmptyCorpus.for_topic(3);
        assert_eq!(
            err.to_string(),
            "Topic #3 failed: The corpus contains no documents"
        );
        match err {
            CoherenceError::Topic { topic, source } => {
                assert_eq!(topic, 3);
                assert!(matches!(*source, CoherenceError::EmptyCorpus));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: CoherenceError = parse.unwrap_err().into();
        assert!(matches!(err, CoherenceError::Json(_)));
    }
}
