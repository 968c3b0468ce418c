use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmotionArcError {
    #[error("parse error while {context}: {message}")]
    Parse {
        context: &'static str,
        message: String,
    },
    #[error("document '{name}' has no cues; duration is undefined")]
    EmptyDocument { name: String },
    #[error("scorer '{scorer}' failed: {message}")]
    Scorer { scorer: String, message: String },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl EmotionArcError {
    pub(crate) fn parse(context: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            context,
            message: message.into(),
        }
    }

    pub(crate) fn empty_document(name: impl Into<String>) -> Self {
        Self::EmptyDocument { name: name.into() }
    }

    /// Wraps a failure reported by an [`crate::EmotionScorer`] implementation.
    pub fn scorer(scorer: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Scorer {
            scorer: scorer.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
