use std::io;

use thiserror::Error;

use crate::classifier::LabelId;

/// Errors produced by the corpus, its persistence layer and its configuration.
#[derive(Debug, Error)]
pub enum BowError {
    /// Reading or writing a persisted corpus failed.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// The persisted JSON record could not be parsed or written.
    #[error("malformed json record: {0}")]
    Json(#[from] serde_json::Error),

    /// The persisted CBOR record could not be parsed or written.
    #[error("malformed cbor record: {0}")]
    Cbor(#[from] serde_cbor::Error),

    /// The record parsed, but its fields contradict each other.
    #[error("corrupted record: {0}")]
    Corrupted(String),

    /// A label ID outside `[0, label_count)` was passed in.
    #[error("label id {label} is out of range (label count {label_count})")]
    InvalidLabel { label: LabelId, label_count: usize },

    /// A document was accumulated without any label.
    #[error("a document must carry at least one label")]
    EmptyLabelSet,

    /// A corpus was created with no labels.
    #[error("a corpus needs at least one label")]
    NoLabels,

    /// The counters no longer agree with each other. This is a bug signal,
    /// never a user error.
    #[error("internal consistency violated: {0}")]
    Inconsistency(String),

    /// The stop-word configuration could not be parsed.
    #[error("invalid filter configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl BowError {
    /// `true` for errors that indicate corrupted internal counters.
    pub fn is_internal(&self) -> bool {
        matches!(self, BowError::Inconsistency(_))
    }
}

pub type Result<T> = std::result::Result<T, BowError>;
