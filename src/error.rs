//! Definition of errors.

use thiserror::Error;

pub type Result<T, E = HmmError> = std::result::Result<T, E>;

/// Errors raised while building a model, loading data or scoring a batch.
#[derive(Error, Debug)]
pub enum HmmError {
    /// A tag of the tag set never occurs in the training data, so its
    /// transition row has no denominator.
    #[error("tag {tag:?} has no training occurrences, its transition row is undefined")]
    Configuration { tag: String },

    #[error("invalid value for {name}: {msg}")]
    InvalidOption { name: &'static str, msg: String },

    #[error("batch has {observations} observation sequences but {references} reference sequences")]
    BatchMismatch {
        observations: usize,
        references: usize,
    },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HmmError {
    pub(crate) fn invalid_option<S>(name: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidOption {
            name,
            msg: msg.into(),
        }
    }
}

/// Reasons a single observation sequence could not be tagged.
///
/// These are recoverable: batch evaluation records them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DecodeError {
    #[error("empty observation sequence")]
    EmptySequence,

    /// Every tag has zero probability at `position`. A position equal to the
    /// sequence length means no tag could terminate the sequence.
    #[error("no tag path with non-zero probability reaches position {position}")]
    NoViablePath { position: usize },

    #[error("predicted {predicted} tags for a reference of {reference} tags")]
    LengthMismatch { reference: usize, predicted: usize },

    /// The observation sequence and its reference differ in length, so it was
    /// never decoded.
    #[error("{observed} observations for a reference of {reference} tags")]
    ObservationMismatch { reference: usize, observed: usize },
}
