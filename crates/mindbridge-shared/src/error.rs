use thiserror::Error;

/// Rejected user-supplied values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Mood must be between 1 and 5, got {0}")]
    MoodOutOfRange(i64),

    #[error("Mood is not a number: {0:?}")]
    MoodNotANumber(String),

    #[error("Unsupported language code: {0:?}")]
    UnknownLanguage(String),

    #[error("Unknown history filter: {0:?}")]
    UnknownFilter(String),
}
