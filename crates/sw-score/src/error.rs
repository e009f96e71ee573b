//! Error type for score construction.

use thiserror::Error;

/// Errors raised while building or validating score data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// Tempo with a non-positive or non-finite rate.
    #[error("invalid tempo: {beats_per_minute} BPM with beat duration {beat_duration}")]
    InvalidTempo {
        beats_per_minute: f64,
        beat_duration: f64,
    },
    /// Offset outside the representable offset domain.
    #[error("offset {0} is outside the offset domain")]
    OffsetOutOfRange(f64),
    /// Note or transition duration below zero (or NaN).
    #[error("duration {0} must be a non-negative number")]
    NegativeDuration(f64),
    /// Pitch name that does not parse.
    #[error("unknown pitch name {0:?}")]
    UnknownPitch(String),
    /// Identifier longer than the fixed-capacity name storage.
    #[error("name {0:?} is longer than {max} bytes", max = crate::MAX_NAME_LEN)]
    NameTooLong(String),
    /// Two parts share one id.
    #[error("duplicate part id {0:?}")]
    DuplicatePart(String),
}

pub type Result<T> = core::result::Result<T, ScoreError>;
