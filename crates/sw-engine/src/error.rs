//! Engine error type.

use sw_score::ScoreError;
use thiserror::Error;

/// Errors raised by curve evaluation, time conversion, and performance setup.
///
/// None of these are transient: they report a bad query or a bad
/// configuration and are surfaced to the caller as soon as they are found.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Offset outside the curve domain.
    #[error("offset {offset} is outside the domain [{min}, {max}]")]
    Domain { offset: f64, min: f64, max: f64 },
    /// Offset outside the sub-domain of the piece asked to evaluate it.
    #[error("offset {offset} is outside the piece domain [{start}, {end}]")]
    OutsidePiece { offset: f64, start: f64, end: f64 },
    /// A span whose end precedes its beginning.
    #[error("end {end} precedes begin {begin}")]
    Ordering { begin: f64, end: f64 },
    /// Pieces must be appended with non-decreasing start offsets.
    #[error("piece starting at {start} added after a piece starting at {previous}")]
    PieceOrder { start: f64, previous: f64 },
    /// A performance needs at least one part.
    #[error("no parts to perform")]
    NoParts,
    /// Sample rate that is not a number of at least the minimum.
    #[error("{name} sample rate {value} must be a number of at least {min}")]
    SampleRate {
        name: &'static str,
        value: f64,
        min: f64,
    },
    /// A part with no instrument bound to it.
    #[error("no instrument resolved for part {0:?}")]
    MissingInstrument(String),
    /// Transition kind the engine cannot evaluate.
    #[error("{0} transitions are not supported")]
    Unsupported(&'static str),
    /// Tempo rate that would stall or reverse time conversion.
    #[error("rate {rate} at offset {offset} must be a positive number")]
    InvalidRate { offset: f64, rate: f64 },
    /// Performance length that is negative, not finite, or longer than
    /// [`MAX_PERFORMANCE_SECONDS`](crate::MAX_PERFORMANCE_SECONDS).
    #[error("performance length {0}s must be a finite number in [0, {max}]", max = crate::MAX_PERFORMANCE_SECONDS)]
    Duration(f64),
    /// Transition with a negative duration.
    #[error("transition duration {0} must not be negative")]
    NegativeDuration(f64),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl EngineError {
    /// Offset fell outside a curve or piece domain.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            EngineError::Domain { .. } | EngineError::OutsidePiece { .. }
        )
    }

    /// The performance could not be assembled from its inputs.
    pub fn is_unresolved_dependency(&self) -> bool {
        matches!(
            self,
            EngineError::NoParts | EngineError::SampleRate { .. } | EngineError::MissingInstrument(_)
        )
    }
}

pub type Result<T> = core::result::Result<T, EngineError>;
