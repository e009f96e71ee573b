//! Continuous value curves built from profiles.

use sw_score::{Domain, Profile, Transition, ValueChange, MAX_OFFSET, MIN_OFFSET};

use crate::error::{EngineError, Result};
use crate::piecewise::{Evaluate, PiecewiseFunction};

/// Evaluator for one piece of a value curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// The same value everywhere in the piece.
    Constant(f64),
    /// Straight line from `base` at `start` to `target` at `end`, then flat.
    Ramp {
        start: f64,
        end: f64,
        base: f64,
        slope: f64,
        target: f64,
    },
}

impl Segment {
    /// Ramp from `base` at `start` reaching `target` after `duration`.
    ///
    /// `duration` must be positive.
    pub fn ramp(start: f64, base: f64, target: f64, duration: f64) -> Self {
        Segment::Ramp {
            start,
            end: start + duration,
            base,
            slope: (target - base) / duration,
            target,
        }
    }

    /// Segment implementing `change`, given the value in effect at its offset.
    fn for_change(change: &ValueChange<f64>, previous: f64) -> Result<Self> {
        match change.transition {
            Transition::Immediate => Ok(Segment::Constant(change.value)),
            Transition::Linear(duration) if !(duration >= 0.0) => {
                Err(EngineError::NegativeDuration(duration))
            }
            Transition::Linear(duration) if duration == 0.0 => Ok(Segment::Constant(change.value)),
            Transition::Linear(duration) => {
                Ok(Segment::ramp(change.offset, previous, change.value, duration))
            }
            Transition::Sigmoid(_) => Err(EngineError::Unsupported(change.transition.name())),
        }
    }
}

impl Evaluate for Segment {
    fn evaluate(&self, offset: f64) -> Result<f64> {
        match *self {
            Segment::Constant(value) => Ok(value),
            Segment::Ramp {
                start,
                end,
                base,
                slope,
                target,
            } => {
                if !(start..=MAX_OFFSET).contains(&offset) {
                    return Err(EngineError::OutsidePiece {
                        offset,
                        start,
                        end: MAX_OFFSET,
                    });
                }
                if offset < end {
                    Ok(base + slope * (offset - start))
                } else {
                    Ok(target)
                }
            }
        }
    }
}

/// A scalar profile evaluated as a continuous function of offset.
///
/// The start value covers the whole domain; each change adds a piece from
/// its offset to `MAX_OFFSET`. A linear change ramps from whatever value the
/// curve had at its offset when the curve was built.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueComputer {
    function: PiecewiseFunction<Segment>,
}

impl ValueComputer {
    pub const DOMAIN_MIN: f64 = MIN_OFFSET;
    pub const DOMAIN_MAX: f64 = MAX_OFFSET;

    /// Build the curve for `profile`.
    ///
    /// Fails on change offsets outside the domain, negative durations, and
    /// sigmoid transitions.
    pub fn new(profile: &Profile<f64>) -> Result<Self> {
        let mut function = PiecewiseFunction::full(Segment::Constant(profile.start_value));

        for change in profile.changes() {
            let previous = function.evaluate_at(change.offset)?;
            let segment = Segment::for_change(change, previous)?;
            function.add_piece(Domain::from_offset(change.offset), segment)?;
        }

        Ok(Self { function })
    }

    /// A curve that is `value` everywhere.
    pub fn constant(value: f64) -> Self {
        Self {
            function: PiecewiseFunction::full(Segment::Constant(value)),
        }
    }

    pub fn value_at(&self, offset: f64) -> Result<f64> {
        self.function.evaluate_at(offset)
    }

    pub fn domain_min(&self) -> f64 {
        Self::DOMAIN_MIN
    }

    pub fn domain_max(&self) -> f64 {
        Self::DOMAIN_MAX
    }

    /// Number of pieces, one more than the number of changes.
    pub fn piece_count(&self) -> usize {
        self.function.len()
    }
}
