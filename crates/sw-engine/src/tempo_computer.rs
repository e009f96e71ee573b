//! Tempo as a notes-per-second rate over the offset axis.

use sw_score::{Profile, Tempo};

use crate::error::{EngineError, Result};
use crate::value_computer::ValueComputer;

/// Evaluates a tempo profile as a rate in note-length units per second.
///
/// Each tempo is converted to its rate before the curve is built, so a
/// linear tempo change interpolates the rate rather than the BPM value.
#[derive(Clone, Debug, PartialEq)]
pub struct TempoComputer {
    rate: ValueComputer,
}

impl TempoComputer {
    /// Build the rate curve. Every tempo in the profile must have a positive rate.
    pub fn new(profile: &Profile<Tempo>) -> Result<Self> {
        let rates = profile.map(|tempo| tempo.notes_per_second());
        check_rate(f64::NEG_INFINITY, rates.start_value)?;
        for change in rates.changes() {
            check_rate(change.offset, change.value)?;
        }
        Ok(Self {
            rate: ValueComputer::new(&rates)?,
        })
    }

    /// A single unchanging tempo.
    pub fn constant(tempo: Tempo) -> Result<Self> {
        Self::new(&Profile::new(tempo))
    }

    pub fn notes_per_second_at(&self, offset: f64) -> Result<f64> {
        self.rate.value_at(offset)
    }
}

fn check_rate(offset: f64, rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidRate { offset, rate })
    }
}
