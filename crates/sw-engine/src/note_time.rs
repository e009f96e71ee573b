//! Conversion between note offsets and elapsed time.
//!
//! The tempo rate is an arbitrary piecewise function, so there is no
//! closed-form integral to lean on. Instead the rate is integrated
//! numerically with fixed time steps of one sample period: each step
//! advances the note cursor by `rate(note) * sample_period`. The final
//! partial step is interpolated, which keeps the error of any conversion
//! within one sample period.

use crate::conductor::{check_sample_rate, check_seconds};
use crate::error::{EngineError, Result};
use crate::tempo_computer::TempoComputer;

/// Integrates a tempo curve to convert note spans into seconds and back.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteTimeConverter {
    tempo: TempoComputer,
    sample_rate: f64,
    sample_period: f64,
}

impl NoteTimeConverter {
    /// `sample_rate` is the integration rate in steps per second (at least
    /// [`MIN_SAMPLE_RATE`](crate::MIN_SAMPLE_RATE)).
    pub fn new(tempo: TempoComputer, sample_rate: f64) -> Result<Self> {
        check_sample_rate("time conversion", sample_rate)?;
        Ok(Self {
            tempo,
            sample_rate,
            sample_period: 1.0 / sample_rate,
        })
    }

    pub fn tempo(&self) -> &TempoComputer {
        &self.tempo
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    /// Note-length units covered in one sample period starting at `note`.
    ///
    /// Fails if the step is too small to move `note` forward at `f64`
    /// precision, since integration from there could never finish.
    pub fn notes_per_sample_at(&self, note: f64) -> Result<f64> {
        let step = self.tempo.notes_per_second_at(note)? * self.sample_period;
        if step.is_finite() && note + step > note {
            Ok(step)
        } else {
            Err(EngineError::InvalidRate {
                offset: note,
                rate: step * self.sample_rate,
            })
        }
    }

    /// Seconds taken to play from `note_begin` to `note_end`.
    ///
    /// Fails once the running total passes
    /// [`MAX_PERFORMANCE_SECONDS`](crate::MAX_PERFORMANCE_SECONDS).
    pub fn time_elapsed(&self, note_begin: f64, note_end: f64) -> Result<f64> {
        if !(note_end >= note_begin) {
            return Err(EngineError::Ordering {
                begin: note_begin,
                end: note_end,
            });
        }

        let mut note = note_begin;
        let mut time = 0.0;
        loop {
            let step = self.notes_per_sample_at(note)?;
            if note + step >= note_end {
                return Ok(time + (note_end - note) / step * self.sample_period);
            }
            note += step;
            time += self.sample_period;
            check_seconds(time)?;
        }
    }

    /// Note offset reached after playing for `seconds` from `note_begin`.
    pub fn note_offset_after(&self, note_begin: f64, seconds: f64) -> Result<f64> {
        if seconds < 0.0 {
            return Err(EngineError::Ordering {
                begin: 0.0,
                end: seconds,
            });
        }
        check_seconds(seconds)?;

        let mut note = note_begin;
        let mut remaining = seconds;
        while remaining > 0.0 {
            let step = self.notes_per_sample_at(note)?;
            if remaining < self.sample_period {
                return Ok(note + step * remaining / self.sample_period);
            }
            note += step;
            remaining -= self.sample_period;
        }
        Ok(note)
    }

    /// Seconds from `origin` to each of `offsets`, which must be sorted and
    /// not precede `origin`.
    pub fn time_map(&self, origin: f64, offsets: &[f64]) -> Result<Vec<f64>> {
        let mut times = Vec::with_capacity(offsets.len());
        let mut previous = origin;
        let mut elapsed = 0.0;
        for &offset in offsets {
            elapsed += self.time_elapsed(previous, offset)?;
            times.push(elapsed);
            previous = offset;
        }
        Ok(times)
    }
}
