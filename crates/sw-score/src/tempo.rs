//! Tempo: beats per minute plus the note length of one beat.

use crate::error::{Result, ScoreError};

/// A tempo marking.
///
/// `beat_duration` is the length of one beat in note-length units, so a
/// quarter-note beat is 0.25.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tempo {
    pub beats_per_minute: f64,
    pub beat_duration: f64,
}

impl Tempo {
    /// Create a tempo, rejecting non-positive or non-finite values.
    pub fn new(beats_per_minute: f64, beat_duration: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(beats_per_minute) || !valid(beat_duration) {
            return Err(ScoreError::InvalidTempo {
                beats_per_minute,
                beat_duration,
            });
        }
        Ok(Self {
            beats_per_minute,
            beat_duration,
        })
    }

    /// Tempo with a quarter-note beat.
    pub const fn quarter(beats_per_minute: f64) -> Self {
        Self {
            beats_per_minute,
            beat_duration: 0.25,
        }
    }

    /// Rate of progress through the score, in note-length units per second.
    pub fn notes_per_second(&self) -> f64 {
        self.beats_per_minute / 60.0 * self.beat_duration
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::quarter(120.0)
    }
}
