//! Headless controller for scorewright.
//!
//! Resolves a score's instrument configuration into instruments, renders
//! performances offline, and encodes them as WAV. Both the CLI and the
//! integration tests go through this crate.

pub mod demos;
mod instruments;
mod wav;

use log::info;
use thiserror::Error;

use sw_engine::{Arrangement, Conductor, ConductorSettings, EngineError};
use sw_score::{Score, ScoreError};

pub use instruments::{resolve_instrument, DEFAULT_GAIN, INSTRUMENT_NAMES};
pub use wav::{quantize, samples_to_wav, write_wav};

/// Errors raised while preparing or rendering a performance.
#[derive(Debug, Error)]
pub enum MasterError {
    /// Part configuration names no known instrument.
    #[error("unknown instrument {0:?}")]
    UnknownInstrument(String),
    /// Sample rate that cannot be written to a WAV header.
    #[error("sample rate {0} cannot be encoded as WAV")]
    WavSampleRate(f64),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Owns a score and renders it.
pub struct Controller {
    score: Score,
}

impl Controller {
    pub fn new(score: Score) -> Self {
        Self { score }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Pair every part with the instrument its configuration names.
    pub fn arrangement(&self, sample_rate: f64) -> Result<Arrangement, MasterError> {
        let mut arrangement = Arrangement::new(self.score.clone());
        for part in &self.score.parts {
            arrangement.bind(part.id, resolve_instrument(&part.instrument, sample_rate)?);
        }
        Ok(arrangement)
    }

    /// Build a conductor ready to perform from the start.
    pub fn conductor(&self, settings: ConductorSettings) -> Result<Conductor, MasterError> {
        let arrangement = self.arrangement(settings.rendering_sample_rate)?;
        Ok(Conductor::new(arrangement, settings)?)
    }

    /// Render the whole score plus `lead_out` seconds of tail.
    pub fn render(&self, settings: ConductorSettings, lead_out: f64) -> Result<Vec<f64>, MasterError> {
        let mut conductor = self.conductor(settings)?;
        let samples = conductor.perform(lead_out)?;
        info!(
            "rendered {} samples ({:.2}s) from {} parts",
            samples.len(),
            samples.len() as f64 / settings.rendering_sample_rate,
            conductor.performers().len()
        );
        Ok(samples)
    }

    /// Render and encode as 16-bit mono WAV.
    pub fn render_to_wav(&self, settings: ConductorSettings, lead_out: f64) -> Result<Vec<u8>, MasterError> {
        let rate = settings.rendering_sample_rate;
        if rate.fract() != 0.0 || rate > u32::MAX as f64 {
            return Err(MasterError::WavSampleRate(rate));
        }
        let samples = self.render(settings, lead_out)?;
        Ok(samples_to_wav(&samples, rate as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_score::{InstrumentConfig, Note, Part, PartId, Pitch};

    fn settings() -> ConductorSettings {
        ConductorSettings {
            time_conversion_sample_rate: 1000.0,
            rendering_sample_rate: 8000.0,
        }
    }

    fn score_with(instrument: &str) -> Score {
        Score::default().with_part(
            Part::new(PartId::new("p").unwrap(), InstrumentConfig::new(instrument).unwrap())
                .with_note(Note::new(0.25, &[Pitch::new(4, 9)])),
        )
    }

    #[test]
    fn render_covers_score_and_tail() {
        // Quarter note at 120 BPM: half a second.
        let samples = Controller::new(score_with("sine")).render(settings(), 0.25).unwrap();
        let expected = (0.75 * 8000.0) as usize;
        assert!(samples.len().abs_diff(expected) <= 2, "{} samples", samples.len());
        assert!(samples[..3900].iter().any(|s| s.abs() > 0.1));
        assert!(samples[4100..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn unknown_instrument_fails_before_rendering() {
        let err = Controller::new(score_with("kazoo")).render(settings(), 0.0).unwrap_err();
        assert!(matches!(err, MasterError::UnknownInstrument(_)));
    }

    #[test]
    fn engine_errors_pass_through() {
        let err = Controller::new(Score::default()).render(settings(), 0.0).unwrap_err();
        assert!(matches!(err, MasterError::Engine(EngineError::NoParts)));
    }

    #[test]
    fn wav_needs_integral_sample_rate() {
        let s = ConductorSettings {
            rendering_sample_rate: 44100.5,
            ..settings()
        };
        assert!(matches!(
            Controller::new(score_with("sine")).render_to_wav(s, 0.0),
            Err(MasterError::WavSampleRate(_))
        ));
    }

    #[test]
    fn wav_contains_every_sample() {
        let ctrl = Controller::new(score_with("square"));
        let samples = ctrl.render(settings(), 0.0).unwrap();
        let wav = ctrl.render_to_wav(settings(), 0.0).unwrap();
        assert_eq!(wav.len(), 44 + samples.len() * 2);
    }
}
