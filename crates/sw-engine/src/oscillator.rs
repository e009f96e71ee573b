//! Built-in polyphonic oscillator instrument.

use arrayvec::ArrayVec;
use core::f64::consts::TAU;
use sw_score::Pitch;

use crate::instrument::Instrument;

/// Maximum simultaneous voices per oscillator. The oldest voice is stolen
/// when a pitch starts on a full oscillator.
pub const MAX_VOICES: usize = 16;

/// Oscillator wave shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sine" => Some(Waveform::Sine),
            "square" => Some(Waveform::Square),
            "sawtooth" | "saw" => Some(Waveform::Sawtooth),
            "triangle" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Value at `phase` in `[0, 1)`, ranging over `[-1, 1]`.
    pub fn value_at(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => libm::sin(phase * TAU),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * libm::fabs(phase - 0.5),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Voice {
    pitch: Pitch,
    phase: f64,
    /// Phase advance per sample.
    increment: f64,
}

/// One oscillator voice per sounding pitch, summed and scaled by `gain`.
#[derive(Clone, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    sample_rate: f64,
    gain: f64,
    /// Oldest first.
    voices: ArrayVec<Voice, MAX_VOICES>,
}

impl Oscillator {
    pub fn new(waveform: Waveform, sample_rate: f64, gain: f64) -> Self {
        Self {
            waveform,
            sample_rate,
            gain,
            voices: ArrayVec::new(),
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}

impl Instrument for Oscillator {
    fn start_pitch(&mut self, pitch: Pitch) {
        if self.voices.is_full() {
            self.voices.remove(0);
        }
        self.voices.push(Voice {
            pitch,
            phase: 0.0,
            increment: pitch.frequency() / self.sample_rate,
        });
    }

    fn end_pitch(&mut self, pitch: Pitch) {
        if let Some(i) = self.voices.iter().position(|v| v.pitch == pitch) {
            self.voices.remove(i);
        }
    }

    fn render_sample(&mut self) -> f64 {
        let mut out = 0.0;
        for voice in &mut self.voices {
            out += self.waveform.value_at(voice.phase);
            voice.phase = (voice.phase + voice.increment).fract();
        }
        out * self.gain
    }

    fn reset(&mut self) {
        self.voices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 48000.0;

    fn a4() -> Pitch {
        Pitch::new(4, 9)
    }

    #[test]
    fn silent_without_voices() {
        let mut osc = Oscillator::new(Waveform::Sine, SR, 1.0);
        assert_eq!(osc.render_sample(), 0.0);
    }

    #[test]
    fn square_wave_alternates() {
        // 440 Hz at 48 kHz: ~109 samples per period.
        let mut osc = Oscillator::new(Waveform::Square, SR, 0.5);
        osc.start_pitch(a4());
        let samples: Vec<f64> = (0..110).map(|_| osc.render_sample()).collect();
        assert_eq!(samples[0], 0.5);
        assert!(samples.contains(&-0.5));
        assert!(samples.iter().all(|s| s.abs() == 0.5));
    }

    #[test]
    fn sine_stays_within_gain() {
        let mut osc = Oscillator::new(Waveform::Sine, SR, 0.25);
        osc.start_pitch(a4());
        for _ in 0..1000 {
            assert!(osc.render_sample().abs() <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn end_pitch_releases_oldest_matching_voice() {
        let mut osc = Oscillator::new(Waveform::Sine, SR, 1.0);
        osc.start_pitch(a4());
        osc.start_pitch(Pitch::new(4, 0));
        osc.start_pitch(a4());
        osc.end_pitch(a4());
        assert_eq!(osc.active_voices(), 2);
        assert_eq!(osc.voices[0].pitch, Pitch::new(4, 0));
        osc.end_pitch(Pitch::new(5, 0));
        assert_eq!(osc.active_voices(), 2);
    }

    #[test]
    fn full_oscillator_steals_oldest() {
        let mut osc = Oscillator::new(Waveform::Triangle, SR, 1.0);
        for s in 0..=MAX_VOICES as i32 {
            osc.start_pitch(Pitch::from_semitones(48 + s));
        }
        assert_eq!(osc.active_voices(), MAX_VOICES);
        assert_eq!(osc.voices[0].pitch, Pitch::from_semitones(49));
    }

    #[test]
    fn reset_silences() {
        let mut osc = Oscillator::new(Waveform::Sawtooth, SR, 1.0);
        osc.start_pitch(a4());
        osc.render_sample();
        osc.reset();
        assert_eq!(osc.active_voices(), 0);
        assert_eq!(osc.render_sample(), 0.0);
    }

    #[test]
    fn waveform_names() {
        assert_eq!(Waveform::from_name("saw"), Some(Waveform::Sawtooth));
        assert_eq!(Waveform::from_name("triangle"), Some(Waveform::Triangle));
        assert_eq!(Waveform::from_name("organ"), None);
    }

    #[test]
    fn triangle_peaks() {
        assert_eq!(Waveform::Triangle.value_at(0.5), 1.0);
        assert_eq!(Waveform::Triangle.value_at(0.0), -1.0);
    }
}
