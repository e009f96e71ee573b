//! The instrument capability driven by performers.

use sw_score::Pitch;

/// A sound source a [`Performer`](crate::Performer) can play.
///
/// Instruments are built for one sample rate and owned by exactly one
/// performer. A pitch may be started more than once before it is ended;
/// `end_pitch` ends the earliest sounding instance.
pub trait Instrument: Send {
    fn start_pitch(&mut self, pitch: Pitch);
    fn end_pitch(&mut self, pitch: Pitch);
    /// Produce the next output sample.
    fn render_sample(&mut self) -> f64;
    /// Silence everything. Called when a performer is re-primed.
    fn reset(&mut self) {}
}

/// An instrument that never makes a sound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl Instrument for Silence {
    fn start_pitch(&mut self, _pitch: Pitch) {}
    fn end_pitch(&mut self, _pitch: Pitch) {}
    fn render_sample(&mut self) -> f64 {
        0.0
    }
}
