//! Rendering engine for scorewright.
//!
//! Turns profiles into continuous curves over the offset axis, integrates
//! the tempo curve to map offsets onto time, and renders a score one sample
//! at a time: a [`Conductor`] advances the global counters and mixes the
//! output of one [`Performer`] per part.

mod arrangement;
mod conductor;
mod error;
mod instrument;
mod note_time;
mod oscillator;
mod performer;
mod piecewise;
mod tempo_computer;
mod value_computer;

pub use arrangement::Arrangement;
pub use conductor::{Conductor, ConductorSettings, MAX_PERFORMANCE_SECONDS, MIN_SAMPLE_RATE};
pub use error::{EngineError, Result};
pub use instrument::{Instrument, Silence};
pub use note_time::NoteTimeConverter;
pub use oscillator::{Oscillator, Waveform, MAX_VOICES};
pub use performer::Performer;
pub use piecewise::{Evaluate, Piece, PiecewiseFunction};
pub use tempo_computer::TempoComputer;
pub use value_computer::{Segment, ValueComputer};
