//! Score IR types for scorewright.
//!
//! A score is a set of parts laid out over an offset axis measured in
//! note-length units, plus a tempo profile that maps that axis onto time.
//! Scalar parameters (tempo, loudness) are described by a [`Profile`]: a
//! start value and sparse, ordered value changes. The engine crate turns
//! these into continuous curves and renders them.

mod error;
mod note;
mod offset;
mod part;
mod pitch;
mod profile;
mod score;
mod tempo;
mod transition;

pub use error::{Result, ScoreError};
pub use note::{Link, Note, MAX_CHORD_SIZE};
pub use offset::{in_domain, Domain, MAX_OFFSET, MIN_OFFSET};
pub use part::{InstrumentConfig, NoteSpan, Part, PartId, MAX_NAME_LEN};
pub use pitch::{pitch_table, Pitch, A4_FREQUENCY, SEMITONES_PER_OCTAVE};
pub use profile::{Profile, ValueChange};
pub use score::Score;
pub use tempo::Tempo;
pub use transition::Transition;
