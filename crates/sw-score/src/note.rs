//! Notes and the links between them.

use arrayvec::ArrayVec;

use crate::pitch::Pitch;

/// Maximum pitches sounded together by one note.
pub const MAX_CHORD_SIZE: usize = 8;

/// Notated connection from a note to the one that follows it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Link {
    #[default]
    None,
    /// Hold through into the next note without re-attacking.
    Tie,
    Slur,
    Legato,
    /// Slide through discrete pitches to the target.
    Glissando(Pitch),
    /// Continuous slide to the target.
    Portamento(Pitch),
}

/// A note: pitch content, duration, and articulation markings.
///
/// A note with no pitches is a rest. Playback sounds every pitch for the
/// full `duration`; `loudness`, `intensity`, `separation` and `link` are
/// score markings carried for editors and exporters and do not change what
/// the engine renders. They are clamped to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    /// Length in note-length units (a whole note is 1.0).
    pub duration: f64,
    pub pitches: ArrayVec<Pitch, MAX_CHORD_SIZE>,
    pub loudness: f64,
    pub intensity: f64,
    /// Notated detachment from the next note (0 legato, 1 fully detached).
    pub separation: f64,
    pub link: Link,
}

impl Note {
    /// Create a note. Pitches past `MAX_CHORD_SIZE` are dropped.
    pub fn new(duration: f64, pitches: &[Pitch]) -> Self {
        Self {
            duration,
            pitches: pitches.iter().copied().take(MAX_CHORD_SIZE).collect(),
            loudness: 0.5,
            intensity: 0.5,
            separation: 0.0,
            link: Link::None,
        }
    }

    /// A silent note.
    pub fn rest(duration: f64) -> Self {
        Self::new(duration, &[])
    }

    pub fn with_loudness(mut self, loudness: f64) -> Self {
        self.loudness = loudness.clamp(0.0, 1.0);
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity.clamp(0.0, 1.0);
        self
    }

    pub fn with_separation(mut self, separation: f64) -> Self {
        self.separation = separation.clamp(0.0, 1.0);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = link;
        self
    }

    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }
}
