//! Parts: a note sequence with loudness and instrument configuration.

use core::fmt;

use arrayvec::ArrayString;

use crate::error::{Result, ScoreError};
use crate::note::Note;
use crate::offset::in_domain;
use crate::profile::Profile;

/// Maximum length in bytes of part ids and instrument names.
pub const MAX_NAME_LEN: usize = 32;

/// Unique identifier of a part. Orders lexically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(ArrayString<MAX_NAME_LEN>);

impl PartId {
    pub fn new(name: &str) -> Result<Self> {
        ArrayString::from(name)
            .map(PartId)
            .map_err(|_| ScoreError::NameTooLong(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Which instrument plays a part, and its numeric settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstrumentConfig {
    pub name: ArrayString<MAX_NAME_LEN>,
    pub settings: Vec<(String, f64)>,
}

impl InstrumentConfig {
    pub fn new(name: &str) -> Result<Self> {
        let name =
            ArrayString::from(name).map_err(|_| ScoreError::NameTooLong(name.to_string()))?;
        Ok(Self {
            name,
            settings: Vec::new(),
        })
    }

    /// Set a named setting, replacing any earlier value.
    pub fn with_setting(mut self, key: &str, value: f64) -> Self {
        match self.settings.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.settings.push((key.to_string(), value)),
        }
        self
    }

    pub fn setting(&self, key: &str) -> Option<f64> {
        self.settings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

/// Where one note of a part sits on the offset axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteSpan {
    /// Index into `Part::notes`.
    pub index: usize,
    pub offset: f64,
    pub end: f64,
}

/// An ordered sequence of notes, laid end to end from `offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub id: PartId,
    /// Offset of the first note.
    pub offset: f64,
    pub notes: Vec<Note>,
    /// Gain applied to the part's instrument output.
    pub loudness_profile: Profile<f64>,
    pub instrument: InstrumentConfig,
}

impl Part {
    /// An empty part starting at offset 0 at full loudness.
    pub fn new(id: PartId, instrument: InstrumentConfig) -> Self {
        Self {
            id,
            offset: 0.0,
            notes: Vec::new(),
            loudness_profile: Profile::new(1.0),
            instrument,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_notes(mut self, notes: impl IntoIterator<Item = Note>) -> Self {
        self.notes.extend(notes);
        self
    }

    pub fn with_loudness_profile(mut self, profile: Profile<f64>) -> Self {
        self.loudness_profile = profile;
        self
    }

    /// Offsets of every note, in sequence order.
    pub fn spans(&self) -> impl Iterator<Item = NoteSpan> + '_ {
        let mut cursor = self.offset;
        self.notes.iter().enumerate().map(move |(index, note)| {
            let offset = cursor;
            cursor += note.duration;
            NoteSpan {
                index,
                offset,
                end: cursor,
            }
        })
    }

    pub fn start_offset(&self) -> f64 {
        self.offset
    }

    /// Offset where the last note ends.
    pub fn end_offset(&self) -> f64 {
        self.offset + self.notes.iter().map(|n| n.duration).sum::<f64>()
    }

    /// Check that the part fits on the offset axis and no duration is negative.
    pub fn validate(&self) -> Result<()> {
        if let Some(note) = self
            .notes
            .iter()
            .find(|n| !(n.duration >= 0.0 && n.duration.is_finite()))
        {
            return Err(ScoreError::NegativeDuration(note.duration));
        }
        for offset in [self.start_offset(), self.end_offset()] {
            if !in_domain(offset) {
                return Err(ScoreError::OffsetOutOfRange(offset));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::Pitch;

    fn part() -> Part {
        Part::new(
            PartId::new("melody").unwrap(),
            InstrumentConfig::new("sine").unwrap(),
        )
    }

    #[test]
    fn spans_are_laid_end_to_end() {
        let c4 = Pitch::new(4, 0);
        let p = part()
            .with_offset(2.0)
            .with_note(Note::new(0.5, &[c4]))
            .with_note(Note::rest(0.25))
            .with_note(Note::new(1.0, &[c4]));

        let spans: Vec<NoteSpan> = p.spans().collect();
        assert_eq!(spans.len(), 3);
        assert_eq!((spans[0].offset, spans[0].end), (2.0, 2.5));
        assert_eq!((spans[1].offset, spans[1].end), (2.5, 2.75));
        assert_eq!((spans[2].offset, spans[2].end), (2.75, 3.75));
        assert_eq!(p.end_offset(), 3.75);
    }

    #[test]
    fn empty_part_ends_where_it_starts() {
        let p = part().with_offset(1.5);
        assert_eq!(p.start_offset(), 1.5);
        assert_eq!(p.end_offset(), 1.5);
    }

    #[test]
    fn validate_rejects_negative_duration() {
        let p = part().with_note(Note::rest(-1.0));
        assert_eq!(p.validate(), Err(ScoreError::NegativeDuration(-1.0)));
    }

    #[test]
    fn validate_rejects_out_of_range_offset() {
        let p = part().with_offset(crate::MAX_OFFSET).with_note(Note::rest(4.0));
        assert!(matches!(p.validate(), Err(ScoreError::OffsetOutOfRange(_))));
    }

    #[test]
    fn long_ids_are_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(PartId::new(&long), Err(ScoreError::NameTooLong(_))));
    }

    #[test]
    fn instrument_settings_replace() {
        let cfg = InstrumentConfig::new("square")
            .unwrap()
            .with_setting("gain", 0.2)
            .with_setting("gain", 0.3);
        assert_eq!(cfg.setting("gain"), Some(0.3));
        assert_eq!(cfg.setting("detune"), None);
        assert_eq!(cfg.settings.len(), 1);
    }
}
