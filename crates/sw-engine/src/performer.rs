//! Per-part playback state.

use log::trace;
use sw_score::{NoteSpan, Part, PartId};

use crate::error::Result;
use crate::instrument::Instrument;
use crate::value_computer::ValueComputer;

/// Plays one part on one instrument.
///
/// The part's notes are split into three buckets relative to a note
/// counter that only moves forward between preparations: not yet played,
/// being played, and played. Spans are sorted by offset, so the pending
/// bucket is the tail of the span list past `cursor`.
pub struct Performer {
    part: Part,
    spans: Vec<NoteSpan>,
    instrument: Box<dyn Instrument>,
    loudness: ValueComputer,
    /// First not-yet-played span.
    cursor: usize,
    /// Spans being played, in start order.
    active: Vec<usize>,
    played: Vec<usize>,
}

impl Performer {
    /// Validates the part and builds its loudness curve.
    pub fn new(part: Part, instrument: Box<dyn Instrument>) -> Result<Self> {
        part.validate()?;
        let loudness = ValueComputer::new(&part.loudness_profile)?;
        let spans: Vec<NoteSpan> = part.spans().collect();
        let count = spans.len();
        let start = part.start_offset();

        let mut performer = Self {
            part,
            spans,
            instrument,
            loudness,
            cursor: 0,
            // Full capacity up front keeps perform_sample allocation-free.
            active: Vec::with_capacity(count),
            played: Vec::with_capacity(count),
        };
        performer.prepare_to_perform(start);
        Ok(performer)
    }

    pub fn id(&self) -> PartId {
        self.part.id
    }

    pub fn part(&self) -> &Part {
        &self.part
    }

    pub fn start_offset(&self) -> f64 {
        self.part.start_offset()
    }

    pub fn end_offset(&self) -> f64 {
        self.part.end_offset()
    }

    /// Reset so that every note at or after `note_offset` is pending.
    pub fn prepare_to_perform(&mut self, note_offset: f64) {
        self.instrument.reset();
        self.cursor = self.spans.partition_point(|s| s.offset < note_offset);
        self.active.clear();
        self.played.clear();
    }

    /// Advance to `note_counter` and render one sample.
    ///
    /// Notes whose start has been reached begin (`start_pitch` for each of
    /// their pitches), then notes whose end has been reached finish
    /// (`end_pitch`), then the instrument renders. The sample is scaled by
    /// the part's loudness at `note_counter`.
    pub fn perform_sample(&mut self, note_counter: f64, time_counter: f64) -> Result<f64> {
        let notes = &self.part.notes;
        let id = &self.part.id;

        while let Some(span) = self.spans.get(self.cursor) {
            if span.offset > note_counter {
                break;
            }
            for &pitch in &notes[span.index].pitches {
                trace!("{}: start {} at note {:.4} ({:.4}s)", id, pitch, note_counter, time_counter);
                self.instrument.start_pitch(pitch);
            }
            self.active.push(self.cursor);
            self.cursor += 1;
        }

        let spans = &self.spans;
        let instrument = &mut self.instrument;
        let played = &mut self.played;
        self.active.retain(|&i| {
            let span = spans[i];
            if span.end > note_counter {
                return true;
            }
            for &pitch in &notes[span.index].pitches {
                trace!("{}: end {} at note {:.4} ({:.4}s)", id, pitch, note_counter, time_counter);
                instrument.end_pitch(pitch);
            }
            played.push(i);
            false
        });

        let gain = self.loudness.value_at(note_counter)?;
        Ok(self.instrument.render_sample() * gain)
    }

    /// End every note still being played.
    pub fn release_all(&mut self) {
        for &i in &self.active {
            for &pitch in &self.part.notes[self.spans[i].index].pitches {
                self.instrument.end_pitch(pitch);
            }
            self.played.push(i);
        }
        self.active.clear();
    }

    pub fn pending(&self) -> &[NoteSpan] {
        &self.spans[self.cursor..]
    }

    pub fn active(&self) -> impl Iterator<Item = &NoteSpan> + '_ {
        self.active.iter().map(|&i| &self.spans[i])
    }

    pub fn played(&self) -> impl Iterator<Item = &NoteSpan> + '_ {
        self.played.iter().map(|&i| &self.spans[i])
    }

    /// No notes pending or sounding.
    pub fn is_finished(&self) -> bool {
        self.cursor == self.spans.len() && self.active.is_empty()
    }
}
