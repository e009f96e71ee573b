//! Built-in scores used by the command-line front end.

use sw_score::{
    InstrumentConfig, Note, Part, PartId, Pitch, Profile, Score, ScoreError, Tempo,
    ValueChange,
};

/// Scale degrees of the major scale, in semitones above the tonic.
const MAJOR: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

fn degrees(tonic: Pitch, steps: &[i32]) -> Vec<Pitch> {
    steps.iter().map(|&s| tonic.transpose(s)).collect()
}

/// C major scale up and down in eighth notes, accelerating from 90 to 150
/// BPM over the ascent and snapping back for the descent.
pub fn scale() -> Result<Score, ScoreError> {
    let up = degrees(Pitch::new(4, 0), &MAJOR);
    let notes = up
        .iter()
        .chain(up.iter().rev().skip(1))
        .map(|&p| Note::new(0.125, &[p]));

    let tempo = Profile::new(Tempo::quarter(90.0))
        .with_change(ValueChange::linear(0.0, Tempo::quarter(150.0), 1.0))
        .with_change(ValueChange::immediate(1.0, Tempo::quarter(90.0)));

    let melody = Part::new(PartId::new("melody")?, InstrumentConfig::new("triangle")?)
        .with_notes(notes)
        .with_note(Note::new(0.5, &[Pitch::new(4, 0)]));

    Ok(Score::new(tempo).with_part(melody))
}

/// Two-voice round over a bass line, with the second voice swelling in.
pub fn round() -> Result<Score, ScoreError> {
    let tonic = Pitch::new(4, 7);
    let phrase: Vec<Note> = [0, 2, 4, 0, 0, 2, 4, 0, 4, 5, 7]
        .iter()
        .map(|&s| Note::new(if s == 7 { 0.5 } else { 0.25 }, &[tonic.transpose(s)]))
        .collect();

    let lead = Part::new(PartId::new("lead")?, InstrumentConfig::new("sine")?.with_setting("gain", 0.3))
        .with_notes(phrase.clone());

    let follow = Part::new(
        PartId::new("follow")?,
        InstrumentConfig::new("triangle")?.with_setting("gain", 0.2),
    )
    .with_offset(1.0)
    .with_notes(phrase)
    .with_loudness_profile(Profile::new(0.2).with_change(ValueChange::linear(1.0, 1.0, 1.0)));

    let bass_notes = [Pitch::new(2, 7), Pitch::new(2, 7), Pitch::new(3, 0), Pitch::new(2, 7)];
    let bass = Part::new(
        PartId::new("bass")?,
        InstrumentConfig::new("sawtooth")?.with_setting("gain", 0.1),
    )
    .with_notes(bass_notes.iter().map(|&p| Note::new(1.0, &[p, p.transpose(7)])));

    let tempo = Profile::new(Tempo::quarter(100.0))
        .with_change(ValueChange::linear(3.0, Tempo::quarter(70.0), 1.0));

    Ok(Score::new(tempo).with_part(lead).with_part(follow).with_part(bass))
}
