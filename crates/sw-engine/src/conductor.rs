//! Performance orchestration: global counters and the mixing loop.

use core::fmt;

use log::{debug, warn};

use crate::arrangement::Arrangement;
use crate::error::{EngineError, Result};
use crate::note_time::NoteTimeConverter;
use crate::performer::Performer;
use crate::tempo_computer::TempoComputer;

/// Lowest accepted sample rate, for both time conversion and rendering.
pub const MIN_SAMPLE_RATE: f64 = 100.0;

/// Longest span of time a performance or a time conversion may cover: one day.
pub const MAX_PERFORMANCE_SECONDS: f64 = 86_400.0;

pub(crate) fn check_seconds(seconds: f64) -> Result<()> {
    if (0.0..=MAX_PERFORMANCE_SECONDS).contains(&seconds) {
        Ok(())
    } else {
        Err(EngineError::Duration(seconds))
    }
}

pub(crate) fn check_sample_rate(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= MIN_SAMPLE_RATE {
        Ok(())
    } else {
        Err(EngineError::SampleRate {
            name,
            value,
            min: MIN_SAMPLE_RATE,
        })
    }
}

/// Sample rates for one performance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConductorSettings {
    /// Integration rate used to compute the score's time bounds.
    pub time_conversion_sample_rate: f64,
    /// Output sample rate.
    pub rendering_sample_rate: f64,
}

impl ConductorSettings {
    pub fn validate(&self) -> Result<()> {
        check_sample_rate("time conversion", self.time_conversion_sample_rate)?;
        check_sample_rate("rendering", self.rendering_sample_rate)
    }
}

impl Default for ConductorSettings {
    fn default() -> Self {
        Self {
            time_conversion_sample_rate: 1000.0,
            rendering_sample_rate: 44100.0,
        }
    }
}

/// Renders an arrangement one sample at a time.
///
/// Time zero is the start of the earliest part. Each sample step sums the
/// output of every performer (in ascending part-id order), then advances the
/// time counter by one sample period, the sample counter by one, and the
/// note counter by the tempo rate times the sample period. Past the end of
/// the score the output is silence, but the counters keep advancing so a
/// lead-out tail can be rendered.
///
/// Mixing is plain summation. Nothing is normalized or clipped.
pub struct Conductor {
    performers: Vec<Performer>,
    converter: NoteTimeConverter,
    tempo: TempoComputer,
    sample_rate: f64,
    sample_period: f64,
    start_offset: f64,
    end_offset: f64,
    end_of_score: f64,
    time_counter: f64,
    note_counter: f64,
    sample_counter: u64,
    prepared_time: f64,
    prepared_sample: u64,
    /// Performers were released after passing the end of the score.
    released: bool,
}

impl Conductor {
    /// Assemble a performance.
    ///
    /// Fails without parts, with a sample rate below [`MIN_SAMPLE_RATE`], or
    /// when a part has no instrument bound to it.
    pub fn new(arrangement: Arrangement, settings: ConductorSettings) -> Result<Self> {
        settings.validate()?;
        let (mut score, mut instruments) = arrangement.into_parts();
        if score.parts.is_empty() {
            return Err(EngineError::NoParts);
        }
        score.validate()?;

        score.parts.sort_by_key(|part| part.id);
        let mut performers = Vec::with_capacity(score.parts.len());
        for part in score.parts {
            let instrument = instruments
                .remove(&part.id)
                .ok_or_else(|| EngineError::MissingInstrument(part.id.to_string()))?;
            performers.push(Performer::new(part, instrument)?);
        }
        for id in instruments.keys() {
            warn!("instrument bound to unknown part {} is unused", id);
        }

        let tempo = TempoComputer::new(&score.tempo_profile)?;
        let converter = NoteTimeConverter::new(tempo.clone(), settings.time_conversion_sample_rate)?;

        let start_offset = performers
            .iter()
            .map(Performer::start_offset)
            .fold(f64::INFINITY, f64::min);
        let end_offset = performers
            .iter()
            .map(Performer::end_offset)
            .fold(f64::NEG_INFINITY, f64::max);
        let end_of_score = converter.time_elapsed(start_offset, end_offset)?;
        debug!(
            "conductor: {} parts, offsets {}..{}, {:.3}s at {} Hz",
            performers.len(),
            start_offset,
            end_offset,
            end_of_score,
            settings.rendering_sample_rate
        );

        let mut conductor = Self {
            performers,
            converter,
            tempo,
            sample_rate: settings.rendering_sample_rate,
            sample_period: 1.0 / settings.rendering_sample_rate,
            start_offset,
            end_offset,
            end_of_score,
            time_counter: 0.0,
            note_counter: start_offset,
            sample_counter: 0,
            prepared_time: 0.0,
            prepared_sample: 0,
            released: false,
        };
        conductor.prepare_performance_at(0.0)?;
        Ok(conductor)
    }

    /// Reset the counters to `start_time` seconds and re-prime every performer.
    pub fn prepare_performance_at(&mut self, start_time: f64) -> Result<()> {
        let note_offset = self
            .converter
            .note_offset_after(self.start_offset, start_time)?;

        self.time_counter = start_time;
        self.sample_counter = (start_time * self.sample_rate) as u64;
        self.note_counter = note_offset;
        for performer in &mut self.performers {
            performer.prepare_to_perform(note_offset);
        }
        self.prepared_time = start_time;
        self.prepared_sample = self.sample_counter;
        self.released = false;
        debug!("prepared at {:.4}s, note offset {:.4}", start_time, note_offset);
        Ok(())
    }

    /// Render from the prepared start until `lead_out_time` seconds past the
    /// end of the score.
    pub fn perform(&mut self, lead_out_time: f64) -> Result<Vec<f64>> {
        check_seconds(lead_out_time)?;
        check_seconds(self.end_of_score + lead_out_time)?;
        self.ensure_prepared()?;
        let stop = self.end_of_score + lead_out_time;
        let mut samples = Vec::new();
        while self.time_counter <= stop {
            samples.push(self.perform_sample()?);
        }
        self.release_performers();
        Ok(samples)
    }

    /// Render `seconds` of audio from the prepared start.
    pub fn perform_seconds(&mut self, seconds: f64) -> Result<Vec<f64>> {
        check_seconds(seconds)?;
        self.perform_samples((seconds * self.sample_rate) as usize)
    }

    /// Render exactly `count` samples from the prepared start.
    pub fn perform_samples(&mut self, count: usize) -> Result<Vec<f64>> {
        check_seconds(count as f64 * self.sample_period)?;
        self.ensure_prepared()?;
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(self.perform_sample()?);
        }
        Ok(samples)
    }

    /// Render one sample and advance the counters.
    ///
    /// Unlike the `perform*` methods this continues from wherever the
    /// counters are, which allows block-by-block rendering.
    pub fn perform_sample(&mut self) -> Result<f64> {
        let sample = if self.time_counter <= self.end_of_score {
            let mut sum = 0.0;
            for performer in &mut self.performers {
                sum += performer.perform_sample(self.note_counter, self.time_counter)?;
            }
            sum
        } else {
            self.release_performers();
            0.0
        };

        self.note_counter += self.tempo.notes_per_second_at(self.note_counter)? * self.sample_period;
        self.time_counter += self.sample_period;
        self.sample_counter += 1;
        Ok(sample)
    }

    /// Re-prepare if samples were rendered since the last preparation.
    fn ensure_prepared(&mut self) -> Result<()> {
        if self.sample_counter != self.prepared_sample {
            debug!(
                "sample counter moved from {} to {}, re-preparing",
                self.prepared_sample, self.sample_counter
            );
            self.prepare_performance_at(self.prepared_time)?;
        }
        Ok(())
    }

    fn release_performers(&mut self) {
        if !self.released {
            for performer in &mut self.performers {
                performer.release_all();
            }
            self.released = true;
        }
    }

    pub fn performers(&self) -> &[Performer] {
        &self.performers
    }

    pub fn note_time_converter(&self) -> &NoteTimeConverter {
        &self.converter
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Always 0: time is measured from the earliest part start.
    pub fn start_of_score(&self) -> f64 {
        0.0
    }

    /// Seconds from the earliest part start to the latest part end.
    pub fn end_of_score(&self) -> f64 {
        self.end_of_score
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    pub fn end_offset(&self) -> f64 {
        self.end_offset
    }

    pub fn time_counter(&self) -> f64 {
        self.time_counter
    }

    pub fn note_counter(&self) -> f64 {
        self.note_counter
    }

    pub fn sample_counter(&self) -> u64 {
        self.sample_counter
    }
}

impl fmt::Debug for Conductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conductor")
            .field("parts", &self.performers.iter().map(Performer::id).collect::<Vec<_>>())
            .field("sample_rate", &self.sample_rate)
            .field("end_of_score", &self.end_of_score)
            .field("time_counter", &self.time_counter)
            .field("note_counter", &self.note_counter)
            .field("sample_counter", &self.sample_counter)
            .finish_non_exhaustive()
    }
}
