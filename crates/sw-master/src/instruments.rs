//! Instrument resolution from part configuration.

use sw_engine::{Instrument, Oscillator, Silence, Waveform};
use sw_score::InstrumentConfig;

use crate::MasterError;

/// Gain used when a configuration has no `gain` setting.
pub const DEFAULT_GAIN: f64 = 0.25;

/// Names accepted by [`resolve_instrument`].
pub const INSTRUMENT_NAMES: &[&str] = &["sine", "square", "sawtooth", "saw", "triangle", "silent"];

/// Build the instrument a part's configuration names, for `sample_rate`.
///
/// Oscillator names map to [`Oscillator`] with the `gain` setting; `silent`
/// maps to [`Silence`].
pub fn resolve_instrument(
    config: &InstrumentConfig,
    sample_rate: f64,
) -> Result<Box<dyn Instrument>, MasterError> {
    let name = config.name.as_str();
    if name == "silent" {
        return Ok(Box::new(Silence));
    }
    let waveform =
        Waveform::from_name(name).ok_or_else(|| MasterError::UnknownInstrument(name.to_string()))?;
    let gain = config.setting("gain").unwrap_or(DEFAULT_GAIN);
    Ok(Box::new(Oscillator::new(waveform, sample_rate, gain)))
}
