//! A score paired with one instrument per part.

use std::collections::BTreeMap;

use sw_score::{Part, PartId, Score};

use crate::instrument::Instrument;

/// Score plus resolved instruments, keyed by part id.
///
/// Building the instruments (choosing a synthesis backend for each part's
/// configuration) happens outside the engine; the arrangement only carries
/// the result to the [`Conductor`](crate::Conductor).
pub struct Arrangement {
    pub score: Score,
    instruments: BTreeMap<PartId, Box<dyn Instrument>>,
}

impl Arrangement {
    pub fn new(score: Score) -> Self {
        Self {
            score,
            instruments: BTreeMap::new(),
        }
    }

    /// Resolve an instrument for every part with `resolve`. Parts it returns
    /// `None` for are left unbound.
    pub fn resolve(
        score: Score,
        mut resolve: impl FnMut(&Part) -> Option<Box<dyn Instrument>>,
    ) -> Self {
        let instruments = score
            .parts
            .iter()
            .filter_map(|part| resolve(part).map(|inst| (part.id, inst)))
            .collect();
        Self { score, instruments }
    }

    pub fn with_instrument(mut self, part: PartId, instrument: impl Instrument + 'static) -> Self {
        self.bind(part, Box::new(instrument));
        self
    }

    /// Bind `instrument` to `part`, returning any instrument it replaces.
    pub fn bind(
        &mut self,
        part: PartId,
        instrument: Box<dyn Instrument>,
    ) -> Option<Box<dyn Instrument>> {
        self.instruments.insert(part, instrument)
    }

    pub fn is_bound(&self, part: &PartId) -> bool {
        self.instruments.contains_key(part)
    }

    pub(crate) fn into_parts(self) -> (Score, BTreeMap<PartId, Box<dyn Instrument>>) {
        (self.score, self.instruments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Silence;
    use sw_score::InstrumentConfig;

    fn score() -> Score {
        let part = |id: &str, inst: &str| {
            Part::new(PartId::new(id).unwrap(), InstrumentConfig::new(inst).unwrap())
        };
        Score::default()
            .with_part(part("lead", "sine"))
            .with_part(part("pad", "unknown"))
    }

    #[test]
    fn resolve_skips_unresolvable_parts() {
        let arr = Arrangement::resolve(score(), |part| {
            (part.instrument.name.as_str() == "sine").then(|| Box::new(Silence) as Box<dyn Instrument>)
        });
        assert!(arr.is_bound(&PartId::new("lead").unwrap()));
        assert!(!arr.is_bound(&PartId::new("pad").unwrap()));
    }

    #[test]
    fn bind_replaces() {
        let id = PartId::new("lead").unwrap();
        let mut arr = Arrangement::new(score()).with_instrument(id, Silence);
        assert!(arr.bind(id, Box::new(Silence)).is_some());
    }
}
