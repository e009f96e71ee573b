//! A complete score: parts plus the tempo profile.

use crate::error::{Result, ScoreError};
use crate::part::{Part, PartId};
use crate::profile::Profile;
use crate::tempo::Tempo;

/// Parts played against one shared tempo profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub tempo_profile: Profile<Tempo>,
    pub parts: Vec<Part>,
}

impl Score {
    pub fn new(tempo_profile: Profile<Tempo>) -> Self {
        Self {
            tempo_profile,
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn part(&self, id: &PartId) -> Option<&Part> {
        self.parts.iter().find(|p| &p.id == id)
    }

    /// Earliest part start, or `None` without parts.
    pub fn start_offset(&self) -> Option<f64> {
        self.parts.iter().map(Part::start_offset).reduce(f64::min)
    }

    /// Latest part end, or `None` without parts.
    pub fn end_offset(&self) -> Option<f64> {
        self.parts.iter().map(Part::end_offset).reduce(f64::max)
    }

    /// Validate each part and reject duplicate part ids.
    pub fn validate(&self) -> Result<()> {
        for (i, part) in self.parts.iter().enumerate() {
            part.validate()?;
            if self.parts[..i].iter().any(|p| p.id == part.id) {
                return Err(ScoreError::DuplicatePart(part.id.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(Profile::new(Tempo::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::part::InstrumentConfig;

    fn part(id: &str, offset: f64, length: f64) -> Part {
        Part::new(PartId::new(id).unwrap(), InstrumentConfig::new("sine").unwrap())
            .with_offset(offset)
            .with_note(Note::rest(length))
    }

    #[test]
    fn bounds_span_all_parts() {
        let score = Score::default()
            .with_part(part("a", 1.0, 2.0))
            .with_part(part("b", 0.5, 1.0));
        assert_eq!(score.start_offset(), Some(0.5));
        assert_eq!(score.end_offset(), Some(3.0));
    }

    #[test]
    fn empty_score_has_no_bounds() {
        assert_eq!(Score::default().start_offset(), None);
        assert_eq!(Score::default().end_offset(), None);
    }

    #[test]
    fn duplicate_ids_fail_validation() {
        let score = Score::default()
            .with_part(part("a", 0.0, 1.0))
            .with_part(part("a", 1.0, 1.0));
        assert_eq!(score.validate(), Err(ScoreError::DuplicatePart("a".into())));
    }

    #[test]
    fn lookup_by_id() {
        let score = Score::default().with_part(part("lead", 0.0, 1.0));
        let id = PartId::new("lead").unwrap();
        assert!(score.part(&id).is_some());
        assert!(score.part(&PartId::new("bass").unwrap()).is_none());
    }
}
