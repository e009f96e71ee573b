//! Offset axis bounds.
//!
//! Offsets are positions in the score measured in note-length units
//! (a whole note is 1.0). Every curve in the engine is defined over the
//! closed range `[MIN_OFFSET, MAX_OFFSET]`.

/// Lowest representable offset, -(2^31).
pub const MIN_OFFSET: f64 = -2_147_483_648.0;

/// Highest representable offset, 2^31.
pub const MAX_OFFSET: f64 = 2_147_483_648.0;

/// Returns true if `offset` lies in `[MIN_OFFSET, MAX_OFFSET]`. NaN is never in domain.
pub fn in_domain(offset: f64) -> bool {
    (MIN_OFFSET..=MAX_OFFSET).contains(&offset)
}

/// A closed range of offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
}

impl Domain {
    /// The whole offset axis.
    pub const FULL: Domain = Domain {
        start: MIN_OFFSET,
        end: MAX_OFFSET,
    };

    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The range from `start` to the top of the offset axis.
    pub const fn from_offset(start: f64) -> Self {
        Self {
            start,
            end: MAX_OFFSET,
        }
    }

    pub fn contains(&self, offset: f64) -> bool {
        (self.start..=self.end).contains(&offset)
    }

    /// Returns true if both ends lie in the offset domain and `start <= end`.
    pub fn is_bounded(&self) -> bool {
        in_domain(self.start) && in_domain(self.end) && self.start <= self.end
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::FULL
    }
}
