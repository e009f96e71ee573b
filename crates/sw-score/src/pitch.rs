//! Pitch representation and the named pitch table.

use core::fmt;
use core::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::ScoreError;

pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Reference frequency of A4.
pub const A4_FREQUENCY: f64 = 440.0;

/// Semitone index of A4 counted from C0.
const A4_SEMITONES: i32 = 4 * SEMITONES_PER_OCTAVE + 9;

const NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// A pitch in 12-TET, with an optional cent offset.
///
/// Ordering is by octave, then semitone, then cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch {
    pub octave: i32,
    /// 0..12, C = 0
    pub semitone: u8,
    pub cents: i16,
}

impl Pitch {
    /// Create a pitch; semitones past 11 carry into the octave.
    pub const fn new(octave: i32, semitone: u8) -> Self {
        Self::from_semitones(octave * SEMITONES_PER_OCTAVE + semitone as i32)
    }

    /// Pitch from a semitone count relative to C0.
    pub const fn from_semitones(total: i32) -> Self {
        Self {
            octave: total.div_euclid(SEMITONES_PER_OCTAVE),
            semitone: total.rem_euclid(SEMITONES_PER_OCTAVE) as u8,
            cents: 0,
        }
    }

    pub fn with_cents(mut self, cents: i16) -> Self {
        self.cents = cents;
        self
    }

    /// Semitones above C0, ignoring cents.
    pub fn total_semitones(&self) -> i32 {
        self.octave * SEMITONES_PER_OCTAVE + self.semitone as i32
    }

    /// Shift by whole semitones, keeping the cent offset.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitones(self.total_semitones() + semitones).with_cents(self.cents)
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        let from_a4 = (self.total_semitones() - A4_SEMITONES) as f64 + self.cents as f64 / 100.0;
        A4_FREQUENCY * libm::exp2(from_a4 / SEMITONES_PER_OCTAVE as f64)
    }

    /// Look up a pitch by its table name (`"A0"` .. `"C8"`, flats spelled `b`).
    pub fn named(name: &str) -> Option<Pitch> {
        pitch_table()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
    }
}

/// The 88 named pitches from A0 to C8, built on first use.
static PITCH_TABLE: Lazy<Vec<(String, Pitch)>> = Lazy::new(|| {
    let lowest = Pitch::new(0, 9).total_semitones();
    let highest = Pitch::new(8, 0).total_semitones();
    (lowest..=highest)
        .map(Pitch::from_semitones)
        .map(|p| (p.to_string(), p))
        .collect()
});

/// Named pitches A0..C8 in ascending order.
pub fn pitch_table() -> &'static [(String, Pitch)] {
    &PITCH_TABLE
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NAMES[self.semitone as usize], self.octave)?;
        if self.cents != 0 {
            write!(f, "{:+}c", self.cents)?;
        }
        Ok(())
    }
}

/// Parses names like `C4`, `Bb3`, `F#5`, `C-1`, and the cent suffix written
/// by `Display` (`A4-15c`).
impl FromStr for Pitch {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ScoreError::UnknownPitch(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(unknown)?;
        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(unknown()),
        };
        let rest = chars.as_str();
        let (accidental, rest) = match rest.as_bytes().first() {
            Some(b'#') => (1, &rest[1..]),
            Some(b'b') => (-1, &rest[1..]),
            _ => (0, rest),
        };
        // A sign past the first character starts the cent offset.
        let (octave_str, cents) = match rest.strip_suffix('c') {
            Some(body) => {
                let split = body
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| c == '+' || c == '-')
                    .map(|(i, _)| i)
                    .ok_or_else(unknown)?;
                let cents: i16 = body[split..].parse().map_err(|_| unknown())?;
                (&body[..split], cents)
            }
            None => (rest, 0),
        };
        let octave: i32 = octave_str.parse().map_err(|_| unknown())?;
        let total = octave
            .checked_mul(SEMITONES_PER_OCTAVE)
            .and_then(|t| t.checked_add(base + accidental))
            .ok_or_else(unknown)?;
        Ok(Pitch::from_semitones(total).with_cents(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn a4_is_reference() {
        assert!(approx(Pitch::new(4, 9).frequency(), 440.0));
    }

    #[test]
    fn octave_doubles_frequency() {
        let a3 = Pitch::new(3, 9).frequency();
        let a5 = Pitch::new(5, 9).frequency();
        assert!(approx(a3, 220.0));
        assert!(approx(a5, 880.0));
    }

    #[test]
    fn middle_c_frequency() {
        assert!(approx(Pitch::new(4, 0).frequency(), 261.626));
    }

    #[test]
    fn cents_shift_frequency() {
        let a4 = Pitch::new(4, 9);
        let up = a4.with_cents(100).frequency();
        assert!(approx(up, a4.transpose(1).frequency()));
    }

    #[test]
    fn semitone_carries_into_octave() {
        let p = Pitch::new(3, 14);
        assert_eq!(p.octave, 4);
        assert_eq!(p.semitone, 2);
        assert_eq!(Pitch::from_semitones(-1), Pitch::new(-1, 11));
    }

    #[test]
    fn table_spans_piano_range() {
        let table = pitch_table();
        assert_eq!(table.len(), 88);
        assert_eq!(table[0].0, "A0");
        assert_eq!(table[87].0, "C8");
        assert!(table.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn named_lookup() {
        assert_eq!(Pitch::named("C4"), Some(Pitch::new(4, 0)));
        assert_eq!(Pitch::named("Bb3"), Some(Pitch::new(3, 10)));
        assert_eq!(Pitch::named("C9"), None);
    }

    #[test]
    fn parse_accidentals() {
        assert_eq!("F#5".parse::<Pitch>().unwrap(), Pitch::new(5, 6));
        assert_eq!("Eb2".parse::<Pitch>().unwrap(), Pitch::new(2, 3));
        assert_eq!("B#3".parse::<Pitch>().unwrap(), Pitch::new(4, 0));
        assert_eq!("C-1".parse::<Pitch>().unwrap(), Pitch::new(-1, 0));
        assert!("H2".parse::<Pitch>().is_err());
        assert!("C".parse::<Pitch>().is_err());
    }

    #[test]
    fn huge_octave_is_unknown_not_a_panic() {
        for name in ["C999999999", "B#178956970", "Cb-178956971", "C-2147483648"] {
            assert!(
                matches!(name.parse::<Pitch>(), Err(ScoreError::UnknownPitch(_))),
                "{}",
                name
            );
        }
    }

    #[test]
    fn malformed_cents_are_rejected() {
        assert!("A4c".parse::<Pitch>().is_err());
        assert!("A4+c".parse::<Pitch>().is_err());
        assert!("A4+99999c".parse::<Pitch>().is_err());
    }

    #[test]
    fn display_uses_flat_names_and_cents() {
        assert_eq!(Pitch::new(6, 1).to_string(), "Db6");
        assert_eq!(Pitch::new(4, 9).with_cents(-15).to_string(), "A4-15c");
    }

    #[test]
    fn display_parses_back() {
        let pitches = [
            Pitch::new(6, 1),
            Pitch::new(4, 9).with_cents(-15),
            Pitch::new(-1, 0).with_cents(7),
            Pitch::new(-2, 10).with_cents(-50),
        ];
        for p in pitches {
            assert_eq!(p.to_string().parse::<Pitch>().unwrap(), p, "{}", p);
        }
        for (name, p) in pitch_table() {
            assert_eq!(name.parse::<Pitch>().as_ref(), Ok(p));
        }
    }
}
