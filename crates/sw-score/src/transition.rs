//! Transition policies between successive profile values.

/// How a value moves from its prior level to a new target.
///
/// Durations are in note-length units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Transition {
    /// Jump to the target at the change offset.
    #[default]
    Immediate,
    /// Straight line from the prior value to the target over the duration.
    Linear(f64),
    /// S-curve over the duration. Not supported by the engine.
    Sigmoid(f64),
}

impl Transition {
    /// Duration of the transition (0 for `Immediate`).
    pub fn duration(&self) -> f64 {
        match self {
            Transition::Immediate => 0.0,
            Transition::Linear(d) | Transition::Sigmoid(d) => *d,
        }
    }

    /// Short lowercase name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Immediate => "immediate",
            Transition::Linear(_) => "linear",
            Transition::Sigmoid(_) => "sigmoid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_has_no_duration() {
        assert_eq!(Transition::Immediate.duration(), 0.0);
        assert_eq!(Transition::default(), Transition::Immediate);
    }

    #[test]
    fn timed_transitions_report_duration() {
        assert_eq!(Transition::Linear(0.5).duration(), 0.5);
        assert_eq!(Transition::Sigmoid(2.0).duration(), 2.0);
        assert_eq!(Transition::Sigmoid(2.0).name(), "sigmoid");
    }
}
