//! Value profiles: a start value plus sparse, ordered value changes.

use crate::transition::Transition;

/// A change to a new target value at an offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueChange<T> {
    /// Offset where the transition begins.
    pub offset: f64,
    /// Value reached at the end of the transition.
    pub value: T,
    /// How the value moves to the target.
    pub transition: Transition,
}

impl<T> ValueChange<T> {
    pub fn new(offset: f64, value: T, transition: Transition) -> Self {
        Self {
            offset,
            value,
            transition,
        }
    }

    /// Jump to `value` at `offset`.
    pub fn immediate(offset: f64, value: T) -> Self {
        Self::new(offset, value, Transition::Immediate)
    }

    /// Ramp linearly to `value`, starting at `offset` and lasting `duration`.
    pub fn linear(offset: f64, value: T, duration: f64) -> Self {
        Self::new(offset, value, Transition::Linear(duration))
    }
}

/// A start value and a set of value changes keyed by unique offset.
///
/// Changes are kept sorted by offset. Inserting a change at an offset that
/// already has one replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile<T> {
    /// Value in effect before the first change.
    pub start_value: T,
    changes: Vec<ValueChange<T>>,
}

impl<T: Copy> Profile<T> {
    /// A profile that holds `start_value` everywhere.
    pub fn new(start_value: T) -> Self {
        Self {
            start_value,
            changes: Vec::new(),
        }
    }

    /// Builder form of [`Profile::insert`].
    pub fn with_change(mut self, change: ValueChange<T>) -> Self {
        self.insert(change);
        self
    }

    /// Insert a change, keeping offset order. Returns the change it replaced, if any.
    pub fn insert(&mut self, change: ValueChange<T>) -> Option<ValueChange<T>> {
        match self
            .changes
            .binary_search_by(|c| c.offset.total_cmp(&change.offset))
        {
            Ok(i) => Some(core::mem::replace(&mut self.changes[i], change)),
            Err(i) => {
                self.changes.insert(i, change);
                None
            }
        }
    }

    /// Remove the change at exactly `offset`.
    pub fn remove(&mut self, offset: f64) -> Option<ValueChange<T>> {
        let i = self
            .changes
            .binary_search_by(|c| c.offset.total_cmp(&offset))
            .ok()?;
        Some(self.changes.remove(i))
    }

    /// Changes in increasing offset order.
    pub fn changes(&self) -> &[ValueChange<T>] {
        &self.changes
    }

    /// Returns true if the profile has no changes.
    pub fn is_constant(&self) -> bool {
        self.changes.is_empty()
    }

    /// Convert every value (start and targets) with `f`, keeping offsets and transitions.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> Profile<U> {
        Profile {
            start_value: f(self.start_value),
            changes: self
                .changes
                .iter()
                .map(|c| ValueChange::new(c.offset, f(c.value), c.transition))
                .collect(),
        }
    }
}

impl<T: Copy + Default> Default for Profile<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_is_constant() {
        let p = Profile::new(0.5);
        assert!(p.is_constant());
        assert_eq!(p.start_value, 0.5);
    }

    #[test]
    fn changes_are_kept_in_offset_order() {
        let p = Profile::new(1.0)
            .with_change(ValueChange::immediate(4.0, 2.0))
            .with_change(ValueChange::immediate(1.0, 3.0))
            .with_change(ValueChange::linear(2.5, 4.0, 1.0));

        let offsets: Vec<f64> = p.changes().iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![1.0, 2.5, 4.0]);
    }

    #[test]
    fn insert_at_same_offset_replaces() {
        let mut p = Profile::new(1.0);
        assert!(p.insert(ValueChange::immediate(2.0, 5.0)).is_none());
        let old = p.insert(ValueChange::linear(2.0, 6.0, 0.5));

        assert_eq!(old, Some(ValueChange::immediate(2.0, 5.0)));
        assert_eq!(p.changes().len(), 1);
        assert_eq!(p.changes()[0].value, 6.0);
    }

    #[test]
    fn remove_by_offset() {
        let mut p = Profile::new(1.0).with_change(ValueChange::immediate(2.0, 5.0));
        assert!(p.remove(3.0).is_none());
        assert!(p.remove(2.0).is_some());
        assert!(p.is_constant());
    }

    #[test]
    fn map_converts_values_only() {
        let p = Profile::new(120.0).with_change(ValueChange::linear(1.0, 60.0, 2.0));
        let halved = p.map(|v: f64| v / 2.0);

        assert_eq!(halved.start_value, 60.0);
        assert_eq!(halved.changes()[0].offset, 1.0);
        assert_eq!(halved.changes()[0].value, 30.0);
        assert_eq!(halved.changes()[0].transition, Transition::Linear(2.0));
    }
}
