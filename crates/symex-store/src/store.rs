//! Symbolic element store
//!
//! Provides [`ElementStore`], the state every modeled collection is answered from.

use crate::error::StoreError;
use im::Vector;
use serde::{Deserialize, Serialize};
use symex_core::SymValue;

/// Length of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    /// Exactly the number of slots
    Concrete,

    /// Unknown length `symbol` with `min <= symbol <= max`
    Symbolic {
        /// Name of the length symbol
        symbol: String,
        /// Smallest feasible length
        min: usize,
        /// Largest feasible length
        max: usize,
    },
}

/// One feasible concrete length of a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthCase {
    /// Concrete length on this case
    pub len: usize,
    /// Constraint selecting the case, `None` when the length is already concrete
    pub constraint: Option<SymValue>,
}

/// Symbolic length plus addressable element sequence
///
/// # Invariants
/// - With [`Length::Concrete`] the slots are exactly the elements
/// - With [`Length::Symbolic`] slot `i` is an element only on paths where the
///   length exceeds `i`; the store is consistent when `max <= slots`
/// - Cloning is O(1); clones share structure and diverge on write (copy-on-fork)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStore {
    slots: Vector<SymValue>,
    length: Length,
}

impl ElementStore {
    /// Empty store with concrete length 0
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vector::new(),
            length: Length::Concrete,
        }
    }

    /// Concrete store holding `values` in order
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = SymValue>) -> Self {
        Self {
            slots: values.into_iter().collect(),
            length: Length::Concrete,
        }
    }

    /// Fully symbolic store: length `{name}.len` in `0..=max_len`, elements
    /// `{name}[0]`, `{name}[1]`, ...
    #[must_use]
    pub fn symbolic(name: &str, max_len: usize) -> Self {
        Self {
            slots: (0..max_len)
                .map(|i| SymValue::symbol(format!("{name}[{i}]")))
                .collect(),
            length: Length::Symbolic {
                symbol: format!("{name}.len"),
                min: 0,
                max: max_len,
            },
        }
    }

    /// Store from raw engine state
    ///
    /// Consistency is checked when the store is read through
    /// [`Self::length_cases`], not here.
    #[must_use]
    pub fn from_parts(slots: impl IntoIterator<Item = SymValue>, length: Length) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            length,
        }
    }

    /// Length as a symbolic value
    #[must_use]
    pub fn len(&self) -> SymValue {
        match &self.length {
            Length::Concrete => SymValue::int(i64::try_from(self.slots.len()).unwrap_or(i64::MAX)),
            Length::Symbolic { symbol, .. } => SymValue::symbol(symbol.clone()),
        }
    }

    /// Length when it is concrete
    #[inline]
    #[must_use]
    pub fn concrete_len(&self) -> Option<usize> {
        match self.length {
            Length::Concrete => Some(self.slots.len()),
            Length::Symbolic { .. } => None,
        }
    }

    /// Length description
    #[inline]
    #[must_use]
    pub fn length(&self) -> &Length {
        &self.length
    }

    /// True when the length is symbolic
    #[inline]
    #[must_use]
    pub fn is_symbolic(&self) -> bool {
        matches!(self.length, Length::Symbolic { .. })
    }

    /// Number of addressable slots
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot at `index`
    ///
    /// # Errors
    /// Returns [`StoreError::IndexOutOfBounds`] past the last slot
    pub fn get(&self, index: usize) -> Result<&SymValue, StoreError> {
        self.slots.get(index).ok_or(StoreError::IndexOutOfBounds {
            index,
            len: self.slots.len(),
        })
    }

    /// First slot syntactically equal to `value`
    #[inline]
    #[must_use]
    pub fn position_of(&self, value: &SymValue) -> Option<usize> {
        self.slots.index_of(value)
    }

    /// Slots in order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SymValue> {
        self.slots.iter()
    }

    /// Append an element
    ///
    /// # Errors
    /// Returns [`StoreError::SymbolicLength`] when the length is symbolic
    pub fn push(&mut self, value: SymValue) -> Result<(), StoreError> {
        self.require_concrete()?;
        self.slots.push_back(value);
        Ok(())
    }

    /// Remove and return the element at `index`
    ///
    /// # Errors
    /// Returns error when the length is symbolic or `index` is out of bounds
    pub fn remove_at(&mut self, index: usize) -> Result<SymValue, StoreError> {
        self.require_concrete()?;
        if index >= self.slots.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index))
    }

    /// Remove every element; the length becomes concrete 0
    pub fn clear(&mut self) {
        self.slots.clear();
        self.length = Length::Concrete;
    }

    /// Fix a symbolic length to `len`, dropping slots past it
    ///
    /// Callers do this on a path whose condition already selects `len`.
    ///
    /// # Errors
    /// Returns [`StoreError::LengthOutOfRange`] if `len` is not feasible
    pub fn concretize(&mut self, len: usize) -> Result<(), StoreError> {
        match &self.length {
            Length::Concrete => {
                let current = self.slots.len();
                if len == current {
                    Ok(())
                } else {
                    Err(StoreError::LengthOutOfRange {
                        requested: len,
                        min: current,
                        max: current,
                    })
                }
            }
            Length::Symbolic { symbol, min, max } => {
                let upper = (*max).min(self.slots.len());
                if len < *min || len > upper {
                    return Err(StoreError::LengthOutOfRange {
                        requested: len,
                        min: *min,
                        max: upper,
                    });
                }
                tracing::debug!(symbol = %symbol, len, "concretizing store length");
                self.slots.truncate(len);
                self.length = Length::Concrete;
                Ok(())
            }
        }
    }

    /// Elements of a concrete store
    ///
    /// # Errors
    /// Returns [`StoreError::SymbolicLength`] when the length is symbolic
    pub fn to_vec(&self) -> Result<Vec<SymValue>, StoreError> {
        self.require_concrete()?;
        Ok(self.slots.iter().cloned().collect())
    }

    /// Symbolic membership test: disjunction of `element == value` over the
    /// elements, each guarded by `len > i` when the length is symbolic
    #[must_use]
    pub fn membership(&self, value: &SymValue) -> SymValue {
        let len = self.len();
        self.slots
            .iter()
            .enumerate()
            .fold(SymValue::bool(false), |acc, (i, element)| {
                let hit = element.equals(value);
                let hit = if self.is_symbolic() {
                    len.greater_than(&SymValue::int(i64::try_from(i).unwrap_or(i64::MAX)))
                        .and(&hit)
                } else {
                    hit
                };
                acc.or(&hit)
            })
    }

    /// Check that the length bounds are feasible and backed by slots
    ///
    /// # Errors
    /// - [`StoreError::EmptyLengthRange`] when `min` exceeds `max`
    /// - [`StoreError::Inconsistent`] when `max` exceeds the slots
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Length::Symbolic { min, max, .. } = self.length {
            if min > max {
                return Err(StoreError::EmptyLengthRange { min, max });
            }
            if max > self.slots.len() {
                return Err(StoreError::Inconsistent {
                    slots: self.slots.len(),
                    required: max,
                });
            }
        }
        Ok(())
    }

    /// Feasible concrete lengths with their selecting constraints
    ///
    /// A concrete store yields exactly one unconstrained case.
    ///
    /// # Errors
    /// Returns [`StoreError::Inconsistent`] for an inconsistent store
    pub fn length_cases(&self) -> Result<Vec<LengthCase>, StoreError> {
        self.validate()?;
        Ok(match &self.length {
            Length::Concrete => vec![LengthCase {
                len: self.slots.len(),
                constraint: None,
            }],
            Length::Symbolic { symbol, min, max } => {
                let len = SymValue::symbol(symbol.clone());
                (*min..=*max)
                    .map(|k| LengthCase {
                        len: k,
                        constraint: Some(
                            len.equals(&SymValue::int(i64::try_from(k).unwrap_or(i64::MAX))),
                        ),
                    })
                    .collect()
            }
        })
    }

    /// Fail unless the length is concrete
    ///
    /// # Errors
    /// Returns [`StoreError::SymbolicLength`] when the length is symbolic
    pub fn require_concrete(&self) -> Result<(), StoreError> {
        match &self.length {
            Length::Concrete => Ok(()),
            Length::Symbolic { symbol, .. } => Err(StoreError::SymbolicLength {
                symbol: symbol.clone(),
            }),
        }
    }
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<SymValue> for ElementStore {
    fn from_iter<I: IntoIterator<Item = SymValue>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> ElementStore {
        ElementStore::from_values(["a", "b", "c"].map(SymValue::symbol))
    }

    #[test]
    fn empty_store() {
        let store = ElementStore::new();
        assert_eq!(store.len(), SymValue::int(0));
        assert_eq!(store.concrete_len(), Some(0));
        assert!(!store.is_symbolic());
    }

    #[test]
    fn concrete_store_keeps_order() {
        let store = abc();
        assert_eq!(store.len(), SymValue::int(3));
        assert_eq!(store.get(1).unwrap(), &SymValue::symbol("b"));
        assert_eq!(
            store.to_vec().unwrap(),
            vec![
                SymValue::symbol("a"),
                SymValue::symbol("b"),
                SymValue::symbol("c")
            ]
        );
    }

    #[test]
    fn get_out_of_bounds() {
        assert_eq!(
            abc().get(3),
            Err(StoreError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn symbolic_store_shape() {
        let store = ElementStore::symbolic("xs", 2);
        assert_eq!(store.len(), SymValue::symbol("xs.len"));
        assert_eq!(store.capacity(), 2);
        assert_eq!(store.get(1).unwrap(), &SymValue::symbol("xs[1]"));
        assert!(store.concrete_len().is_none());
    }

    #[test]
    fn symbolic_store_rejects_push() {
        let mut store = ElementStore::symbolic("xs", 2);
        let err = store.push(SymValue::int(1)).unwrap_err();
        assert!(matches!(err, StoreError::SymbolicLength { .. }));
        assert!(store.to_vec().is_err());
    }

    #[test]
    fn clear_concretizes() {
        let mut store = ElementStore::symbolic("xs", 2);
        store.clear();
        assert_eq!(store.concrete_len(), Some(0));
        assert!(store.push(SymValue::int(1)).is_ok());
    }

    #[test]
    fn concretize_truncates() {
        let mut store = ElementStore::symbolic("xs", 3);
        store.concretize(2).unwrap();
        assert_eq!(
            store.to_vec().unwrap(),
            vec![SymValue::symbol("xs[0]"), SymValue::symbol("xs[1]")]
        );
    }

    #[test]
    fn concretize_out_of_range() {
        let mut store = ElementStore::symbolic("xs", 1);
        assert!(matches!(
            store.concretize(2),
            Err(StoreError::LengthOutOfRange { requested: 2, .. })
        ));
    }

    #[test]
    fn length_cases_concrete() {
        let cases = abc().length_cases().unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].len, 3);
        assert!(cases[0].constraint.is_none());
    }

    #[test]
    fn length_cases_symbolic() {
        let cases = ElementStore::symbolic("xs", 2).length_cases().unwrap();
        let lens: Vec<usize> = cases.iter().map(|c| c.len).collect();
        assert_eq!(lens, vec![0, 1, 2]);
        assert_eq!(
            cases[1].constraint.as_ref().unwrap().to_string(),
            "(xs.len == 1)"
        );
    }

    #[test]
    fn inconsistent_store_detected() {
        let store = ElementStore::from_parts(
            [SymValue::symbol("only")],
            Length::Symbolic {
                symbol: "n".to_string(),
                min: 0,
                max: 3,
            },
        );
        assert_eq!(
            store.length_cases(),
            Err(StoreError::Inconsistent {
                slots: 1,
                required: 3
            })
        );
    }

    #[test]
    fn membership_concrete_folds() {
        let store = ElementStore::from_values([SymValue::int(1), SymValue::int(2)]);
        assert_eq!(store.membership(&SymValue::int(2)), SymValue::bool(true));
        assert_eq!(store.membership(&SymValue::int(5)), SymValue::bool(false));
    }

    #[test]
    fn membership_symbolic_is_guarded() {
        let store = ElementStore::symbolic("xs", 1);
        let member = store.membership(&SymValue::symbol("y"));
        assert_eq!(member.to_string(), "((xs.len > 0) && (xs[0] == y))");
    }

    #[test]
    fn inverted_length_bounds_rejected() {
        let store = ElementStore::from_parts(
            [SymValue::symbol("s0"), SymValue::symbol("s1")],
            Length::Symbolic {
                symbol: "s.len".to_string(),
                min: 2,
                max: 1,
            },
        );
        assert_eq!(
            store.validate(),
            Err(StoreError::EmptyLengthRange { min: 2, max: 1 })
        );
        assert_eq!(
            store.length_cases(),
            Err(StoreError::EmptyLengthRange { min: 2, max: 1 })
        );
    }

    #[test]
    fn remove_at_shifts() {
        let mut store = abc();
        assert_eq!(store.remove_at(0).unwrap(), SymValue::symbol("a"));
        assert_eq!(store.position_of(&SymValue::symbol("c")), Some(1));
    }

    proptest! {
        #[test]
        fn clone_is_isolated(values in proptest::collection::vec(any::<i64>(), 0..16), extra in any::<i64>()) {
            let original = ElementStore::from_values(values.iter().copied().map(SymValue::int));
            let mut fork = original.clone();
            fork.push(SymValue::int(extra)).unwrap();

            prop_assert_eq!(original.concrete_len(), Some(values.len()));
            prop_assert_eq!(fork.concrete_len(), Some(values.len() + 1));
        }
    }
}
