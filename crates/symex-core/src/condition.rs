//! Path conditions
//!
//! Provides [`PathCondition`], the conjunction of constraints that selects one
//! explored path. Feasibility is decided by constant folding and syntactic
//! contradiction only; anything stronger belongs to the solver.

use crate::value::{BinaryOp, SymValue};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Conjunction of constraints along one execution path
///
/// # Invariants
/// - Never contains a constant constraint
/// - Never contains a constraint together with its negation
/// - Cloning is O(1) (structural sharing), so forking a path is cheap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCondition {
    constraints: Vector<SymValue>,
}

impl PathCondition {
    /// Unconstrained (always feasible) condition
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend with `constraint`, or `None` if the result is infeasible
    ///
    /// - constant `true` leaves the condition unchanged
    /// - constant `false` is infeasible
    /// - a constraint whose negation is present is infeasible
    /// - `s == k1` after `s == k2` with distinct constants is infeasible
    #[must_use]
    pub fn assume(&self, constraint: SymValue) -> Option<Self> {
        match constraint.as_bool() {
            Some(true) => return Some(self.clone()),
            Some(false) => return None,
            None => {}
        }

        if self.contradicts(&constraint) {
            return None;
        }
        if self.constraints.contains(&constraint) {
            return Some(self.clone());
        }

        let mut next = self.clone();
        next.constraints.push_back(constraint);
        Some(next)
    }

    /// Check whether `constraint` can be added without a syntactic contradiction
    #[inline]
    #[must_use]
    pub fn admits(&self, constraint: &SymValue) -> bool {
        constraint.as_bool() != Some(false) && !self.contradicts(constraint)
    }

    fn contradicts(&self, constraint: &SymValue) -> bool {
        let negated = constraint.negate();
        if negated.as_bool() == Some(true) || self.constraints.contains(&negated) {
            return true;
        }

        // Distinct constants pinned to the same term
        if let Some((term, value)) = pinned(constraint) {
            return self
                .constraints
                .iter()
                .filter_map(pinned)
                .any(|(t, v)| t == term && v != value);
        }
        false
    }

    /// Constraints in the order they were assumed
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SymValue> {
        self.constraints.iter()
    }

    /// Number of constraints
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True when no constraint has been assumed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Conjunction of all constraints as a single value
    #[must_use]
    pub fn to_value(&self) -> SymValue {
        self.constraints
            .iter()
            .fold(SymValue::bool(true), |acc, c| acc.and(c))
    }
}

/// `term == constant` in either operand order
fn pinned(constraint: &SymValue) -> Option<(&SymValue, &SymValue)> {
    match constraint {
        SymValue::Binary(BinaryOp::Eq, l, r) if r.is_concrete() => Some((&**l, &**r)),
        SymValue::Binary(BinaryOp::Eq, l, r) if l.is_concrete() => Some((&**r, &**l)),
        _ => None,
    }
}

impl Display for PathCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.constraints.is_empty() {
            return write!(f, "true");
        }
        let parts: Vec<String> = self.constraints.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" && "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> SymValue {
        SymValue::symbol("x")
    }

    #[test]
    fn new_condition_is_empty() {
        let cond = PathCondition::new();
        assert!(cond.is_empty());
        assert_eq!(cond.to_string(), "true");
    }

    #[test]
    fn constant_true_is_dropped() {
        let cond = PathCondition::new().assume(SymValue::bool(true)).unwrap();
        assert!(cond.is_empty());
    }

    #[test]
    fn constant_false_is_infeasible() {
        assert!(PathCondition::new().assume(SymValue::bool(false)).is_none());
    }

    #[test]
    fn negation_is_infeasible() {
        let c = x().greater_than(&SymValue::int(0));
        let cond = PathCondition::new().assume(c.clone()).unwrap();
        assert!(cond.assume(c.negate()).is_none());
        assert!(!cond.admits(&c.negate()));
    }

    #[test]
    fn duplicate_constraint_not_repeated() {
        let c = x().greater_than(&SymValue::int(0));
        let cond = PathCondition::new()
            .assume(c.clone())
            .and_then(|p| p.assume(c))
            .unwrap();
        assert_eq!(cond.len(), 1);
    }

    #[test]
    fn distinct_pinned_constants_conflict() {
        let len = SymValue::symbol("xs.len");
        let cond = PathCondition::new()
            .assume(len.equals(&SymValue::int(2)))
            .unwrap();
        assert!(cond.assume(len.equals(&SymValue::int(3))).is_none());
        assert!(cond.assume(SymValue::int(2).equals(&len)).is_some());
    }

    #[test]
    fn assume_does_not_mutate_original() {
        let base = PathCondition::new();
        let extended = base.assume(x().less_than(&SymValue::int(5))).unwrap();
        assert!(base.is_empty());
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn display_joins_constraints() {
        let cond = PathCondition::new()
            .assume(x().greater_than(&SymValue::int(0)))
            .and_then(|p| p.assume(x().less_than(&SymValue::int(9))))
            .unwrap();
        assert_eq!(cond.to_string(), "(x > 0) && (x < 9)");
        assert_eq!(cond.to_value().to_string(), "((x > 0) && (x < 9))");
    }
}
