//! Exploration results
//!
//! Provides [`Exploration`], the result of a terminal stream operation: one
//! [`PathOutcome`] per feasible path.

use serde::{Deserialize, Serialize};
use symex_core::PathCondition;

/// Result on one feasible path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOutcome<T> {
    /// Constraints selecting the path
    pub condition: PathCondition,
    /// Terminal result on the path
    pub value: T,
}

impl<T> PathOutcome<T> {
    /// Create outcome
    #[inline]
    #[must_use]
    pub fn new(condition: PathCondition, value: T) -> Self {
        Self { condition, value }
    }
}

/// Outcomes of a terminal operation over every feasible path
///
/// # Invariants
/// - Outcomes are in exploration order (deterministic for a given pipeline)
/// - `branches` counts forks into two feasible successors; a fork-free
///   exploration has exactly one outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exploration<T> {
    outcomes: Vec<PathOutcome<T>>,
    branches: usize,
}

impl<T> Exploration<T> {
    /// Create exploration result
    #[inline]
    #[must_use]
    pub fn new(outcomes: Vec<PathOutcome<T>>, branches: usize) -> Self {
        Self { outcomes, branches }
    }

    /// Outcomes in exploration order
    #[inline]
    #[must_use]
    pub fn outcomes(&self) -> &[PathOutcome<T>] {
        &self.outcomes
    }

    /// Take ownership of the outcomes
    #[inline]
    #[must_use]
    pub fn into_outcomes(self) -> Vec<PathOutcome<T>> {
        self.outcomes
    }

    /// Number of branches generated
    #[inline]
    #[must_use]
    pub fn branches(&self) -> usize {
        self.branches
    }

    /// Number of feasible paths
    #[inline]
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Results without their conditions
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.outcomes.iter().map(|o| &o.value)
    }

    /// The result when exploration did not branch into several paths
    #[inline]
    #[must_use]
    pub fn single(&self) -> Option<&T> {
        match self.outcomes.as_slice() {
            [only] => Some(&only.value),
            _ => None,
        }
    }

    /// First outcome whose condition satisfies `matches`
    #[must_use]
    pub fn find<P>(&self, matches: P) -> Option<&PathOutcome<T>>
    where
        P: Fn(&PathCondition) -> bool,
    {
        self.outcomes.iter().find(|o| matches(&o.condition))
    }

    /// Transform every result, keeping conditions and branch count
    #[must_use]
    pub fn map<U, F>(self, mut f: F) -> Exploration<U>
    where
        F: FnMut(T) -> U,
    {
        Exploration {
            outcomes: self
                .outcomes
                .into_iter()
                .map(|o| PathOutcome::new(o.condition, f(o.value)))
                .collect(),
            branches: self.branches,
        }
    }
}
