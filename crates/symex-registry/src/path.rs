//! Execution path state
//!
//! An [`ExecutionPath`] owns the modeled collections created while exploring one
//! path of the analyzed program. Forking clones them; element stores share
//! structure, so a fork is cheap and writes on one path stay invisible to the
//! other.

use crate::entry::Requester;
use crate::error::RegistryError;
use crate::registry::SubstitutionRegistry;
use std::fmt;
use symex_core::{PathCondition, SymValue, TypeName};
use symex_model::ModelCollection;
use symex_store::ElementStore;
use tracing::{debug, trace};

/// Handle of a collection on an [`ExecutionPath`]
///
/// Ids are stable across forks: a collection created before a fork has the
/// same id on both successors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(usize);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of one explored path
#[derive(Debug, Clone)]
pub struct ExecutionPath<'r> {
    registry: &'r SubstitutionRegistry,
    condition: PathCondition,
    collections: Vec<Box<dyn ModelCollection>>,
}

impl<'r> ExecutionPath<'r> {
    /// Root path with no constraints
    #[must_use]
    pub fn new(registry: &'r SubstitutionRegistry) -> Self {
        Self {
            registry,
            condition: PathCondition::new(),
            collections: Vec::new(),
        }
    }

    /// Registry used to create collections
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &'r SubstitutionRegistry {
        self.registry
    }

    /// Constraints selecting this path
    #[inline]
    #[must_use]
    pub fn condition(&self) -> &PathCondition {
        &self.condition
    }

    /// Instantiate the model for `target` over `store`
    ///
    /// # Errors
    /// Resolution errors from [`SubstitutionRegistry::resolve`]
    pub fn create(
        &mut self,
        target: &TypeName,
        requester: Requester,
        store: ElementStore,
    ) -> Result<CollectionId, RegistryError> {
        let model = self.registry.instantiate(target, requester, store)?;
        let id = CollectionId(self.collections.len());
        debug!(%id, ty = %target, model = model.model_name(), "collection created");
        self.collections.push(model);
        Ok(id)
    }

    /// Collection by id
    #[inline]
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<&dyn ModelCollection> {
        self.collections.get(id.0).map(|c| &**c)
    }

    /// Collection by id, mutable
    #[inline]
    pub fn collection_mut(
        &mut self,
        id: CollectionId,
    ) -> Option<&mut (dyn ModelCollection + 'static)> {
        self.collections.get_mut(id.0).map(|c| &mut **c)
    }

    /// Number of collections created on this path
    #[inline]
    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Independent copy of this path
    #[must_use]
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// This path narrowed by `constraint`, `None` when infeasible
    #[must_use]
    pub fn assume(&self, constraint: SymValue) -> Option<Self> {
        let condition = self.condition.assume(constraint)?;
        Some(Self {
            condition,
            ..self.fork()
        })
    }

    /// Split on `constraint` into its feasible successors
    ///
    /// Returns `(taken, not_taken)`.
    #[must_use]
    pub fn branch(&self, constraint: &SymValue) -> (Option<Self>, Option<Self>) {
        let taken = self.assume(constraint.clone());
        let not_taken = self.assume(constraint.negate());
        trace!(
            %constraint,
            taken = taken.is_some(),
            not_taken = not_taken.is_some(),
            "path branched"
        );
        (taken, not_taken)
    }
}
