//! Substitution registry
//!
//! Provides [`SubstitutionRegistry`], the explicit start-up table consulted
//! when the engine loads a standard collection type, and [`RegistryBuilder`]
//! for assembling custom tables.

use crate::entry::{Requester, SubstitutionEntry, Usage};
use crate::error::RegistryError;
use indexmap::IndexMap;
use symex_core::{EngineConfig, TypeName};
use symex_model::{CollectionModel, ListModel, ModelCollection, SetModel};
use symex_store::ElementStore;
use tracing::{debug, warn};

/// Builder for a [`SubstitutionRegistry`]
///
/// Entries keep their registration order.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: IndexMap<TypeName, SubstitutionEntry>,
}

impl RegistryBuilder {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    ///
    /// # Errors
    /// - [`RegistryError::DuplicateTarget`] if the target already has a model
    /// - [`RegistryError::DuplicateModel`] if the model already replaces another target
    pub fn register(mut self, entry: SubstitutionEntry) -> Result<Self, RegistryError> {
        if self.entries.contains_key(entry.target()) {
            return Err(RegistryError::DuplicateTarget(entry.target().clone()));
        }
        if let Some(existing) = self.entries.values().find(|e| e.model() == entry.model()) {
            return Err(RegistryError::DuplicateModel {
                model: entry.model().clone(),
                existing: existing.target().clone(),
            });
        }

        debug!(
            ty = %entry.target(),
            model = %entry.model(),
            usage = %entry.usage(),
            "registered substitution"
        );
        self.entries.insert(entry.target().clone(), entry);
        Ok(self)
    }

    /// Finish the table
    #[must_use]
    pub fn build(self) -> SubstitutionRegistry {
        SubstitutionRegistry {
            entries: self.entries,
        }
    }
}

/// Ordered table of standard type → model substitutions
///
/// # Invariants
/// - At most one model per target and one target per model
/// - Iteration follows registration order
#[derive(Debug, Clone, Default)]
pub struct SubstitutionRegistry {
    entries: IndexMap<TypeName, SubstitutionEntry>,
}

impl SubstitutionRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a custom table
    #[inline]
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the built-in collection models
    ///
    /// | Target                 | Model                          | Usage    |
    /// |------------------------|--------------------------------|----------|
    /// | `java.util.Collection` | `org.symex.models.Collection`  | internal |
    /// | `java.util.ArrayList`  | `org.symex.models.ArrayList`   | general  |
    /// | `java.util.HashSet`    | `org.symex.models.HashSet`     | general  |
    #[must_use]
    pub fn with_defaults() -> Self {
        let entries = default_entries()
            .into_iter()
            .map(|entry| (entry.target().clone(), entry))
            .collect();
        Self { entries }
    }

    /// Built-in registry minus the targets disabled in `config`
    ///
    /// # Errors
    /// - [`RegistryError::InvalidTypeName`] for a malformed disabled target
    /// - [`RegistryError::NotSubstituted`] for a disabled target with no built-in model
    pub fn from_config(config: &EngineConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::with_defaults();
        for raw in &config.disabled_substitutions {
            let target: TypeName = raw.parse()?;
            if registry.entries.shift_remove(&target).is_none() {
                return Err(RegistryError::NotSubstituted(target));
            }
            debug!(ty = %target, "substitution disabled by config");
        }
        Ok(registry)
    }

    /// Whether `target` is replaced by a model
    #[inline]
    #[must_use]
    pub fn is_substituted(&self, target: &TypeName) -> bool {
        self.entries.contains_key(target)
    }

    /// Entry for `target`, regardless of requester
    #[inline]
    #[must_use]
    pub fn entry(&self, target: &TypeName) -> Option<&SubstitutionEntry> {
        self.entries.get(target)
    }

    /// Model replacing `target`
    #[inline]
    #[must_use]
    pub fn model_for(&self, target: &TypeName) -> Option<&TypeName> {
        self.entry(target).map(SubstitutionEntry::model)
    }

    /// Entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = &SubstitutionEntry> {
        self.entries.values()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load-time lookup of the model for `target` on behalf of `requester`
    ///
    /// # Errors
    /// - [`RegistryError::NotSubstituted`] if `target` has no model
    /// - [`RegistryError::InternalUsage`] if an analyzed program reaches an internal model
    pub fn resolve(
        &self,
        target: &TypeName,
        requester: Requester,
    ) -> Result<&SubstitutionEntry, RegistryError> {
        let entry = self
            .entries
            .get(target)
            .ok_or_else(|| RegistryError::NotSubstituted(target.clone()))?;

        if !entry.usage().permits(requester) {
            warn!(
                ty = %target,
                model = %entry.model(),
                ?requester,
                "denied internal substitution"
            );
            return Err(RegistryError::InternalUsage {
                target: target.clone(),
                model: entry.model().clone(),
            });
        }

        debug!(ty = %target, model = %entry.model(), ?requester, "resolved substitution");
        Ok(entry)
    }

    /// Resolve `target` and build its model over `store`
    ///
    /// # Errors
    /// Same as [`Self::resolve`]
    pub fn instantiate(
        &self,
        target: &TypeName,
        requester: Requester,
        store: ElementStore,
    ) -> Result<Box<dyn ModelCollection>, RegistryError> {
        Ok(self.resolve(target, requester)?.construct(store))
    }
}

fn default_entries() -> [SubstitutionEntry; 3] {
    [
        SubstitutionEntry::new(
            TypeName::new(["java", "util", "Collection"]),
            TypeName::new(["org", "symex", "models", "Collection"]),
            Usage::Internal,
            |store| Box::new(CollectionModel::from_store(store)),
        ),
        SubstitutionEntry::new(
            TypeName::new(["java", "util", "ArrayList"]),
            TypeName::new(["org", "symex", "models", "ArrayList"]),
            Usage::General,
            |store| Box::new(ListModel::from_store(store)),
        ),
        SubstitutionEntry::new(
            TypeName::new(["java", "util", "HashSet"]),
            TypeName::new(["org", "symex", "models", "HashSet"]),
            Usage::General,
            |store| Box::new(SetModel::from_store(store)),
        ),
    ]
}
