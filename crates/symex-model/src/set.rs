//! Model of `java.util.HashSet`
//!
//! Uniqueness is syntactic: two different expressions that might be equal on
//! some path are both kept. Deciding such aliasing is the solver's business.
//! Iteration order is insertion order, which is one valid hash-set order.

use crate::contract::{private, ModelCollection};
use symex_core::SymValue;
use symex_store::{ElementStore, StoreError};

/// Set model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetModel {
    store: ElementStore,
}

impl SetModel {
    /// Model type identity
    pub const MODEL_NAME: &'static str = "org.symex.models.HashSet";

    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set over an existing store, dropping syntactic duplicates
    ///
    /// A symbolic-length store is taken as is; which of its slots are elements
    /// depends on the path.
    #[must_use]
    pub fn from_store(store: ElementStore) -> Self {
        if store.is_symbolic() {
            return Self { store };
        }
        Self::from_values(store.iter().cloned().collect::<Vec<_>>())
    }

    /// Set holding `values`, dropping syntactic duplicates
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = SymValue>) -> Self {
        let mut unique: Vec<SymValue> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self {
            store: ElementStore::from_values(unique),
        }
    }
}

impl private::Sealed for SetModel {}

impl ModelCollection for SetModel {
    fn model_name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    fn store(&self) -> &ElementStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut ElementStore {
        &mut self.store
    }

    fn clone_box(&self) -> Box<dyn ModelCollection> {
        Box::new(self.clone())
    }

    fn add(&mut self, value: SymValue) -> Result<bool, StoreError> {
        self.store.require_concrete()?;
        if self.store.position_of(&value).is_some() {
            return Ok(false);
        }
        self.store.push(value)?;
        Ok(true)
    }
}
