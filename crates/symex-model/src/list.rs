//! Model of `java.util.ArrayList`

use crate::contract::{private, ModelCollection};
use symex_core::SymValue;
use symex_store::{ElementStore, StoreError};

/// Indexed list model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListModel {
    store: ElementStore,
}

impl ListModel {
    /// Model type identity
    pub const MODEL_NAME: &'static str = "org.symex.models.ArrayList";

    /// Empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// List over an existing store
    #[inline]
    #[must_use]
    pub fn from_store(store: ElementStore) -> Self {
        Self { store }
    }

    /// List holding `values` in order
    #[inline]
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = SymValue>) -> Self {
        Self::from_store(ElementStore::from_values(values))
    }

    /// Element at `index`
    ///
    /// On a symbolic store this is the slot; whether the slot is inside the
    /// list is a constraint of the current path.
    ///
    /// # Errors
    /// Returns [`StoreError::IndexOutOfBounds`] past the last slot
    #[inline]
    pub fn get(&self, index: usize) -> Result<&SymValue, StoreError> {
        self.store.get(index)
    }

    /// Index of the first element syntactically equal to `value`
    #[inline]
    #[must_use]
    pub fn index_of(&self, value: &SymValue) -> Option<usize> {
        self.store.position_of(value)
    }
}

impl private::Sealed for ListModel {}

impl ModelCollection for ListModel {
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
}
