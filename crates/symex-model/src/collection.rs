//! Model of the standard `Collection` interface
//!
//! Used by the engine when it needs a collection whose concrete class is not
//! known. Internal use only: analyzed programs never resolve this model.

use crate::contract::{private, ModelCollection};
use symex_core::SymValue;
use symex_store::ElementStore;

/// Ordered collection model backing `java.util.Collection`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionModel {
    store: ElementStore,
}

impl CollectionModel {
    /// Model type identity
    pub const MODEL_NAME: &'static str = "org.symex.models.Collection";

    /// Empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection over an existing store
    #[inline]
    #[must_use]
    pub fn from_store(store: ElementStore) -> Self {
        Self { store }
    }

    /// Collection holding `values` in order
    #[inline]
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = SymValue>) -> Self {
        Self::from_store(ElementStore::from_values(values))
    }
}

impl private::Sealed for CollectionModel {}

impl ModelCollection for CollectionModel {
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
