//! Model contract
//!
//! Defines [`ModelCollection`], the capability surface every substituted
//! collection type satisfies. This is a sealed trait: only models defined in
//! this crate can implement it, so analyzed-program code can never supply its
//! own model.

use crate::redirect;
use std::fmt::Debug;
use symex_core::SymValue;
use symex_store::{ElementStore, StoreError};
use symex_stream::SymbolicStream;

/// Stream produced by a modeled collection
///
/// Always the engine's symbolic stream; there is no native variant.
pub type StreamHandle<'a> = SymbolicStream<'a>;

/// Standard collection contract answered from an [`ElementStore`]
///
/// # Contract
/// - Every operation is satisfied from the store alone
/// - Stream production never mutates the collection and never fails
/// - Sequential and parallel stream requests yield equivalent streams
///
/// Implementors provide the store accessors; everything else has a default.
/// The stream entry points only delegate to [`redirect`] and should not be
/// overridden.
pub trait ModelCollection: Debug + private::Sealed {
    /// Identity of the model type (`org.symex.models.ArrayList`)
    fn model_name(&self) -> &'static str;

    /// Backing store
    fn store(&self) -> &ElementStore;

    /// Backing store, mutable
    fn store_mut(&mut self) -> &mut ElementStore;

    /// Independent copy for a forked path
    fn clone_box(&self) -> Box<dyn ModelCollection>;

    /// Number of elements, symbolic when the store length is
    fn size(&self) -> SymValue {
        self.store().len()
    }

    /// `size() == 0`
    fn is_empty(&self) -> SymValue {
        self.size().equals(&SymValue::int(0))
    }

    /// Symbolic membership
    fn contains(&self, value: &SymValue) -> SymValue {
        self.store().membership(value)
    }

    /// Insert `value`; `Ok(false)` when the collection did not change
    ///
    /// # Errors
    /// Store errors, unchanged
    fn add(&mut self, value: SymValue) -> Result<bool, StoreError> {
        self.store_mut().push(value)?;
        Ok(true)
    }

    /// Remove the first element syntactically equal to `value`
    ///
    /// # Errors
    /// Store errors, unchanged (a symbolic length cannot be searched exhaustively)
    fn remove(&mut self, value: &SymValue) -> Result<bool, StoreError> {
        self.store().require_concrete()?;
        match self.store().position_of(value) {
            Some(index) => {
                self.store_mut().remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every element
    fn clear(&mut self) {
        self.store_mut().clear();
    }

    /// Elements in order
    ///
    /// # Errors
    /// Store errors, unchanged
    fn to_vec(&self) -> Result<Vec<SymValue>, StoreError> {
        self.store().to_vec()
    }

    /// Sequential stream over this collection
    fn produce_sequential_stream(&self) -> StreamHandle<'_> {
        redirect::sequential(self)
    }

    /// Parallel stream over this collection; identical to the sequential one
    fn produce_parallel_stream(&self) -> StreamHandle<'_> {
        redirect::parallel(self)
    }

    /// `Collection.stream()`
    fn stream(&self) -> StreamHandle<'_> {
        self.produce_sequential_stream()
    }

    /// `Collection.parallelStream()`
    fn parallel_stream(&self) -> StreamHandle<'_> {
        self.produce_parallel_stream()
    }
}

impl Clone for Box<dyn ModelCollection> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub(crate) mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}
