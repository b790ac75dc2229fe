//! Stream redirection
//!
//! The single translation point between "the collection contract asks for a
//! stream" and "the engine builds a lazy symbolic view". Every model's stream
//! entry points land here, so adding a model never means reimplementing
//! stream semantics.
//!
//! Nothing is copied: the returned stream reads from the collection's own store
//! when a terminal operation runs.

use crate::contract::{ModelCollection, StreamHandle};
use symex_stream::{StreamRequest, SymbolicStream};
use tracing::debug;

/// Symbolic stream for a sequential request
#[must_use]
pub fn sequential<C>(collection: &C) -> StreamHandle<'_>
where
    C: ModelCollection + ?Sized,
{
    open(collection, StreamRequest::Sequential)
}

/// Symbolic stream for a parallel request
///
/// Builds exactly what [`sequential`] builds. Path exploration already covers
/// every reachable order of a deterministic pipeline, so parallel interleavings
/// add paths without adding behavior.
#[must_use]
pub fn parallel<C>(collection: &C) -> StreamHandle<'_>
where
    C: ModelCollection + ?Sized,
{
    open(collection, StreamRequest::Parallel)
}

fn open<C>(collection: &C, request: StreamRequest) -> StreamHandle<'_>
where
    C: ModelCollection + ?Sized,
{
    let store = collection.store();
    debug!(
        model = collection.model_name(),
        ?request,
        len = %store.len(),
        "redirecting stream request"
    );
    SymbolicStream::new(store, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListModel;
    use symex_core::SymValue;

    #[test]
    fn requests_are_recorded() {
        let list = ListModel::new();
        assert_eq!(sequential(&list).request(), StreamRequest::Sequential);
        assert_eq!(parallel(&list).request(), StreamRequest::Parallel);
    }

    #[test]
    fn stream_reads_collection_store() {
        let list = ListModel::from_values([SymValue::int(1)]);
        let stream = sequential(&list);
        assert!(std::ptr::eq(stream.source(), list.store()));
    }

    #[test]
    fn works_through_trait_objects() {
        let boxed: Box<dyn ModelCollection> = Box::new(ListModel::from_values([SymValue::int(5)]));
        let result = parallel(boxed.as_ref()).collect().unwrap();
        assert_eq!(result.single(), Some(&vec![SymValue::int(5)]));
    }
}
