use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::any::{Any, TypeId};
use std::cell::Cell;
use symex_core::SymValue;
use symex_model::{CollectionModel, ListModel, ModelCollection, SetModel, StreamRequest};
use symex_store::{ElementStore, StoreError};
use symex_stream::{StreamError, SymbolicStream};
use symex_test_utils::{abc_list, arb_list, init_tracing, int_list, sym, syms, symbolic_store};

fn positive(v: &SymValue) -> SymValue {
    v.greater_than(&SymValue::int(0))
}

fn type_of<T: Any>(_: &T) -> TypeId {
    TypeId::of::<T>()
}

#[test]
fn abc_collects_in_order_for_both_requests() {
    init_tracing();
    let list = abc_list();

    let sequential = list.produce_sequential_stream().collect().unwrap();
    let parallel = list.produce_parallel_stream().collect().unwrap();

    assert_eq!(sequential.single(), Some(&syms(&["a", "b", "c"])));
    assert_eq!(parallel.single(), Some(&syms(&["a", "b", "c"])));
    assert_eq!(sequential, parallel);
}

#[test]
fn empty_collection_yields_empty_sequence_without_branches() {
    let empty: Vec<Box<dyn ModelCollection>> = vec![
        Box::new(CollectionModel::new()),
        Box::new(ListModel::new()),
        Box::new(SetModel::new()),
    ];

    for collection in &empty {
        for stream in [collection.stream(), collection.parallel_stream()] {
            let result = stream.collect().unwrap();
            assert_eq!(result.single(), Some(&Vec::new()));
            assert_eq!(result.branches(), 0);
        }
    }
}

#[test]
fn handles_are_independently_consumable() {
    let list = abc_list();
    let first = list.stream();
    let second = list.stream();

    let exhausted = first.count().unwrap();
    assert_eq!(exhausted.single(), Some(&3));

    let remaining = second.collect().unwrap();
    assert_eq!(remaining.single(), Some(&syms(&["a", "b", "c"])));
}

#[test]
fn stream_production_does_not_mutate() {
    let list = abc_list();
    let before = list.clone();

    let _ = list.stream();
    let _ = list.parallel_stream();
    let consumed = list.stream().filter(positive).map(|v| v.times(&SymValue::int(2)));
    let _ = consumed.collect().unwrap();

    assert_eq!(list, before);
}

#[test]
fn handle_is_always_the_symbolic_stream() {
    let list: &'static ListModel = Box::leak(Box::new(abc_list()));
    let expected = TypeId::of::<SymbolicStream<'static>>();

    assert_eq!(type_of(&list.stream()), expected);
    assert_eq!(type_of(&list.parallel_stream()), expected);
    assert_eq!(type_of(&list.produce_sequential_stream()), expected);
    assert_eq!(type_of(&list.produce_parallel_stream()), expected);
}

#[test]
fn request_is_recorded_for_diagnostics() {
    let list = abc_list();
    assert_eq!(list.stream().request(), StreamRequest::Sequential);
    assert_eq!(list.parallel_stream().request(), StreamRequest::Parallel);
}

#[test]
fn symbolic_filter_branches_identically() {
    let list = abc_list();

    let sequential = list.stream().filter(positive).collect().unwrap();
    let parallel = list.parallel_stream().filter(positive).collect().unwrap();

    // Each undecided element doubles the paths
    assert_eq!(sequential.path_count(), 8);
    assert_eq!(sequential.branches(), 7);
    assert_eq!(sequential, parallel);
}

#[test]
fn symbolic_length_branches_identically() {
    let collection = CollectionModel::from_store(symbolic_store("xs", 2));

    let sequential = collection.stream().count().unwrap();
    let parallel = collection.parallel_stream().count().unwrap();

    let mut counts: Vec<usize> = sequential.values().copied().collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![0, 1, 2]);
    assert_eq!(sequential.branches(), 2);
    assert_eq!(sequential, parallel);
}

#[test]
fn short_circuit_terminals_branch_identically() {
    let list = ListModel::from_values(syms(&["a", "b"]));

    for request in [StreamRequest::Sequential, StreamRequest::Parallel] {
        let stream = || match request {
            StreamRequest::Sequential => list.stream(),
            StreamRequest::Parallel => list.parallel_stream(),
        };

        let limited = stream().filter(positive).limit(1).collect().unwrap();
        let first = stream().filter(positive).find_first().unwrap();
        let any = stream().filter(positive).any_match(|_| SymValue::bool(true)).unwrap();

        assert_eq!((limited.path_count(), limited.branches()), (3, 2));
        assert_eq!((first.path_count(), first.branches()), (3, 2));
        assert_eq!((any.path_count(), any.branches()), (3, 2));
    }
}

#[test]
fn peek_sees_each_element_once_per_request() {
    let list = int_list(&[1, 2, 3]);
    let seen = Cell::new(0);

    list.stream().peek(|_| seen.set(seen.get() + 1)).count().unwrap();
    let after_sequential = seen.get();
    list.parallel_stream().peek(|_| seen.set(seen.get() + 1)).count().unwrap();

    assert_eq!(after_sequential, 3);
    assert_eq!(seen.get(), 6);
}

#[test]
fn store_errors_propagate_unchanged() {
    let inconsistent = ElementStore::from_parts(
        [sym("s[0]")],
        symex_store::Length::Symbolic {
            symbol: "s.len".to_string(),
            min: 0,
            max: 3,
        },
    );
    let collection = CollectionModel::from_store(inconsistent);

    let sequential = collection.stream().collect().unwrap_err();
    let parallel = collection.parallel_stream().collect().unwrap_err();

    assert!(matches!(
        sequential,
        StreamError::Store(StoreError::Inconsistent { .. })
    ));
    assert_eq!(sequential, parallel);
}

#[test]
fn inverted_length_bounds_are_rejected() {
    let inverted = ElementStore::from_parts(
        syms(&["s0", "s1"]),
        symex_store::Length::Symbolic {
            symbol: "s.len".to_string(),
            min: 2,
            max: 1,
        },
    );
    let collection = CollectionModel::from_store(inverted);

    let sequential = collection.stream().collect();
    let parallel = collection.parallel_stream().collect();

    assert_eq!(
        sequential,
        Err(StreamError::Store(StoreError::EmptyLengthRange { min: 2, max: 1 }))
    );
    assert_eq!(sequential, parallel);
}

#[test]
fn path_budget_applies_to_both_requests() {
    let list = ListModel::from_values(syms(&["a", "b", "c", "d"]));

    let sequential = list.stream().with_max_paths(4).filter(positive).collect();
    let parallel = list.parallel_stream().with_max_paths(4).filter(positive).collect();

    assert_eq!(sequential, Err(StreamError::PathLimitExceeded { limit: 4 }));
    assert_eq!(sequential, parallel);
}

#[test]
fn set_stream_sees_deduplicated_elements() {
    let mut set = SetModel::new();
    set.add(sym("a")).unwrap();
    set.add(sym("a")).unwrap();
    set.add(sym("b")).unwrap();

    let result = set.parallel_stream().collect().unwrap();
    assert_eq!(result.single(), Some(&syms(&["a", "b"])));
}

#[test]
fn streams_after_mutation_see_new_contents() {
    let mut list = abc_list();
    let before = list.stream().count().unwrap();
    list.add(sym("d")).unwrap();
    let after = list.stream().count().unwrap();

    assert_eq!(before.single(), Some(&3));
    assert_eq!(after.single(), Some(&4));
}

proptest! {
    #[test]
    fn prop_parallel_equals_sequential(list in arb_list(4)) {
        let seq = list.stream().filter(positive).map(|v| v.plus(&SymValue::int(1))).collect();
        let par = list.parallel_stream().filter(positive).map(|v| v.plus(&SymValue::int(1))).collect();
        prop_assert_eq!(seq, par);

        prop_assert_eq!(list.stream().count(), list.parallel_stream().count());
        prop_assert_eq!(list.stream().sum(), list.parallel_stream().sum());
        prop_assert_eq!(list.stream().find_first(), list.parallel_stream().find_first());
        prop_assert_eq!(
            list.stream().any_match(positive),
            list.parallel_stream().any_match(positive)
        );
        prop_assert_eq!(
            list.stream().all_match(positive),
            list.parallel_stream().all_match(positive)
        );
        prop_assert_eq!(
            list.stream().skip(1).limit(2).collect(),
            list.parallel_stream().skip(1).limit(2).collect()
        );
    }

    #[test]
    fn prop_stream_production_is_idempotent(list in arb_list(5)) {
        let snapshot = list.store().clone();

        let first = list.stream().collect();
        let second = list.stream().collect();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(list.store(), &snapshot);
        if let Ok(first) = first {
            prop_assert_eq!(first.single(), Some(&list.to_vec().unwrap()));
        }
    }

    #[test]
    fn prop_symbolic_length_equivalence(max in 0usize..4) {
        let collection = CollectionModel::from_store(symbolic_store("xs", max));
        let seq = collection.stream().filter(positive).count();
        let par = collection.parallel_stream().filter(positive).count();
        prop_assert_eq!(seq, par);
    }
}
