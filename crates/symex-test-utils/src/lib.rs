//! Testing utilities for SYMEX workspace
//!
//! Shared fixtures, proptest strategies and tracing setup.

#![allow(missing_docs)]

use proptest::prelude::*;
use symex_core::{BinaryOp, SymValue};
use symex_model::{ListModel, SetModel};
use symex_store::ElementStore;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; later calls are no-ops
///
/// Honors `RUST_LOG`, defaulting to `debug` for the workspace crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("symex_stream=debug,symex_model=debug,symex_registry=debug")
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn sym(name: &str) -> SymValue {
    SymValue::symbol(name)
}

pub fn syms(names: &[&str]) -> Vec<SymValue> {
    names.iter().copied().map(SymValue::symbol).collect()
}

pub fn ints(values: &[i64]) -> Vec<SymValue> {
    values.iter().copied().map(SymValue::int).collect()
}

/// `[a, b, c]` of unconstrained symbols
pub fn abc_list() -> ListModel {
    ListModel::from_values(syms(&["a", "b", "c"]))
}

pub fn int_list(values: &[i64]) -> ListModel {
    ListModel::from_values(ints(values))
}

pub fn int_set(values: &[i64]) -> SetModel {
    SetModel::from_values(ints(values))
}

/// Store of unknown length in `0..=max` named `name`
pub fn symbolic_store(name: &str, max: usize) -> ElementStore {
    ElementStore::symbolic(name, max)
}

pub fn arb_symbol() -> impl Strategy<Value = SymValue> {
    prop::sample::select(vec!["a", "b", "c", "x", "y"]).prop_map(SymValue::symbol)
}

/// Leaf values: small ints, booleans and symbols
pub fn arb_leaf() -> impl Strategy<Value = SymValue> {
    prop_oneof![
        (-5i64..5).prop_map(SymValue::int),
        any::<bool>().prop_map(SymValue::bool),
        arb_symbol(),
    ]
}

/// Integer-valued expressions, possibly symbolic
pub fn arb_int_expr() -> impl Strategy<Value = SymValue> {
    let leaf = prop_oneof![(-5i64..5).prop_map(SymValue::int), arb_symbol()];
    leaf.prop_recursive(3, 12, 2, |inner| {
        (
            prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul]),
            inner.clone(),
            inner,
        )
            .prop_map(|(op, lhs, rhs)| SymValue::binary(op, lhs, rhs))
    })
}

pub fn arb_sym_value() -> impl Strategy<Value = SymValue> {
    prop_oneof![arb_leaf(), arb_int_expr()]
}

/// Lists of mixed concrete and symbolic integers
pub fn arb_list(max_len: usize) -> impl Strategy<Value = ListModel> {
    prop::collection::vec(arb_int_expr(), 0..=max_len).prop_map(ListModel::from_values)
}
