//! SYMEX Core
//!
//! Shared vocabulary of the symbolic-execution engine's modeling layer.
//!
//! # Core Concepts
//!
//! - [`SymValue`]: Symbolic expression with constant-folding smart constructors
//! - [`PathCondition`]: Ordered conjunction of constraints selecting one explored path
//! - [`TypeName`]: Dotted identity of a standard or model type (`java.util.Collection`)
//! - [`EngineConfig`]: Exploration bounds and substitution switches, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use symex_core::{PathCondition, SymValue};
//!
//! let x = SymValue::symbol("x");
//! let cond = PathCondition::new()
//!     .assume(x.greater_than(&SymValue::int(0)))
//!     .unwrap();
//!
//! // The negation is a syntactic contradiction and is pruned.
//! assert!(cond.assume(x.greater_than(&SymValue::int(0)).negate()).is_none());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod condition;
mod config;
mod error;
mod type_name;
mod value;

// Re-exports
pub use condition::PathCondition;
pub use config::EngineConfig;
pub use error::{ConfigError, TypeNameError};
pub use type_name::TypeName;
pub use value::{BinaryOp, SymValue, UnaryOp};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
