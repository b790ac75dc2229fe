//! SYMEX Substitution Registry
//!
//! Explicit table mapping standard collection types to the engine models that
//! replace them at load time, plus the per-path owner of modeled collections.
//!
//! # Core Concepts
//!
//! - [`SubstitutionRegistry`]: Ordered, queryable substitution table built at start-up
//! - [`SubstitutionEntry`]: One `target → model` mapping with its [`Usage`] flag
//! - [`Requester`]: Who asks for a substitution; analyzed programs never reach internal models
//! - [`ExecutionPath`]: Collections created on one explored path, forked by value
//!
//! The registry is a plain value. Construct one per engine (or per test) and
//! pass it to the paths that need it.
//!
//! # Example
//!
//! ```rust
//! use symex_core::TypeName;
//! use symex_registry::{Requester, SubstitutionRegistry};
//!
//! let registry = SubstitutionRegistry::with_defaults();
//! let collection: TypeName = "java.util.Collection".parse().unwrap();
//!
//! assert!(registry.is_substituted(&collection));
//! assert!(registry.resolve(&collection, Requester::Engine).is_ok());
//! assert!(registry.resolve(&collection, Requester::AnalyzedProgram).is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod entry;
mod error;
mod path;
mod registry;

pub use entry::{ModelConstructor, Requester, SubstitutionEntry, Usage};
pub use error::RegistryError;
pub use path::{CollectionId, ExecutionPath};
pub use registry::{RegistryBuilder, SubstitutionRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
