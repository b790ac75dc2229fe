//! SYMEX Model Contract Layer
//!
//! Engine-authored stand-ins for the platform's collection types. Every model
//! answers the standard collection contract from its
//! [`ElementStore`](symex_store::ElementStore); the two stream-producing entry
//! points are redirected to [`SymbolicStream`](symex_stream::SymbolicStream).
//!
//! # Core Concepts
//!
//! - [`ModelCollection`]: Sealed capability trait shared by all collection models
//! - [`redirect`]: The single place stream requests are turned into symbolic streams
//! - [`CollectionModel`], [`ListModel`], [`SetModel`]: Concrete models
//!
//! # Example
//!
//! ```rust
//! use symex_core::SymValue;
//! use symex_model::{ListModel, ModelCollection};
//!
//! let list = ListModel::from_values(["a", "b", "c"].map(SymValue::symbol));
//!
//! let sequential = list.stream().collect().unwrap();
//! let parallel = list.parallel_stream().collect().unwrap();
//! assert_eq!(sequential, parallel);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod collection;
mod contract;
mod list;
pub mod redirect;
mod set;

pub use collection::CollectionModel;
pub use contract::{ModelCollection, StreamHandle};
pub use list::ListModel;
pub use set::SetModel;
pub use symex_stream::StreamRequest;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
