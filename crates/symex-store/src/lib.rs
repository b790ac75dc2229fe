//! SYMEX Element Store
//!
//! The representation behind every modeled collection: a length that may be
//! symbolic plus an addressable sequence of symbolic elements.
//!
//! # Core Concepts
//!
//! - [`ElementStore`]: Slots plus concrete or symbolic length, O(1) to fork
//! - [`LengthCase`]: One feasible concrete length with the constraint selecting it
//! - [`StoreError`]: Store-level failures, propagated unchanged by the layers above
//!
//! # Example
//!
//! ```rust
//! use symex_store::ElementStore;
//!
//! let store = ElementStore::symbolic("xs", 2);
//! let cases = store.length_cases().unwrap();
//!
//! // xs.len == 0, xs.len == 1, xs.len == 2
//! assert_eq!(cases.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod store;

pub use error::StoreError;
pub use store::{ElementStore, Length, LengthCase};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
