//! SYMEX Symbolic Streams
//!
//! Stand-in for the platform's native stream machinery. A [`SymbolicStream`]
//! records pipeline stages without running them; terminal operations explore
//! every feasible path through the pipeline and report one outcome per path.
//!
//! # Core Concepts
//!
//! - [`SymbolicStream`]: Lazy pipeline borrowing an [`ElementStore`](symex_store::ElementStore)
//! - [`StreamRequest`]: Which contract entry point produced the stream (diagnostic only)
//! - [`Exploration`]: Per-path outcomes plus the number of branches taken
//! - [`StreamError`]: Path budget overrun, or a store error passed through unchanged
//!
//! # Branch points
//!
//! ```text
//! length cases ──► element 0 ──► filter? ──┬─► kept    ──► element 1 ...
//!                                          └─► dropped ──► element 1 ...
//! ```
//!
//! # Example
//!
//! ```rust
//! use symex_core::SymValue;
//! use symex_store::ElementStore;
//! use symex_stream::{StreamRequest, SymbolicStream};
//!
//! let store = ElementStore::from_values([SymValue::symbol("a"), SymValue::int(4)]);
//! let result = SymbolicStream::new(&store, StreamRequest::Sequential)
//!     .filter(|v| v.greater_than(&SymValue::int(0)))
//!     .count()
//!     .unwrap();
//!
//! // `a > 0` is unknown, `4 > 0` folds: one branch, two paths
//! assert_eq!(result.branches(), 1);
//! assert_eq!(result.path_count(), 2);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod exploration;
mod stream;

pub use error::StreamError;
pub use exploration::{Exploration, PathOutcome};
pub use stream::{StreamRequest, SymbolicStream};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
