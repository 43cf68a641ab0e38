//! Page-pool allocation for variable-length neighbor runs.
//!
//! Neighbor lists need one growable run of indices per atom, rebuilt every
//! few timesteps. Allocating each run on the heap would churn the
//! allocator at every rebuild, so runs are carved out of fixed-size pages
//! that persist across rebuilds:
//!
//! ```text
//! PagePool
//! ├── Page[] (fixed-size Vec<u32>, bump cursor, allocated on demand)
//! ├── reserve() → worst-case chunk from the current page
//! ├── commit(n) → shrink to actual length, yielding a Row handle
//! └── reset()  → rewind every page for the next rebuild (no free)
//! ```
//!
//! A [`Row`] is an index-based handle (page, offset, length) rather than a
//! pointer, so committed runs stay valid while later reservations allocate
//! fresh pages.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod pool;

pub use config::PageConfig;
pub use error::ArenaError;
pub use pool::{PagePool, Row};
