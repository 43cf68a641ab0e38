//! Pair enumeration: turning a bin grid into neighbor lists.
//!
//! For every enumeration origin the builders in this crate visit the
//! candidates drawn from the origin's bin and its stencil (or every slot,
//! when the grid fell back to the all-pairs strategy), apply the squared
//! cutoff test on the ghost-replicated coordinates already present in the
//! snapshot, consult the [`ExclusionFilter`], and append survivors to a
//! page-pooled [`NeighborList`].
//!
//! Four list forms cover the variant family:
//!
//! - [`build_half`] — each unordered pair once, with the Newton tie-breaks
//!   that keep pair counting exact across process boundaries.
//! - [`build_full`] — every directed pair with an owned origin.
//! - [`build_full_ghost`] — full list with ghost slots as origins too, for
//!   per-atom force-decomposition schemes.
//! - [`build_respa`] — one half-list pass partitioned into inner, middle,
//!   and outer cutoff shells for multi-timestep integrators.
//!
//! A build that overflows its page pool aborts with a recoverable
//! [`BuildError`]; the caller grows the pool and reruns the whole build.
//! Partial lists are never published.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod context;
pub mod entry;
pub mod error;
pub mod exclusion;
pub mod full;
pub mod half;
pub mod list;
pub mod respa;
mod scan;

pub use context::{BuildContext, DEFAULT_TIE_EPSILON};
pub use entry::NeighborEntry;
pub use error::BuildError;
pub use exclusion::{ExclusionFilter, SpecialCheck, SpecialPolicy, TypeExclusions};
pub use full::{build_full, build_full_ghost};
pub use half::build_half;
pub use list::{ListKind, MiddleBand, NeighborList, Neighbors, RespaCuts, RespaList};
pub use respa::build_respa;
