//! Spatial binning for neighbor-list construction.
//!
//! Partitions the local+ghost coordinate set into a regular grid of bins
//! sized to the interaction cutoff, so pair enumeration only has to visit
//! same-bin and stencil-adjacent candidates instead of all N² pairs.
//!
//! Orthogonal boxes bin directly in Cartesian space; triclinic boxes bin
//! in fractional (lamda) space so bins follow the skewed lattice vectors,
//! with stencil extents widened from the perpendicular face widths so the
//! coverage guarantee is preserved under tilt.
//!
//! When the grid would exceed its memory budget the build degrades to a
//! single bin covering the whole domain and reports
//! [`BinStrategy::AllPairs`], telling the enumerator to run the direct
//! all-pairs search instead.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod grid;
pub mod stencil;

pub use config::BinConfig;
pub use error::SpaceError;
pub use grid::{BinGrid, BinStrategy};
pub use stencil::Stencil;
