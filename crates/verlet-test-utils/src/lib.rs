//! Test utilities for the verlet workspace.
//!
//! Provides [`SnapshotData`], an owned atom-state buffer with seeded
//! random generation and periodic ghost replication, plus the brute-force
//! minimum-image reference enumerator property tests compare list builds
//! against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod reference;
mod snapshot;

pub use reference::{distance_sq, min_image_pairs};
pub use snapshot::SnapshotData;
