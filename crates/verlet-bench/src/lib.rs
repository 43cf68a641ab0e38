//! Benchmark profiles for the Verlet neighbor-list toolkit.
//!
//! Provides the scene parameters the benches share:
//!
//! - [`reference_box`]: periodic cube sized for a target number density
//! - [`REFERENCE_CUTOFF`] / [`REFERENCE_SKIN`]: Lennard-Jones-like radii
//!   in reduced units, roughly 40 neighbors per atom at liquid density

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use verlet_core::{BoxError, SimBox};

/// Physical cutoff used by the reference scenes, in reduced units.
pub const REFERENCE_CUTOFF: f64 = 2.5;

/// Skin distance used by the reference scenes.
pub const REFERENCE_SKIN: f64 = 0.3;

/// Reduced number density of a Lennard-Jones liquid near its triple
/// point; the usual worst case for neighbor-list pressure.
pub const REFERENCE_DENSITY: f64 = 0.84;

/// Periodic cube holding `n` atoms at `density` atoms per unit volume.
pub fn reference_box(n: usize, density: f64) -> Result<SimBox, BoxError> {
    let edge = (n as f64 / density).cbrt();
    SimBox::orthogonal([0.0; 3], [edge; 3], [true; 3])
}
