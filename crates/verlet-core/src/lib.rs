//! Core types for the Verlet neighbor-list engine.
//!
//! Defines the vocabulary shared by every other crate in the workspace:
//! strongly-typed identifiers, the read-only [`AtomSnapshot`] view over
//! caller-owned per-atom arrays, simulation box geometry ([`SimBox`],
//! orthogonal and triclinic), and the bonded-exclusion topology tables
//! ([`SpecialTable`], [`MoleculeTemplate`]).
//!
//! Nothing here allocates per build or performs any spatial search; this
//! crate is pure data definitions plus the geometry arithmetic
//! (fractional-coordinate transforms, minimum-image checks) that the
//! binning and enumeration crates share.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod id;
pub mod simbox;
pub mod snapshot;
pub mod topology;

pub use error::{BoxError, SnapshotError};
pub use id::{AtomTag, ListId, MoleculeId, StepId};
pub use simbox::SimBox;
pub use snapshot::AtomSnapshot;
pub use topology::{MoleculeTemplate, SpecialTable, SpecialTier, TemplateBinding};
