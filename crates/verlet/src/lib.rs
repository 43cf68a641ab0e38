//! Verlet: neighbor-list construction and spatial decomposition for
//! molecular dynamics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Verlet sub-crates. For most users, adding `verlet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use verlet::prelude::*;
//!
//! // Caller-owned per-atom arrays; all three atoms are locally owned.
//! let positions = vec![[1.0, 1.0, 1.0], [1.5, 1.0, 1.0], [9.0, 9.0, 9.0]];
//! let types = vec![0u32; 3];
//! let tags = vec![AtomTag(1), AtomTag(2), AtomTag(3)];
//! let snapshot = AtomSnapshot::new(&positions, &types, &tags, 3).unwrap();
//! let sim_box = SimBox::orthogonal([0.0; 3], [10.0; 3], [false; 3]).unwrap();
//!
//! // Register a half list at cutoff 2.0 and build it.
//! let mut planner = BuildPlanner::new(PlannerConfig::default()).unwrap();
//! let id = planner
//!     .register(ListRequest::new(ListKind::Half, 2.0))
//!     .unwrap();
//! assert_eq!(
//!     planner.update(snapshot, &sim_box, StepId(0)).unwrap(),
//!     BuildOutcome::Rebuilt
//! );
//!
//! // The close pair is stored once, on the lower-slot origin.
//! let list = planner.list(id).unwrap().plain().unwrap();
//! assert_eq!(list.count(0), 1);
//! assert_eq!(list.count(1), 0);
//! assert_eq!(list.count(2), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `verlet-core` | IDs, atom snapshots, box geometry, bonded topology |
//! | [`arena`] | `verlet-arena` | Paged adjacency storage |
//! | [`space`] | `verlet-space` | Bin grid and search stencils |
//! | [`list`] | `verlet-list` | List builders, entries, exclusion rules |
//! | [`engine`] | `verlet-engine` | Build planner and rebuild scheduling |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and geometry (`verlet-core`).
///
/// Contains the strongly-typed identifiers, the [`types::AtomSnapshot`]
/// view over caller-owned arrays, [`types::SimBox`] geometry, and the
/// bonded-exclusion topology tables.
pub use verlet_core as types;

/// Paged adjacency storage (`verlet-arena`).
///
/// [`arena::PagePool`] and its reserve/commit protocol back every
/// neighbor list; the pool doubles on demand up to a configured cap.
pub use verlet_arena as arena;

/// Spatial binning (`verlet-space`).
///
/// [`space::BinGrid`] partitions the local+ghost coordinates into
/// cutoff-sized bins, with [`space::Stencil`] describing which adjacent
/// bins a pair search must visit.
pub use verlet_space as space;

/// Neighbor-list builders (`verlet-list`).
///
/// Half, full, ghost-inclusive, and multi-resolution builds over a
/// shared grid, plus the exclusion machinery
/// ([`list::ExclusionFilter`], [`list::SpecialPolicy`]).
pub use verlet_list as list;

/// Build planning and rebuild scheduling (`verlet-engine`).
///
/// [`engine::BuildPlanner`] owns the registered lists, sizes one shared
/// grid, and consults a [`engine::RebuildScheduler`] so valid lists are
/// reused across steps.
pub use verlet_engine as engine;

/// Common imports for typical Verlet usage.
///
/// ```rust
/// use verlet::prelude::*;
/// ```
///
/// This imports the most frequently used types: the planner and its
/// requests, list forms and entries, core identifiers, and box geometry.
pub mod prelude {
    // Core identifiers and geometry
    pub use verlet_core::{AtomSnapshot, AtomTag, ListId, MoleculeId, SimBox, StepId};

    // List forms, entries, and exclusion rules
    pub use verlet_list::{
        ListKind, MiddleBand, NeighborEntry, NeighborList, RespaCuts, RespaList, SpecialPolicy,
        TypeExclusions,
    };

    // Planner and scheduling
    pub use verlet_engine::{
        BuildOutcome, BuildPlanner, BuildStats, ListHandle, ListRequest, ListState, PlannerConfig,
        SchedulerConfig,
    };

    // Errors surfaced to planner callers
    pub use verlet_engine::{ConfigError, PlannerError};
}
