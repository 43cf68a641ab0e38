//! Registration-time and build-time error types.

use std::error::Error;
use std::fmt;

use verlet_arena::ArenaError;
use verlet_core::ListId;
use verlet_list::BuildError;
use verlet_space::SpaceError;

/// Fatal configuration errors, reported at registration before any build
/// is attempted.
#[derive(Debug)]
pub enum ConfigError {
    /// The list cutoff is zero, negative, or non-finite.
    NonPositiveCutoff {
        /// The offending value.
        value: f64,
    },
    /// The ghost tie-break tolerance is negative or non-finite.
    InvalidTieEpsilon {
        /// The offending value.
        value: f64,
    },
    /// A special-tier weight is negative or non-finite.
    InvalidSpecialWeight {
        /// Tier index in 1-2, 1-3, 1-4 order.
        tier: usize,
        /// The offending value.
        value: f64,
    },
    /// A multi-resolution list was requested without shell radii.
    RespaMissing,
    /// Shell radii were supplied for a non-multi-resolution list.
    RespaNotApplicable,
    /// Multi-resolution shell radii are inconsistently ordered.
    RespaOrdering {
        /// The inner-shell cutoff.
        inner: f64,
        /// The list's outer cutoff.
        outer: f64,
    },
    /// The skin distance is negative or non-finite.
    NegativeSkin {
        /// The offending value.
        value: f64,
    },
    /// The box-shape change tolerance is negative or non-finite.
    InvalidBoxTolerance {
        /// The offending value.
        value: f64,
    },
    /// The page-pool configuration was rejected.
    Pool(ArenaError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveCutoff { value } => {
                write!(f, "list cutoff must be positive and finite, got {value}")
            }
            Self::InvalidTieEpsilon { value } => {
                write!(
                    f,
                    "tie epsilon must be non-negative and finite, got {value}"
                )
            }
            Self::InvalidSpecialWeight { tier, value } => {
                write!(
                    f,
                    "special weight for tier {tier} must be non-negative and finite, got {value}"
                )
            }
            Self::RespaMissing => {
                write!(f, "multi-resolution list requested without shell radii")
            }
            Self::RespaNotApplicable => {
                write!(f, "shell radii supplied for a non-multi-resolution list")
            }
            Self::RespaOrdering { inner, outer } => {
                write!(
                    f,
                    "multi-resolution radii are not ordered (inner {inner}, outer {outer})"
                )
            }
            Self::NegativeSkin { value } => {
                write!(f, "skin must be non-negative and finite, got {value}")
            }
            Self::InvalidBoxTolerance { value } => {
                write!(
                    f,
                    "box tolerance must be non-negative and finite, got {value}"
                )
            }
            Self::Pool(e) => write!(f, "page-pool configuration rejected: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors surfaced by a planner update.
///
/// Build failures abort the whole update; no partial list state is
/// published. Each variant carries enough context to identify the list,
/// cutoff, and atom count involved.
#[derive(Debug)]
pub enum PlannerError {
    /// `update` was called with no lists registered.
    NoLists,
    /// Bin-grid construction failed (geometric degeneracy).
    Space {
        /// The binning cutoff (largest registered cutoff plus skin).
        cutoff: f64,
        /// Slots in the snapshot.
        n_atoms: usize,
        /// The underlying grid error.
        source: SpaceError,
    },
    /// A list build failed after exhausting recovery.
    Build {
        /// The failing list.
        list: ListId,
        /// That list's cutoff including skin.
        cutoff: f64,
        /// Slots in the snapshot.
        n_atoms: usize,
        /// The underlying build error.
        source: BuildError,
    },
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLists => write!(f, "no neighbor lists registered"),
            Self::Space {
                cutoff,
                n_atoms,
                source,
            } => {
                write!(
                    f,
                    "bin grid failed at cutoff {cutoff} over {n_atoms} atoms: {source}"
                )
            }
            Self::Build {
                list,
                cutoff,
                n_atoms,
                source,
            } => {
                write!(
                    f,
                    "build of list {list} failed at cutoff {cutoff} over {n_atoms} atoms: {source}"
                )
            }
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoLists => None,
            Self::Space { source, .. } => Some(source),
            Self::Build { source, .. } => Some(source),
        }
    }
}
