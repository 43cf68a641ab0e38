//! Build-time error types.

use std::error::Error;
use std::fmt;

use verlet_arena::ArenaError;

/// Errors arising while enumerating pairs into a neighbor list.
///
/// The overflow variants are recoverable: the caller grows the page pool
/// and reruns the whole build. Everything else is fatal.
#[derive(Debug)]
pub enum BuildError {
    /// One atom's adjacency run outgrew the pool's worst-case chunk.
    AdjacencyOverflow {
        /// The enumeration origin whose run overflowed.
        atom_slot: usize,
        /// The chunk capacity that was exceeded.
        capacity: usize,
    },
    /// The pool ran out of pages mid-build.
    PagesExhausted {
        /// Pages allocated when the build stopped.
        pages: usize,
        /// The configured page cap.
        max_pages: usize,
    },
    /// The snapshot has more slots than a packed entry can address.
    TooManyAtoms {
        /// Slots in the snapshot.
        n_all: usize,
        /// Largest addressable slot index.
        max_slot: usize,
    },
    /// A non-capacity allocator failure.
    Arena(ArenaError),
}

impl BuildError {
    /// Returns `true` if growing the page pool and rebuilding can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AdjacencyOverflow { .. } | Self::PagesExhausted { .. }
        )
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdjacencyOverflow {
                atom_slot,
                capacity,
            } => {
                write!(
                    f,
                    "adjacency run for atom slot {atom_slot} exceeded the chunk capacity {capacity}"
                )
            }
            Self::PagesExhausted { pages, max_pages } => {
                write!(f, "page pool exhausted ({pages} of {max_pages} pages)")
            }
            Self::TooManyAtoms { n_all, max_slot } => {
                write!(
                    f,
                    "snapshot has {n_all} slots but entries address at most {max_slot}"
                )
            }
            Self::Arena(e) => write!(f, "arena failure: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for BuildError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::CapacityExceeded { pages, max_pages } => {
                Self::PagesExhausted { pages, max_pages }
            }
            other => Self::Arena(other),
        }
    }
}
