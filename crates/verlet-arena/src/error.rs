//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during page-pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Pool configuration is internally inconsistent.
    InvalidConfig {
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Every permitted page is full.
    CapacityExceeded {
        /// Pages currently allocated.
        pages: usize,
        /// The configured page cap.
        max_pages: usize,
    },
    /// A committed run exceeded the reserved worst-case chunk.
    ChunkOverflow {
        /// Entries the caller tried to commit.
        committed: usize,
        /// The reserved chunk length.
        reserved: usize,
    },
    /// `grow()` was asked to raise the chunk budget past its hard cap.
    GrowthExhausted {
        /// The cap that was hit.
        cap: u32,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid page config: {reason}"),
            Self::CapacityExceeded { pages, max_pages } => {
                write!(f, "page pool full: {pages} pages allocated, cap {max_pages}")
            }
            Self::ChunkOverflow {
                committed,
                reserved,
            } => {
                write!(
                    f,
                    "committed {committed} entries into a chunk of {reserved}"
                )
            }
            Self::GrowthExhausted { cap } => {
                write!(f, "chunk budget already at its cap of {cap} entries")
            }
        }
    }
}

impl Error for ArenaError {}
