//! Error types for core data validation.

use std::error::Error;
use std::fmt;

/// Errors detected while constructing an [`AtomSnapshot`](crate::AtomSnapshot).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// A per-atom array's length disagrees with the position array.
    LengthMismatch {
        /// Name of the offending array.
        array: &'static str,
        /// Expected length (`n_all`, the position count).
        expected: usize,
        /// Actual length supplied.
        got: usize,
    },
    /// `n_owned` exceeds the total atom count.
    OwnedExceedsTotal {
        /// The owned-atom count supplied.
        n_owned: usize,
        /// The total slot count.
        n_all: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                array,
                expected,
                got,
            } => {
                write!(
                    f,
                    "snapshot array '{array}' has length {got}, expected {expected}"
                )
            }
            Self::OwnedExceedsTotal { n_owned, n_all } => {
                write!(f, "n_owned {n_owned} exceeds total atom count {n_all}")
            }
        }
    }
}

impl Error for SnapshotError {}

/// Errors detected while constructing a [`SimBox`](crate::SimBox).
#[derive(Clone, Debug, PartialEq)]
pub enum BoxError {
    /// A box edge has zero or negative extent.
    DegenerateAxis {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Lower bound on that axis.
        lo: f64,
        /// Upper bound on that axis.
        hi: f64,
    },
    /// A bound or tilt factor is NaN or infinite.
    NonFinite,
}

impl fmt::Display for BoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateAxis { axis, lo, hi } => {
                write!(
                    f,
                    "box axis {axis} is degenerate: lo {lo} must be below hi {hi}"
                )
            }
            Self::NonFinite => write!(f, "box bounds and tilt factors must be finite"),
        }
    }
}

impl Error for BoxError {}
