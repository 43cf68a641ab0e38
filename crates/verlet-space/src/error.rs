//! Error types for bin-grid construction.

use std::error::Error;
use std::fmt;

/// Errors arising from bin-grid construction.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceError {
    /// The binning cutoff is zero, negative, or non-finite.
    InvalidCutoff {
        /// The offending value.
        value: f64,
    },
    /// An explicit bin size is zero, negative, or non-finite.
    InvalidBinSize {
        /// The offending value.
        value: f64,
    },
    /// The cutoff reaches past half the periodic box width, so an atom
    /// could interact with its own image ambiguously. This is a fatal
    /// configuration error, never silently tolerated.
    CutoffExceedsHalfBox {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// The binning cutoff.
        cutoff: f64,
        /// Half the perpendicular box width on that axis.
        half_width: f64,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCutoff { value } => {
                write!(f, "binning cutoff must be positive and finite, got {value}")
            }
            Self::InvalidBinSize { value } => {
                write!(f, "bin size must be positive and finite, got {value}")
            }
            Self::CutoffExceedsHalfBox {
                axis,
                cutoff,
                half_width,
            } => {
                write!(
                    f,
                    "cutoff {cutoff} exceeds half the periodic box width {half_width} on axis {axis}"
                )
            }
        }
    }
}

impl Error for SpaceError {}
