//! Bin-grid configuration parameters.

/// Configuration for [`BinGrid`](crate::BinGrid) construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinConfig {
    /// Explicit target bin edge length, in simulation length units.
    ///
    /// `None` (the default) sizes bins to the binning cutoff, giving the
    /// classic one-bin-per-cutoff grid with a 27-bin stencil. Smaller
    /// explicit sizes trade a wider stencil for tighter candidate sets;
    /// the stencil extent adapts either way.
    pub bin_size: Option<f64>,

    /// Memory budget: the maximum number of bins (including the ghost
    /// halo) before the build falls back to a single all-pairs bin.
    ///
    /// Default: 4_194_304.
    pub max_bins: usize,
}

impl BinConfig {
    /// Default bin-count budget.
    pub const DEFAULT_MAX_BINS: usize = 4_194_304;
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            bin_size: None,
            max_bins: Self::DEFAULT_MAX_BINS,
        }
    }
}
