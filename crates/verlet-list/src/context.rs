//! Per-build context threaded through the enumerators.

use verlet_core::{AtomSnapshot, SimBox};

use crate::exclusion::ExclusionFilter;

/// Default positional tolerance for the equal-tag ghost tie-break, in
/// simulation length units.
///
/// Wide enough to absorb round-off between the coordinate-transform paths
/// two processes take to the same ghost position; callers working at
/// unusual coordinate scales should override it on their list request.
pub const DEFAULT_TIE_EPSILON: f64 = 0.01;

/// Everything one list build needs, passed explicitly so builds are
/// reentrant and independently parameterized.
///
/// `cutoff` is the list cutoff including skin; the grid the context is
/// paired with may be sized to a larger cutoff (grids are shared across
/// lists and sized to the largest).
#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'a> {
    /// The read-only atom state for this build.
    pub snapshot: AtomSnapshot<'a>,
    /// Box geometry, for the periodic-image checks.
    pub sim_box: &'a SimBox,
    /// List cutoff (physical cutoff plus skin).
    pub cutoff: f64,
    /// Positional tolerance for the equal-tag ghost tie-break.
    pub tie_epsilon: f64,
    /// Static and bonded-special exclusion rules for this list.
    pub filter: ExclusionFilter<'a>,
}

impl<'a> BuildContext<'a> {
    /// Context with the default tie epsilon.
    pub fn new(
        snapshot: AtomSnapshot<'a>,
        sim_box: &'a SimBox,
        cutoff: f64,
        filter: ExclusionFilter<'a>,
    ) -> Self {
        Self {
            snapshot,
            sim_box,
            cutoff,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            filter,
        }
    }

    /// Override the tie-break tolerance.
    pub fn with_tie_epsilon(mut self, tie_epsilon: f64) -> Self {
        self.tie_epsilon = tie_epsilon;
        self
    }
}
