//! Rebuild accounting.

/// Counters accumulated across planner updates.
///
/// A dangerous build is one triggered after some owned atom had already
/// drifted past the full skin, meaning the lists reused on the preceding
/// steps may have missed an interaction; a nonzero count is the signal to
/// enlarge the skin or tighten the rebuild policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Full rebuilds performed.
    pub builds: u64,
    /// Updates answered from still-valid lists.
    pub reuses: u64,
    /// Builds that fired after a full-skin drift.
    pub dangerous: u64,
}
