//! Strongly-typed identifiers.

use std::fmt;

/// Globally unique, process-stable atom identifier.
///
/// An owned atom's tag never changes across a run; every ghost replica of
/// that atom carries the same tag. Tag `0` marks an untagged atom (systems
/// without bonded topology may leave atoms untagged). Local slot indices,
/// by contrast, are *not* stable across rebuilds — any state that must
/// survive a rebuild is keyed by tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomTag(pub u64);

impl AtomTag {
    /// The reserved "no tag" value.
    pub const UNTAGGED: AtomTag = AtomTag(0);

    /// Returns `true` if this atom carries a real tag.
    pub fn is_tagged(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for AtomTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AtomTag {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies the molecule an atom belongs to.
///
/// Atoms with equal molecule ids are part of the same bonded unit; `0`
/// means "no molecule".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoleculeId(pub u64);

impl fmt::Display for MoleculeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MoleculeId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a registered neighbor list within a build planner.
///
/// Lists are registered before the first build and assigned sequential
/// ids; `ListId(n)` is the n-th registered list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(pub u32);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ListId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing timestep counter supplied by the integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
