//! Neighbor-list storage over the page pool.

use verlet_arena::{ArenaError, PageConfig, PagePool, Row};

use crate::entry::NeighborEntry;

/// The closed family of list forms a caller can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Each unordered pair once, with Newton tie-breaks.
    Half,
    /// Every directed pair with an owned origin.
    Full,
    /// Full list with ghost slots as enumeration origins too.
    FullGhost,
    /// Half list partitioned into inner/middle/outer cutoff shells.
    Respa,
}

/// The middle cutoff shell of a multi-resolution list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiddleBand {
    /// Inner edge of the shell; overlaps below the inner cutoff.
    pub inside: f64,
    /// Outer edge of the shell.
    pub outside: f64,
}

/// Inner and middle radii of a multi-resolution list, relative to the
/// list's outer cutoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RespaCuts {
    /// Inner-shell cutoff.
    pub inner: f64,
    /// Optional middle shell.
    pub middle: Option<MiddleBand>,
}

impl RespaCuts {
    /// Returns `true` if the radii are consistently ordered within the
    /// outer cutoff: `0 < inner <= outer`, and when a middle shell is
    /// present, `0 <= inside < inner < outside <= outer` (the shells
    /// deliberately overlap at their seams).
    pub fn ordered_within(&self, outer: f64) -> bool {
        if !(self.inner.is_finite() && self.inner > 0.0 && self.inner <= outer) {
            return false;
        }
        match self.middle {
            None => true,
            Some(band) => {
                band.inside.is_finite()
                    && band.outside.is_finite()
                    && band.inside >= 0.0
                    && band.inside < self.inner
                    && self.inner < band.outside
                    && band.outside <= outer
            }
        }
    }
}

/// One built neighbor list: per-origin adjacency runs in a page pool.
///
/// Runs are addressed by [`Row`] handles kept per origin slot; the whole
/// structure is reset and rewritten by each rebuild, and read-only in
/// between.
#[derive(Debug)]
pub struct NeighborList {
    pool: PagePool,
    rows: Vec<Row>,
}

impl NeighborList {
    /// Empty list backed by a fresh pool.
    pub fn new(config: PageConfig) -> Result<Self, ArenaError> {
        Ok(Self {
            pool: PagePool::new(config)?,
            rows: Vec::new(),
        })
    }

    /// Rewind the pool and size the row table for a new build.
    pub(crate) fn begin(&mut self, n_origins: usize) {
        self.pool.reset();
        self.rows.clear();
        self.rows.resize(n_origins, Row::EMPTY);
    }

    pub(crate) fn pool_mut(&mut self) -> &mut PagePool {
        &mut self.pool
    }

    pub(crate) fn set_row(&mut self, origin: usize, row: Row) {
        self.rows[origin] = row;
    }

    /// Number of enumeration origins in the last build.
    pub fn n_origins(&self) -> usize {
        self.rows.len()
    }

    /// Neighbor count for one origin; zero for origins outside the build.
    pub fn count(&self, origin: usize) -> usize {
        self.rows.get(origin).map_or(0, |r| r.len())
    }

    /// Iterate one origin's neighbors; empty for origins outside the build.
    pub fn neighbors(&self, origin: usize) -> Neighbors<'_> {
        let row = self.rows.get(origin).copied().unwrap_or(Row::EMPTY);
        Neighbors {
            raw: self.pool.row(row).iter(),
        }
    }

    /// Grow the backing pool after an overflow.
    ///
    /// Discards all rows; the caller must rebuild before reading again.
    pub fn grow(&mut self) -> Result<(), ArenaError> {
        self.rows.clear();
        self.pool.grow()
    }

    /// Current worst-case run length.
    pub fn max_chunk(&self) -> usize {
        self.pool.max_chunk()
    }

    /// Memory footprint of the backing pages in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.pool.memory_bytes()
    }
}

/// Iterator over one origin's neighbor entries.
pub struct Neighbors<'a> {
    raw: std::slice::Iter<'a, u32>,
}

impl Iterator for Neighbors<'_> {
    type Item = NeighborEntry;

    fn next(&mut self) -> Option<NeighborEntry> {
        self.raw.next().map(|&r| NeighborEntry::from_raw(r))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

/// The three parallel lists of one multi-resolution build.
///
/// `outer` holds the complete half list; `inner` and `middle` hold the
/// subsets inside their shells, partitioned from the same pass.
#[derive(Debug)]
pub struct RespaList {
    /// Full-cutoff half list.
    pub outer: NeighborList,
    /// Pairs inside the inner cutoff.
    pub inner: NeighborList,
    /// Pairs inside the middle shell, when one was requested.
    pub middle: Option<NeighborList>,
}

impl RespaList {
    /// Three fresh lists sharing one pool configuration.
    pub fn new(config: PageConfig, with_middle: bool) -> Result<Self, ArenaError> {
        Ok(Self {
            outer: NeighborList::new(config)?,
            inner: NeighborList::new(config)?,
            middle: if with_middle {
                Some(NeighborList::new(config)?)
            } else {
                None
            },
        })
    }

    /// Grow all shells' pools after an overflow.
    pub fn grow(&mut self) -> Result<(), ArenaError> {
        self.outer.grow()?;
        self.inner.grow()?;
        if let Some(middle) = self.middle.as_mut() {
            middle.grow()?;
        }
        Ok(())
    }
}
