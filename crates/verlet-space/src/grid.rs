//! The bin grid: atom slots hashed into cutoff-sized spatial bins.

use verlet_core::SimBox;

use crate::config::BinConfig;
use crate::error::SpaceError;
use crate::stencil::Stencil;

/// Sentinel terminating a bin chain.
const NONE: u32 = u32::MAX;

/// How the enumerator should consume the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinStrategy {
    /// Walk stencil bins per atom.
    Binned,
    /// The grid degenerated to one bin; run the direct all-pairs search.
    AllPairs,
}

/// A regular grid of bins over the local+ghost coordinate set.
///
/// Every slot in `0..n_all` appears in exactly one bin. Bins are linked
/// head/next chains over slot indices, rebuilt in O(n_all) with no
/// per-bin allocation; chains iterate in ascending slot order.
///
/// The grid covers the occupied bounding box, not just the domain: ghost
/// atoms outside `lo..hi` land in halo bins past the domain edge. For
/// triclinic boxes binning runs in fractional (lamda) coordinates so the
/// bins follow the skewed lattice vectors.
#[derive(Clone, Debug)]
pub struct BinGrid {
    strategy: BinStrategy,
    dims: [i32; 3],
    lo_bin: [i32; 3],
    heads: Vec<u32>,
    next: Vec<u32>,
    atom_bins: Vec<[i32; 3]>,
    stencil: Stencil,
}

impl BinGrid {
    /// Bin all positions for the given binning cutoff (cutoff plus skin).
    ///
    /// Fails on invalid cutoffs and on cutoffs reaching past half the
    /// periodic box width (ambiguous self-image interactions). Falls back
    /// to a single all-pairs bin when the grid would exceed
    /// [`BinConfig::max_bins`].
    pub fn build(
        sim_box: &SimBox,
        cutoff: f64,
        config: &BinConfig,
        positions: &[[f64; 3]],
    ) -> Result<Self, SpaceError> {
        if !(cutoff > 0.0 && cutoff.is_finite()) {
            return Err(SpaceError::InvalidCutoff { value: cutoff });
        }
        let perp = sim_box.perpendicular_widths();
        for axis in 0..3 {
            if sim_box.periodic()[axis] && cutoff > 0.5 * perp[axis] {
                return Err(SpaceError::CutoffExceedsHalfBox {
                    axis,
                    cutoff,
                    half_width: 0.5 * perp[axis],
                });
            }
        }
        let target = match config.bin_size {
            Some(b) if !(b > 0.0 && b.is_finite()) => {
                return Err(SpaceError::InvalidBinSize { value: b });
            }
            Some(b) => b,
            None => cutoff,
        };

        // Bin counts across the domain proper; halo bins come from the
        // occupied bounding box below.
        let mut nbin = [1i32; 3];
        for axis in 0..3 {
            nbin[axis] = ((perp[axis] / target).floor() as i32).max(1);
        }

        // Per-atom bin coordinates. Orthogonal boxes bin Cartesian
        // offsets from the box origin; triclinic boxes bin lamda
        // coordinates, where the domain spans [0, 1) per axis.
        let triclinic = sim_box.is_triclinic();
        let lo = sim_box.lo();
        let lengths = sim_box.lengths();
        let mut bininv = [0.0f64; 3];
        for axis in 0..3 {
            let span = if triclinic { 1.0 } else { lengths[axis] };
            bininv[axis] = nbin[axis] as f64 / span;
        }
        let mut atom_bins = Vec::with_capacity(positions.len());
        for &p in positions {
            let rel = if triclinic {
                sim_box.to_lamda(p)
            } else {
                [p[0] - lo[0], p[1] - lo[1], p[2] - lo[2]]
            };
            let mut b = [0i32; 3];
            for axis in 0..3 {
                b[axis] = (rel[axis] * bininv[axis]).floor() as i32;
            }
            atom_bins.push(b);
        }

        // Grid extents over everything we binned, ghosts included.
        let mut lo_bin = [0i32; 3];
        let mut hi_bin = [0i32; 3];
        for (i, b) in atom_bins.iter().enumerate() {
            for axis in 0..3 {
                if i == 0 || b[axis] < lo_bin[axis] {
                    lo_bin[axis] = b[axis];
                }
                if i == 0 || b[axis] > hi_bin[axis] {
                    hi_bin[axis] = b[axis];
                }
            }
        }
        let mut dims = [1i32; 3];
        let mut total: i64 = 1;
        for axis in 0..3 {
            dims[axis] = hi_bin[axis] - lo_bin[axis] + 1;
            total = total.saturating_mul(dims[axis] as i64);
        }

        if total <= 1 || total as u128 > config.max_bins as u128 {
            return Ok(Self::single_bin(positions.len()));
        }

        let mut heads = vec![NONE; total as usize];
        let mut next = vec![NONE; positions.len()];
        // Bin in descending slot order so each chain iterates ascending.
        for slot in (0..positions.len()).rev() {
            let flat = flat_index(atom_bins[slot], lo_bin, dims);
            next[slot] = heads[flat];
            heads[flat] = slot as u32;
        }

        // Stencil reach per axis: bins are perp[axis]/nbin wide, so a
        // cutoff sphere spans ceil(cutoff/width) bins each way.
        let mut extent = [1i32; 3];
        let mut widths = [0.0f64; 3];
        for axis in 0..3 {
            widths[axis] = perp[axis] / nbin[axis] as f64;
            let reach = (cutoff / widths[axis]).ceil() as i32;
            // A flat occupied region needs no reach along its thin axis.
            extent[axis] = reach.min(dims[axis] - 1).max(0);
        }
        let stencil = Stencil::build(extent, widths, cutoff, !triclinic);

        Ok(Self {
            strategy: BinStrategy::Binned,
            dims,
            lo_bin,
            heads,
            next,
            atom_bins,
            stencil,
        })
    }

    /// The degenerate one-bin grid backing the all-pairs fallback.
    fn single_bin(n_atoms: usize) -> Self {
        let mut heads = vec![NONE; 1];
        let mut next = vec![NONE; n_atoms];
        for slot in (0..n_atoms).rev() {
            next[slot] = heads[0];
            heads[0] = slot as u32;
        }
        Self {
            strategy: BinStrategy::AllPairs,
            dims: [1, 1, 1],
            lo_bin: [0, 0, 0],
            heads,
            next,
            atom_bins: vec![[0, 0, 0]; n_atoms],
            stencil: Stencil::origin_only(),
        }
    }

    /// The strategy the enumerator should use.
    pub fn strategy(&self) -> BinStrategy {
        self.strategy
    }

    /// Number of atoms binned.
    pub fn n_atoms(&self) -> usize {
        self.next.len()
    }

    /// Bin dimensions, halo included.
    pub fn dims(&self) -> [i32; 3] {
        self.dims
    }

    /// Total bin count.
    pub fn bin_count(&self) -> usize {
        self.heads.len()
    }

    /// The stencil paired with this grid.
    pub fn stencil(&self) -> &Stencil {
        &self.stencil
    }

    /// Bin coordinate of a slot.
    pub fn bin_of(&self, slot: usize) -> [i32; 3] {
        self.atom_bins[slot]
    }

    /// Iterate the slots in a bin, ascending; empty for out-of-grid bins.
    pub fn chain(&self, bin: [i32; 3]) -> Chain<'_> {
        for axis in 0..3 {
            let rel = bin[axis] - self.lo_bin[axis];
            if rel < 0 || rel >= self.dims[axis] {
                return Chain {
                    next: &self.next,
                    cursor: NONE,
                };
            }
        }
        let flat = flat_index(bin, self.lo_bin, self.dims);
        Chain {
            next: &self.next,
            cursor: self.heads[flat],
        }
    }
}

fn flat_index(bin: [i32; 3], lo_bin: [i32; 3], dims: [i32; 3]) -> usize {
    let x = (bin[0] - lo_bin[0]) as usize;
    let y = (bin[1] - lo_bin[1]) as usize;
    let z = (bin[2] - lo_bin[2]) as usize;
    (z * dims[1] as usize + y) * dims[0] as usize + x
}

/// Iterator over one bin's chain.
pub struct Chain<'a> {
    next: &'a [u32],
    cursor: u32,
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor == NONE {
            return None;
        }
        let slot = self.cursor as usize;
        self.cursor = self.next[slot];
        Some(slot)
    }
}
