//! Shared candidate iteration and pair acceptance for the builders.

use verlet_core::AtomTag;
use verlet_space::{BinGrid, BinStrategy};

use crate::context::BuildContext;
use crate::entry::NeighborEntry;
use crate::error::BuildError;
use crate::exclusion::SpecialCheck;

/// Refuse snapshots with more slots than a packed entry can address.
pub(crate) fn check_slot_budget(n_all: usize) -> Result<(), BuildError> {
    if n_all > NeighborEntry::MAX_SLOT + 1 {
        return Err(BuildError::TooManyAtoms {
            n_all,
            max_slot: NeighborEntry::MAX_SLOT,
        });
    }
    Ok(())
}

/// Visit every candidate `j != i` for origin `i`: the stencil bins around
/// `i`'s bin, or every slot under the all-pairs strategy.
pub(crate) fn for_each_candidate<F>(
    grid: &BinGrid,
    n_all: usize,
    i: usize,
    mut f: F,
) -> Result<(), BuildError>
where
    F: FnMut(usize) -> Result<(), BuildError>,
{
    match grid.strategy() {
        BinStrategy::Binned => {
            let bi = grid.bin_of(i);
            for &off in grid.stencil().offsets() {
                let bin = [bi[0] + off[0], bi[1] + off[1], bi[2] + off[2]];
                for j in grid.chain(bin) {
                    if j != i {
                        f(j)?;
                    }
                }
            }
        }
        BinStrategy::AllPairs => {
            for j in 0..n_all {
                if j != i {
                    f(j)?;
                }
            }
        }
    }
    Ok(())
}

/// Half-list ownership decision for a ghost candidate.
///
/// Unequal tags use the parity rule: the higher-tagged side keeps odd tag
/// sums, the lower-tagged side keeps even ones, so exactly one side of a
/// cross-boundary pair stores it. Equal tags (an atom meeting its own
/// periodic image, or untagged systems) fall back to a lexicographic
/// `(z, y, x)` comparison of the two positions; triclinic boxes compare
/// within an epsilon band because their two coordinate-transform paths do
/// not round identically.
pub(crate) fn keep_ghost(
    xi: [f64; 3],
    xj: [f64; 3],
    itag: AtomTag,
    jtag: AtomTag,
    triclinic: bool,
    eps: f64,
) -> bool {
    if itag != jtag {
        let parity = (itag.0.wrapping_add(jtag.0)) % 2;
        return if itag > jtag { parity == 1 } else { parity == 0 };
    }
    if triclinic {
        if (xj[2] - xi[2]).abs() > eps {
            return xj[2] > xi[2];
        }
        if (xj[1] - xi[1]).abs() > eps {
            return xj[1] > xi[1];
        }
        xj[0] >= xi[0]
    } else {
        if xj[2] != xi[2] {
            return xj[2] > xi[2];
        }
        if xj[1] != xi[1] {
            return xj[1] > xi[1];
        }
        xj[0] >= xi[0]
    }
}

/// Cutoff, static-exclusion, and special classification for one candidate.
///
/// Returns the entry to store and the squared distance, or `None` when
/// the pair is out of range or dropped. Special pairs whose displacement
/// spans a periodic image are kept plain: the bonded exclusion applies to
/// the directly bonded image only.
pub(crate) fn accept_pair(
    ctx: &BuildContext<'_>,
    cutsq: f64,
    i: usize,
    xi: [f64; 3],
    j: usize,
) -> Option<(NeighborEntry, f64)> {
    let xj = ctx.snapshot.position(j);
    let d = [xj[0] - xi[0], xj[1] - xi[1], xj[2] - xi[2]];
    let rsq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
    if rsq > cutsq {
        return None;
    }
    if ctx.filter.statically_excluded(i, j) {
        return None;
    }
    let entry = match ctx.filter.special_check(i, j) {
        SpecialCheck::None => NeighborEntry::plain(j),
        SpecialCheck::Exclude => {
            if ctx.sim_box.minimum_image_check(d) {
                NeighborEntry::plain(j)
            } else {
                return None;
            }
        }
        SpecialCheck::Scale(tier) => {
            if ctx.sim_box.minimum_image_check(d) {
                NeighborEntry::plain(j)
            } else {
                NeighborEntry::special(j, tier)
            }
        }
    };
    Some((entry, rsq))
}

/// Append one raw entry to an in-progress chunk, signalling overflow.
pub(crate) fn push(
    chunk: &mut [u32],
    n: &mut usize,
    raw: u32,
    atom_slot: usize,
) -> Result<(), BuildError> {
    if *n == chunk.len() {
        return Err(BuildError::AdjacencyOverflow {
            atom_slot,
            capacity: chunk.len(),
        });
    }
    chunk[*n] = raw;
    *n += 1;
    Ok(())
}
