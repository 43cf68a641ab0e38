//! Bin-offset stencils.

use smallvec::SmallVec;

/// The set of bin offsets that, together with an atom's own bin, covers
/// every bin that can hold a neighbor within the cutoff.
///
/// Offsets are symmetric around the origin and always include `[0, 0, 0]`,
/// so a pair in adjacent bins is visited from both sides; the enumerator's
/// ownership tie-breaks decide which visit stores the pair.
/// Inline capacity covers the default 27-bin stencil without heap
/// allocation; wider stencils (explicit small bins, strong tilt) spill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stencil {
    offsets: SmallVec<[[i32; 3]; 32]>,
    extent: [i32; 3],
}

impl Stencil {
    /// Build a stencil for bins of Cartesian edge size `bin_widths`,
    /// reaching `extent[d]` bins out along each axis.
    ///
    /// When `refine` is set, offsets whose closest-approach distance to
    /// the origin bin exceeds the cutoff are dropped (valid for
    /// rectangular bins, i.e. orthogonal boxes). Triclinic grids keep the
    /// full rectangular stencil: conservative but always covering.
    pub fn build(extent: [i32; 3], bin_widths: [f64; 3], cutoff: f64, refine: bool) -> Self {
        let cutsq = cutoff * cutoff;
        let mut offsets = SmallVec::new();
        for dz in -extent[2]..=extent[2] {
            for dy in -extent[1]..=extent[1] {
                for dx in -extent[0]..=extent[0] {
                    let off = [dx, dy, dz];
                    if refine && bin_distance_sq(off, bin_widths) > cutsq {
                        continue;
                    }
                    offsets.push(off);
                }
            }
        }
        Self { offsets, extent }
    }

    /// A single-bin stencil (used by the all-pairs fallback grid).
    pub fn origin_only() -> Self {
        let mut offsets = SmallVec::new();
        offsets.push([0, 0, 0]);
        Self {
            offsets,
            extent: [0, 0, 0],
        }
    }

    /// The offsets, in z-major scan order.
    pub fn offsets(&self) -> &[[i32; 3]] {
        &self.offsets
    }

    /// Per-axis reach in bins.
    pub fn extent(&self) -> [i32; 3] {
        self.extent
    }
}

/// Squared closest-approach distance between the origin bin and the bin at
/// `off`, for rectangular bins: along each axis, bins `k` apart have faces
/// `(|k| - 1)` bin widths apart.
fn bin_distance_sq(off: [i32; 3], widths: [f64; 3]) -> f64 {
    let mut sum = 0.0;
    for axis in 0..3 {
        let k = off[axis].unsigned_abs();
        if k > 1 {
            let d = (k - 1) as f64 * widths[axis];
            sum += d * d;
        }
    }
    sum
}
