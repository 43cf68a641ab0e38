//! Brute-force reference enumeration for property tests.

use verlet_core::{AtomTag, SimBox};

use crate::snapshot::SnapshotData;

/// Squared Cartesian distance between two positions.
pub fn distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    d[0] * d[0] + d[1] * d[1] + d[2] * d[2]
}

/// Every unordered owned-atom pair whose minimum-image separation is
/// within `cutoff`, as sorted `(low tag, high tag)` pairs.
///
/// This is the ground truth half and full lists are checked against: with
/// a complete ghost shell and `cutoff` below half the periodic box width,
/// a half list must contain exactly these pairs once each (under tags),
/// and a full list each of them in both directions.
pub fn min_image_pairs(
    data: &SnapshotData,
    sim_box: &SimBox,
    cutoff: f64,
) -> Vec<(AtomTag, AtomTag)> {
    let cutsq = cutoff * cutoff;
    let mut out = Vec::new();
    for a in 0..data.n_owned {
        for b in (a + 1)..data.n_owned {
            let pa = data.positions[a];
            let pb = data.positions[b];
            let d = sim_box.minimum_image([pb[0] - pa[0], pb[1] - pa[1], pb[2] - pa[2]]);
            if d[0] * d[0] + d[1] * d[1] + d[2] * d[2] <= cutsq {
                let (ta, tb) = (data.tags[a], data.tags[b]);
                out.push(if ta <= tb { (ta, tb) } else { (tb, ta) });
            }
        }
    }
    out.sort_unstable();
    out
}
