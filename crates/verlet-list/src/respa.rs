//! Multi-resolution builder: one half-list pass, three cutoff shells.

use verlet_space::BinGrid;

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::list::{RespaCuts, RespaList};
use crate::scan;

/// Build a multi-resolution half list in a single bin pass.
///
/// The outer list is the ordinary half list at the context cutoff; the
/// inner and middle lists are the subsets whose squared distance falls in
/// their shells, partitioned from the same distance computation. Entries
/// carry identical packing in every shell they land in.
///
/// Callers validate shell ordering via [`RespaCuts::ordered_within`]
/// before requesting a build.
pub fn build_respa(
    ctx: &BuildContext<'_>,
    grid: &BinGrid,
    cuts: &RespaCuts,
    lists: &mut RespaList,
) -> Result<(), BuildError> {
    let snap = ctx.snapshot;
    scan::check_slot_budget(snap.n_all())?;
    let n_owned = snap.n_owned();
    let n_all = snap.n_all();
    let cutsq = ctx.cutoff * ctx.cutoff;
    let inner_sq = cuts.inner * cuts.inner;
    let band_sq = cuts
        .middle
        .map(|b| (b.inside * b.inside, b.outside * b.outside));
    let triclinic = ctx.sim_box.is_triclinic();

    let RespaList {
        outer,
        inner,
        middle,
    } = lists;
    outer.begin(n_owned);
    inner.begin(n_owned);
    if let Some(m) = middle.as_mut() {
        m.begin(n_owned);
    }

    for i in 0..n_owned {
        let xi = snap.position(i);
        let itag = snap.tag(i);
        let chunk_outer = outer.pool_mut().reserve()?;
        let chunk_inner = inner.pool_mut().reserve()?;
        let mut chunk_middle = match middle.as_mut() {
            Some(m) => Some(m.pool_mut().reserve()?),
            None => None,
        };
        let mut n_outer = 0usize;
        let mut n_inner = 0usize;
        let mut n_middle = 0usize;

        scan::for_each_candidate(grid, n_all, i, |j| {
            if j < n_owned {
                if j <= i {
                    return Ok(());
                }
            } else if !scan::keep_ghost(
                xi,
                snap.position(j),
                itag,
                snap.tag(j),
                triclinic,
                ctx.tie_epsilon,
            ) {
                return Ok(());
            }
            if let Some((entry, rsq)) = scan::accept_pair(ctx, cutsq, i, xi, j) {
                let raw = entry.raw();
                scan::push(chunk_outer, &mut n_outer, raw, i)?;
                if rsq < inner_sq {
                    scan::push(chunk_inner, &mut n_inner, raw, i)?;
                }
                if let (Some(chunk), Some((in_sq, out_sq))) =
                    (chunk_middle.as_deref_mut(), band_sq)
                {
                    if rsq > in_sq && rsq < out_sq {
                        scan::push(chunk, &mut n_middle, raw, i)?;
                    }
                }
            }
            Ok(())
        })?;

        let row = outer.pool_mut().commit(n_outer)?;
        outer.set_row(i, row);
        let row = inner.pool_mut().commit(n_inner)?;
        inner.set_row(i, row);
        if let Some(m) = middle.as_mut() {
            let row = m.pool_mut().commit(n_middle)?;
            m.set_row(i, row);
        }
    }
    Ok(())
}
