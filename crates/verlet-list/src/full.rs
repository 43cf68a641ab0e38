//! Full-list builders: every directed in-range pair.

use verlet_space::BinGrid;

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::list::NeighborList;
use crate::scan;

/// Build a full list: for every owned origin, every in-range candidate
/// surviving the exclusion filter, with no ownership tie-breaks. Each
/// interacting pair of owned atoms appears in both directions.
pub fn build_full(
    ctx: &BuildContext<'_>,
    grid: &BinGrid,
    list: &mut NeighborList,
) -> Result<(), BuildError> {
    build_directed(ctx, grid, list, ctx.snapshot.n_owned())
}

/// Build a full list with ghost slots as enumeration origins too, so
/// per-atom force-decomposition schemes can read outgoing neighbors for
/// every slot.
pub fn build_full_ghost(
    ctx: &BuildContext<'_>,
    grid: &BinGrid,
    list: &mut NeighborList,
) -> Result<(), BuildError> {
    build_directed(ctx, grid, list, ctx.snapshot.n_all())
}

fn build_directed(
    ctx: &BuildContext<'_>,
    grid: &BinGrid,
    list: &mut NeighborList,
    n_origins: usize,
) -> Result<(), BuildError> {
    let snap = ctx.snapshot;
    scan::check_slot_budget(snap.n_all())?;
    let n_all = snap.n_all();
    let cutsq = ctx.cutoff * ctx.cutoff;
    list.begin(n_origins);

    for i in 0..n_origins {
        let xi = snap.position(i);
        let chunk = list.pool_mut().reserve()?;
        let mut n = 0usize;
        scan::for_each_candidate(grid, n_all, i, |j| {
            if let Some((entry, _rsq)) = scan::accept_pair(ctx, cutsq, i, xi, j) {
                scan::push(chunk, &mut n, entry.raw(), i)?;
            }
            Ok(())
        })?;
        let row = list.pool_mut().commit(n)?;
        list.set_row(i, row);
    }
    Ok(())
}
