//! Half-list builder: each unordered pair stored exactly once.

use verlet_space::BinGrid;

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::list::NeighborList;
use crate::scan;

/// Build a half list: for every owned origin, the in-range candidates
/// that survive the ownership tie-breaks and the exclusion filter.
///
/// Owned pairs are kept once by the `i < j` slot rule; ghost pairs by the
/// tag-parity/coordinate rule (see [`crate::build_full`] for the
/// tie-break-free form). Summed across processes, each physical pair
/// lands in exactly one list.
///
/// On overflow the partial list is discarded and the error returned;
/// grow the list and rebuild.
pub fn build_half(
    ctx: &BuildContext<'_>,
    grid: &BinGrid,
    list: &mut NeighborList,
) -> Result<(), BuildError> {
    let snap = ctx.snapshot;
    scan::check_slot_budget(snap.n_all())?;
    let n_owned = snap.n_owned();
    let n_all = snap.n_all();
    let cutsq = ctx.cutoff * ctx.cutoff;
    let triclinic = ctx.sim_box.is_triclinic();
    list.begin(n_owned);

    for i in 0..n_owned {
        let xi = snap.position(i);
        let itag = snap.tag(i);
        let chunk = list.pool_mut().reserve()?;
        let mut n = 0usize;
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

#[cfg(test)]
mod tests {
    use super::*;
    use verlet_arena::PageConfig;
    use verlet_core::{AtomSnapshot, AtomTag, SimBox, SpecialTable, SpecialTier};
    use verlet_space::{BinConfig, BinGrid};

    use crate::exclusion::{ExclusionFilter, SpecialPolicy};

    fn cube() -> SimBox {
        SimBox::orthogonal([0.0; 3], [10.0; 3], [true; 3]).unwrap()
    }

    fn build(
        positions: &[[f64; 3]],
        tags: &[u64],
        n_owned: usize,
        cutoff: f64,
        sim_box: &SimBox,
        special: Option<&SpecialTable>,
        policy: SpecialPolicy,
    ) -> NeighborList {
        let types = vec![0u32; positions.len()];
        let atom_tags: Vec<AtomTag> = tags.iter().copied().map(AtomTag).collect();
        let mut snap = AtomSnapshot::new(positions, &types, &atom_tags, n_owned).unwrap();
        if let Some(table) = special {
            snap = snap.with_special(table).unwrap();
        }
        let grid = BinGrid::build(sim_box, cutoff, &BinConfig::default(), positions).unwrap();
        let ctx = BuildContext::new(snap, sim_box, cutoff, ExclusionFilter::new(snap, policy));
        let mut list = NeighborList::new(PageConfig::default()).unwrap();
        build_half(&ctx, &grid, &mut list).unwrap();
        list
    }

    #[test]
    fn two_owned_atoms_pair_once() {
        // Distance 0.9 * cutoff: the lower slot stores the pair, the
        // higher stores nothing.
        let b = cube();
        let pos = [[1.0, 1.0, 1.0], [1.0, 1.0, 2.8]];
        let list = build(&pos, &[1, 2], 2, 2.0, &b, None, SpecialPolicy::default());
        assert_eq!(list.count(0), 1);
        assert_eq!(list.neighbors(0).next().unwrap().slot(), 1);
        assert_eq!(list.count(1), 0);
    }

    #[test]
    fn out_of_range_pair_is_absent() {
        let b = cube();
        let pos = [[1.0, 1.0, 1.0], [1.0, 1.0, 4.5]];
        let list = build(&pos, &[1, 2], 2, 2.0, &b, None, SpecialPolicy::default());
        assert_eq!(list.count(0), 0);
        assert_eq!(list.count(1), 0);
    }

    #[test]
    fn ghost_parity_matches_on_both_sides() {
        // Owned tag 5 with a ghost image of remote tag 3 in range. Sum 8
        // is even and 5 > 3, so this side skips; the mirror snapshot
        // (owned 3, ghost 5) includes. Exactly one side stores the pair.
        let b = cube();
        let here = build(
            &[[1.0, 1.0, 1.0], [1.0, 1.0, 2.0]],
            &[5, 3],
            1,
            2.0,
            &b,
            None,
            SpecialPolicy::default(),
        );
        let there = build(
            &[[1.0, 1.0, 2.0], [1.0, 1.0, 1.0]],
            &[3, 5],
            1,
            2.0,
            &b,
            None,
            SpecialPolicy::default(),
        );
        assert_eq!(here.count(0) + there.count(0), 1);
        assert_eq!(here.count(0), 0);
        assert_eq!(there.count(0), 1);
    }

    #[test]
    fn odd_tag_sum_flips_ownership() {
        let b = cube();
        let here = build(
            &[[1.0, 1.0, 1.0], [1.0, 1.0, 2.0]],
            &[6, 3],
            1,
            2.0,
            &b,
            None,
            SpecialPolicy::default(),
        );
        let there = build(
            &[[1.0, 1.0, 2.0], [1.0, 1.0, 1.0]],
            &[3, 6],
            1,
            2.0,
            &b,
            None,
            SpecialPolicy::default(),
        );
        // 6 > 3 with odd sum 9: the higher-tagged side keeps it.
        assert_eq!(here.count(0), 1);
        assert_eq!(there.count(0), 0);
    }

    #[test]
    fn equal_tags_tie_break_on_coordinates() {
        // Untagged systems have equal (zero) tags on both sides, so the
        // coordinate rule decides, and only the lower-coordinate side
        // stores the pair.
        let b = cube();
        let list = build(
            &[[1.0, 5.0, 5.0], [2.0, 5.0, 5.0]],
            &[0, 0],
            1,
            2.5,
            &b,
            None,
            SpecialPolicy::default(),
        );
        // Ghost x (2.0) > own x (1.0): kept.
        assert_eq!(list.count(0), 1);

        let flipped = build(
            &[[2.0, 5.0, 5.0], [1.0, 5.0, 5.0]],
            &[0, 0],
            1,
            2.5,
            &b,
            None,
            SpecialPolicy::default(),
        );
        // From the other viewpoint the partner is below: skipped.
        assert_eq!(flipped.count(0), 0);
    }

    #[test]
    fn special_pair_dropped_or_scaled_by_policy() {
        let b = cube();
        let mut table = SpecialTable::new();
        table.push_atom(&[AtomTag(2)], &[], &[]);
        table.push_atom(&[AtomTag(1)], &[], &[]);

        let pos = [[1.0, 1.0, 1.0], [1.0, 1.0, 2.0]];
        let dropped = build(
            &pos,
            &[1, 2],
            2,
            2.0,
            &b,
            Some(&table),
            SpecialPolicy::default(),
        );
        assert_eq!(dropped.count(0), 0);

        let scaled = build(
            &pos,
            &[1, 2],
            2,
            2.0,
            &b,
            Some(&table),
            SpecialPolicy::new([0.5, 0.0, 0.0]),
        );
        assert_eq!(scaled.count(0), 1);
        assert_eq!(
            scaled.neighbors(0).next().unwrap().tier(),
            Some(SpecialTier::OneTwo)
        );
    }

    #[test]
    fn empty_and_single_atom() {
        let b = cube();
        let empty = build(&[], &[], 0, 2.0, &b, None, SpecialPolicy::default());
        assert_eq!(empty.n_origins(), 0);
        let single = build(
            &[[5.0, 5.0, 5.0]],
            &[1],
            1,
            2.0,
            &b,
            None,
            SpecialPolicy::default(),
        );
        assert_eq!(single.count(0), 0);
    }

    #[test]
    fn overflow_surfaces_and_grow_recovers() {
        // 8 coincident atoms give slot 0 seven neighbors; a chunk of 4
        // overflows, and one grow is enough.
        let b = cube();
        let positions = vec![[5.0, 5.0, 5.0]; 8];
        let types = vec![0u32; 8];
        let tags: Vec<AtomTag> = (1..=8).map(AtomTag).collect();
        let snap = AtomSnapshot::new(&positions, &types, &tags, 8).unwrap();
        let grid = BinGrid::build(&b, 2.0, &BinConfig::default(), &positions).unwrap();
        let ctx = BuildContext::new(
            snap,
            &b,
            2.0,
            ExclusionFilter::new(snap, SpecialPolicy::default()),
        );
        let mut list = NeighborList::new(PageConfig {
            page_size: 16,
            max_pages: 4,
            max_chunk: 4,
            max_chunk_cap: 64,
        })
        .unwrap();

        let err = build_half(&ctx, &grid, &mut list).unwrap_err();
        assert!(matches!(
            err,
            BuildError::AdjacencyOverflow {
                atom_slot: 0,
                capacity: 4
            }
        ));
        assert!(err.is_recoverable());

        list.grow().unwrap();
        build_half(&ctx, &grid, &mut list).unwrap();
        assert_eq!(list.count(0), 7);
        assert_eq!(list.count(7), 0);
    }
}
