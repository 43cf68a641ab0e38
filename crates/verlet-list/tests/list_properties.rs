//! Property tests comparing list builds against the brute-force
//! minimum-image reference on random periodic snapshots.

use proptest::prelude::*;

use verlet_arena::PageConfig;
use verlet_core::{AtomSnapshot, AtomTag, SimBox, SpecialTable, SpecialTier};
use verlet_list::{
    build_full, build_half, BuildContext, ExclusionFilter, NeighborList, SpecialPolicy,
};
use verlet_space::{BinConfig, BinGrid};
use verlet_test_utils::{min_image_pairs, SnapshotData};

fn build_list(
    data: &SnapshotData,
    sim_box: &SimBox,
    cutoff: f64,
    bins: &BinConfig,
    special: Option<(&SpecialTable, SpecialPolicy)>,
    half: bool,
) -> NeighborList {
    let mut snap = data.view();
    let policy = match special {
        Some((table, policy)) => {
            snap = snap.with_special(table).unwrap();
            policy
        }
        None => SpecialPolicy::default(),
    };
    let grid = BinGrid::build(sim_box, cutoff, bins, &data.positions).unwrap();
    let ctx = BuildContext::new(snap, sim_box, cutoff, ExclusionFilter::new(snap, policy));
    let mut list = NeighborList::new(PageConfig::default()).unwrap();
    if half {
        build_half(&ctx, &grid, &mut list).unwrap();
    } else {
        build_full(&ctx, &grid, &mut list).unwrap();
    }
    list
}

/// Sorted (low, high) tag pairs stored in the list, duplicates kept.
fn stored_tag_pairs(data: &SnapshotData, list: &NeighborList) -> Vec<(AtomTag, AtomTag)> {
    let mut out = Vec::new();
    for i in 0..list.n_origins() {
        let ti = data.tags[i];
        for e in list.neighbors(i) {
            let tj = data.tags[e.slot()];
            out.push(if ti <= tj { (ti, tj) } else { (tj, ti) });
        }
    }
    out.sort_unstable();
    out
}

/// 1-2 bond between consecutive tag pairs (1,2), (3,4), ...; rows cover
/// ghosts via their imaged tags.
fn paired_bond_table(data: &SnapshotData) -> SpecialTable {
    let n = data.n_owned as u64;
    let mut table = SpecialTable::new();
    for slot in 0..data.n_all() {
        let t = data.tags[slot].0;
        let partner = if t % 2 == 1 { t + 1 } else { t - 1 };
        if partner >= 1 && partner <= n {
            table.push_atom(&[AtomTag(partner)], &[], &[]);
        } else {
            table.push_atom(&[], &[], &[]);
        }
    }
    table
}

fn bonded(a: AtomTag, b: AtomTag) -> bool {
    let (lo, hi) = if a <= b { (a.0, b.0) } else { (b.0, a.0) };
    lo % 2 == 1 && hi == lo + 1
}

const CUTOFF: f64 = 2.5;

fn ortho_box() -> SimBox {
    SimBox::orthogonal([0.0; 3], [10.0; 3], [true; 3]).unwrap()
}

fn tri_box() -> SimBox {
    SimBox::triclinic([0.0; 3], [10.0; 3], [3.0, 0.0, 0.0], [true; 3]).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn half_list_matches_reference(seed in 0u64..500, n in 0usize..40) {
        let b = ortho_box();
        let mut data = SnapshotData::random(seed, n, &b, 2);
        data.add_periodic_ghosts(&b, CUTOFF);

        let expected = min_image_pairs(&data, &b, CUTOFF);
        let list = build_list(&data, &b, CUTOFF, &BinConfig::default(), None, true);
        prop_assert_eq!(stored_tag_pairs(&data, &list), expected);
    }

    #[test]
    fn full_list_stores_each_pair_twice(seed in 0u64..500, n in 0usize..40) {
        let b = ortho_box();
        let mut data = SnapshotData::random(seed, n, &b, 2);
        data.add_periodic_ghosts(&b, CUTOFF);

        let mut expected = min_image_pairs(&data, &b, CUTOFF);
        expected.extend(expected.clone());
        expected.sort_unstable();

        let list = build_list(&data, &b, CUTOFF, &BinConfig::default(), None, false);
        prop_assert_eq!(stored_tag_pairs(&data, &list), expected);
    }

    #[test]
    fn triclinic_half_list_matches_reference(seed in 0u64..500, n in 0usize..40) {
        let b = tri_box();
        let cutoff = 2.0;
        let mut data = SnapshotData::random(seed, n, &b, 2);
        data.add_periodic_ghosts(&b, cutoff);

        let expected = min_image_pairs(&data, &b, cutoff);
        let list = build_list(&data, &b, cutoff, &BinConfig::default(), None, true);
        prop_assert_eq!(stored_tag_pairs(&data, &list), expected);
    }

    #[test]
    fn all_pairs_fallback_agrees_with_binned(seed in 0u64..500, n in 0usize..40) {
        let b = ortho_box();
        let mut data = SnapshotData::random(seed, n, &b, 2);
        data.add_periodic_ghosts(&b, CUTOFF);

        let binned = build_list(&data, &b, CUTOFF, &BinConfig::default(), None, true);
        // A one-bin budget forces the direct all-pairs path.
        let tight = BinConfig { max_bins: 1, ..BinConfig::default() };
        let direct = build_list(&data, &b, CUTOFF, &tight, None, true);
        prop_assert_eq!(
            stored_tag_pairs(&data, &binned),
            stored_tag_pairs(&data, &direct)
        );
    }

    #[test]
    fn dropped_specials_vanish_scaled_specials_stay(seed in 0u64..500, n in 0usize..40) {
        let b = ortho_box();
        let mut data = SnapshotData::random(seed, n, &b, 2);
        data.add_periodic_ghosts(&b, CUTOFF);
        let table = paired_bond_table(&data);

        let expected = min_image_pairs(&data, &b, CUTOFF);

        let dropped = build_list(
            &data,
            &b,
            CUTOFF,
            &BinConfig::default(),
            Some((&table, SpecialPolicy::default())),
            true,
        );
        let survivors: Vec<_> = expected
            .iter()
            .copied()
            .filter(|&(a, b)| !bonded(a, b))
            .collect();
        prop_assert_eq!(stored_tag_pairs(&data, &dropped), survivors);

        let scaled = build_list(
            &data,
            &b,
            CUTOFF,
            &BinConfig::default(),
            Some((&table, SpecialPolicy::new([0.5, 0.0, 0.0]))),
            true,
        );
        prop_assert_eq!(stored_tag_pairs(&data, &scaled), expected.clone());
        // Every stored bonded pair carries its tier tag.
        for i in 0..scaled.n_origins() {
            for e in scaled.neighbors(i) {
                let expected_tier = if bonded(data.tags[i], data.tags[e.slot()]) {
                    Some(SpecialTier::OneTwo)
                } else {
                    None
                };
                prop_assert_eq!(e.tier(), expected_tier);
            }
        }
    }
}

#[test]
fn snapshot_view_supports_special_attachment() {
    // Guard for the test harness itself: the table length must track the
    // ghost-extended snapshot.
    let b = ortho_box();
    let mut data = SnapshotData::random(3, 12, &b, 2);
    data.add_periodic_ghosts(&b, CUTOFF);
    let table = paired_bond_table(&data);
    let snap: AtomSnapshot<'_> = data.view().with_special(&table).unwrap();
    assert_eq!(snap.n_all(), data.n_all());
}
