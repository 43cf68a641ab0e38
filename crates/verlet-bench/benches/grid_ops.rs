//! Criterion micro-benchmarks for bin-grid construction and traversal.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use verlet_bench::{reference_box, REFERENCE_CUTOFF, REFERENCE_DENSITY, REFERENCE_SKIN};
use verlet_space::{BinConfig, BinGrid};
use verlet_test_utils::SnapshotData;

const LIST_CUTOFF: f64 = REFERENCE_CUTOFF + REFERENCE_SKIN;

/// Benchmark: full grid rebuild (rebin) at several scene sizes.
///
/// This is the per-rebuild fixed cost the skin amortizes; it should stay
/// linear in the atom count.
fn bench_rebin(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebin");
    for n in [4096usize, 32_768] {
        let sim_box = reference_box(n, REFERENCE_DENSITY).unwrap();
        let mut data = SnapshotData::random(7, n, &sim_box, 1);
        data.add_periodic_ghosts(&sim_box, LIST_CUTOFF);

        group.bench_function(format!("{n}_atoms"), |b| {
            b.iter(|| {
                let grid = BinGrid::build(
                    &sim_box,
                    LIST_CUTOFF,
                    &BinConfig::default(),
                    &data.positions,
                )
                .unwrap();
                black_box(grid.bin_count());
            });
        });
    }
    group.finish();
}

/// Benchmark: walk every stencil-adjacent chain from every atom's bin,
/// the candidate traversal the enumerators run without the distance work.
fn bench_stencil_traversal_4k(c: &mut Criterion) {
    let n = 4096;
    let sim_box = reference_box(n, REFERENCE_DENSITY).unwrap();
    let mut data = SnapshotData::random(7, n, &sim_box, 1);
    data.add_periodic_ghosts(&sim_box, LIST_CUTOFF);
    let grid =
        BinGrid::build(&sim_box, LIST_CUTOFF, &BinConfig::default(), &data.positions).unwrap();

    c.bench_function("stencil_traversal_4k", |b| {
        b.iter(|| {
            let mut visited = 0usize;
            for i in 0..grid.n_atoms() {
                let home = grid.bin_of(i);
                for off in grid.stencil().offsets() {
                    let bin = [home[0] + off[0], home[1] + off[1], home[2] + off[2]];
                    visited += grid.chain(bin).count();
                }
            }
            black_box(visited);
        });
    });
}

criterion_group!(benches, bench_rebin, bench_stencil_traversal_4k);
criterion_main!(benches);
