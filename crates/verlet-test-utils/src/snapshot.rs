//! Owned atom-state buffers for test scenarios.

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use verlet_core::{AtomSnapshot, AtomTag, MoleculeId, SimBox};

/// Owned backing arrays for an [`AtomSnapshot`].
///
/// Owned atoms come first; [`add_periodic_ghosts`](Self::add_periodic_ghosts)
/// appends replica slots after them. [`view`](Self::view) borrows the
/// arrays as the snapshot the builders consume.
#[derive(Clone, Debug)]
pub struct SnapshotData {
    pub positions: Vec<[f64; 3]>,
    pub types: Vec<u32>,
    pub tags: Vec<AtomTag>,
    pub molecules: Vec<MoleculeId>,
    pub n_owned: usize,
}

impl SnapshotData {
    /// `n` owned atoms uniformly distributed in the box, tags `1..=n`,
    /// types drawn from `0..n_types`, no molecules. Deterministic per
    /// seed.
    pub fn random(seed: u64, n: usize, sim_box: &SimBox, n_types: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let lo = sim_box.lo();
        let mut positions = Vec::with_capacity(n);
        for _ in 0..n {
            // Sample in fractional space so triclinic boxes stay uniform.
            let lam = [
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..1.0),
            ];
            let d = sim_box.lamda_to_delta(lam);
            positions.push([lo[0] + d[0], lo[1] + d[1], lo[2] + d[2]]);
        }
        let types = (0..n).map(|_| rng.random_range(0..n_types.max(1))).collect();
        Self {
            positions,
            types,
            tags: (1..=n as u64).map(AtomTag).collect(),
            molecules: vec![MoleculeId(0); n],
            n_owned: n,
        }
    }

    /// Borrow the arrays as a snapshot.
    pub fn view(&self) -> AtomSnapshot<'_> {
        // Arrays are kept length-equal by construction.
        AtomSnapshot::new(&self.positions, &self.types, &self.tags, self.n_owned)
            .expect("snapshot arrays out of sync")
            .with_molecules(&self.molecules)
            .expect("molecule array out of sync")
    }

    /// Append periodic replicas of every owned atom that falls within
    /// `halo` of the box, the way a communication layer would populate a
    /// ghost shell. Replicas carry the owning atom's tag, type, and
    /// molecule. Call once; `halo` should be at least the binning cutoff
    /// for the ghost shell to be complete.
    pub fn add_periodic_ghosts(&mut self, sim_box: &SimBox, halo: f64) {
        let periodic = sim_box.periodic();
        let perp = sim_box.perpendicular_widths();
        let mut halo_frac = [0.0f64; 3];
        for axis in 0..3 {
            halo_frac[axis] = halo / perp[axis];
        }

        for sz in -1i32..=1 {
            for sy in -1i32..=1 {
                for sx in -1i32..=1 {
                    let shift = [sx, sy, sz];
                    if shift == [0, 0, 0] {
                        continue;
                    }
                    if (0..3).any(|a| shift[a] != 0 && !periodic[a]) {
                        continue;
                    }
                    let delta = sim_box.lamda_to_delta([
                        shift[0] as f64,
                        shift[1] as f64,
                        shift[2] as f64,
                    ]);
                    for i in 0..self.n_owned {
                        let p = self.positions[i];
                        let shifted = [p[0] + delta[0], p[1] + delta[1], p[2] + delta[2]];
                        let lam = sim_box.to_lamda(shifted);
                        let in_halo = (0..3).all(|a| {
                            lam[a] >= -halo_frac[a] && lam[a] <= 1.0 + halo_frac[a]
                        });
                        if in_halo {
                            self.positions.push(shifted);
                            self.types.push(self.types[i]);
                            self.tags.push(self.tags[i]);
                            self.molecules.push(self.molecules[i]);
                        }
                    }
                }
            }
        }
    }

    pub fn n_all(&self) -> usize {
        self.positions.len()
    }
}
