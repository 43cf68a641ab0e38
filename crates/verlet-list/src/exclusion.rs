//! Pair exclusion: static type/molecule masks and bonded-special lookup.

use verlet_core::{AtomSnapshot, SpecialTier};

/// Outcome of the bonded-special check for one candidate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialCheck {
    /// Not special, or special at full weight: store as a plain pair.
    None,
    /// Special at zero weight: drop the pair.
    Exclude,
    /// Special at a reduced weight: store tagged with the tier so the
    /// force kernel can rescale it.
    Scale(SpecialTier),
}

/// Per-tier interaction weights for bonded-special pairs.
///
/// Weight `0.0` drops the pair from the list entirely, `1.0` keeps it as
/// an ordinary pair, and anything in between keeps it tagged with its
/// tier. The default excludes all three tiers, the common force-field
/// baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpecialPolicy {
    weights: [f64; 3],
}

impl SpecialPolicy {
    /// Policy from per-tier weights in 1-2, 1-3, 1-4 order.
    pub const fn new(weights: [f64; 3]) -> Self {
        Self { weights }
    }

    /// The per-tier weights.
    pub fn weights(&self) -> [f64; 3] {
        self.weights
    }

    /// Classify a pair found special at `tier`.
    pub fn check(&self, tier: SpecialTier) -> SpecialCheck {
        let w = self.weights[tier.index()];
        if w == 0.0 {
            SpecialCheck::Exclude
        } else if w == 1.0 {
            SpecialCheck::None
        } else {
            SpecialCheck::Scale(tier)
        }
    }
}

impl Default for SpecialPolicy {
    fn default() -> Self {
        Self::new([0.0; 3])
    }
}

/// Symmetric type-pair exclusion matrix with O(1) lookup.
///
/// The matrix grows to cover the largest type mentioned in an
/// [`exclude`](Self::exclude) call; types outside the matrix are never
/// excluded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeExclusions {
    n_types: usize,
    mask: Vec<bool>,
}

impl TypeExclusions {
    /// An empty matrix excluding nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude all pairs between types `a` and `b` (symmetric).
    pub fn exclude(&mut self, a: u32, b: u32) {
        let need = (a.max(b) as usize) + 1;
        if need > self.n_types {
            self.grow_to(need);
        }
        let n = self.n_types;
        self.mask[a as usize * n + b as usize] = true;
        self.mask[b as usize * n + a as usize] = true;
    }

    /// Returns `true` if pairs between `a` and `b` are excluded.
    pub fn is_excluded(&self, a: u32, b: u32) -> bool {
        let (a, b) = (a as usize, b as usize);
        a < self.n_types && b < self.n_types && self.mask[a * self.n_types + b]
    }

    fn grow_to(&mut self, n: usize) {
        let mut mask = vec![false; n * n];
        for a in 0..self.n_types {
            for b in 0..self.n_types {
                mask[a * n + b] = self.mask[a * self.n_types + b];
            }
        }
        self.mask = mask;
        self.n_types = n;
    }
}

/// Decides, per candidate pair, whether it is statically excluded or
/// bonded-special.
///
/// Static exclusion (type matrix, same-molecule flag) removes the pair
/// before any special lookup. The special lookup searches the origin
/// atom's tiered partner tags, keyed by the candidate's tag so the result
/// survives slot reshuffling; template-bound snapshots translate the tag
/// through the origin's template offset first.
#[derive(Clone, Copy, Debug)]
pub struct ExclusionFilter<'a> {
    snapshot: AtomSnapshot<'a>,
    policy: SpecialPolicy,
    types: Option<&'a TypeExclusions>,
    exclude_same_molecule: bool,
}

impl<'a> ExclusionFilter<'a> {
    /// Filter over a snapshot with the given special policy and no static
    /// exclusions.
    pub fn new(snapshot: AtomSnapshot<'a>, policy: SpecialPolicy) -> Self {
        Self {
            snapshot,
            policy,
            types: None,
            exclude_same_molecule: false,
        }
    }

    /// Attach a type-pair exclusion matrix.
    pub fn with_type_exclusions(mut self, types: &'a TypeExclusions) -> Self {
        self.types = Some(types);
        self
    }

    /// Drop all pairs within the same molecule (nonzero molecule ids).
    pub fn with_same_molecule_excluded(mut self) -> Self {
        self.exclude_same_molecule = true;
        self
    }

    /// Returns `true` if the pair is removed by a static rule, before any
    /// distance or special consideration.
    pub fn statically_excluded(&self, i: usize, j: usize) -> bool {
        if let Some(types) = self.types {
            if types.is_excluded(self.snapshot.type_of(i), self.snapshot.type_of(j)) {
                return true;
            }
        }
        if self.exclude_same_molecule {
            if let (Some(mi), Some(mj)) = (self.snapshot.molecule(i), self.snapshot.molecule(j)) {
                if mi == mj && mi.0 != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Bonded-special classification of the pair under this filter's
    /// policy.
    pub fn special_check(&self, i: usize, j: usize) -> SpecialCheck {
        let jtag = self.snapshot.tag(j);
        let tier = if let Some(binding) = self.snapshot.templates() {
            binding.find(i, self.snapshot.tag(i), jtag)
        } else if let Some(table) = self.snapshot.special() {
            table.find(i, jtag)
        } else {
            None
        };
        match tier {
            Some(t) => self.policy.check(t),
            None => SpecialCheck::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verlet_core::{AtomTag, MoleculeId, SpecialTable};

    fn tags(v: &[u64]) -> Vec<AtomTag> {
        v.iter().copied().map(AtomTag).collect()
    }

    #[test]
    fn policy_classifies_by_weight() {
        let p = SpecialPolicy::new([0.0, 0.5, 1.0]);
        assert_eq!(p.check(SpecialTier::OneTwo), SpecialCheck::Exclude);
        assert_eq!(
            p.check(SpecialTier::OneThree),
            SpecialCheck::Scale(SpecialTier::OneThree)
        );
        assert_eq!(p.check(SpecialTier::OneFour), SpecialCheck::None);
    }

    #[test]
    fn default_policy_drops_all_tiers() {
        let p = SpecialPolicy::default();
        assert_eq!(p.check(SpecialTier::OneFour), SpecialCheck::Exclude);
    }

    #[test]
    fn type_matrix_is_symmetric_and_grows() {
        let mut t = TypeExclusions::new();
        assert!(!t.is_excluded(0, 1));
        t.exclude(0, 2);
        assert!(t.is_excluded(0, 2));
        assert!(t.is_excluded(2, 0));
        assert!(!t.is_excluded(1, 2));
        // Growing must preserve prior entries.
        t.exclude(5, 5);
        assert!(t.is_excluded(0, 2));
        assert!(t.is_excluded(5, 5));
        assert!(!t.is_excluded(6, 6));
    }

    #[test]
    fn same_molecule_exclusion_skips_unset_ids() {
        let pos = [[0.0; 3]; 3];
        let types = [0u32; 3];
        let atom_tags = tags(&[1, 2, 3]);
        let mols = [MoleculeId(7), MoleculeId(7), MoleculeId(0)];
        let snap = AtomSnapshot::new(&pos, &types, &atom_tags, 3)
            .unwrap()
            .with_molecules(&mols)
            .unwrap();

        let f = ExclusionFilter::new(snap, SpecialPolicy::default()).with_same_molecule_excluded();
        assert!(f.statically_excluded(0, 1));
        assert!(!f.statically_excluded(0, 2));
        // Two molecule-less atoms never exclude each other.
        let mols0 = [MoleculeId(0); 3];
        let snap0 = AtomSnapshot::new(&pos, &types, &atom_tags, 3)
            .unwrap()
            .with_molecules(&mols0)
            .unwrap();
        let f0 =
            ExclusionFilter::new(snap0, SpecialPolicy::default()).with_same_molecule_excluded();
        assert!(!f0.statically_excluded(1, 2));
    }

    #[test]
    fn special_check_searches_origin_row() {
        let pos = [[0.0; 3]; 2];
        let atom_types = [0u32; 2];
        let atom_tags = tags(&[10, 20]);
        let mut table = SpecialTable::new();
        table.push_atom(&tags(&[20]), &[], &[]);
        table.push_atom(&tags(&[10]), &[], &[]);
        let snap = AtomSnapshot::new(&pos, &atom_types, &atom_tags, 2)
            .unwrap()
            .with_special(&table)
            .unwrap();

        let drop = ExclusionFilter::new(snap, SpecialPolicy::default());
        assert_eq!(drop.special_check(0, 1), SpecialCheck::Exclude);

        let scale = ExclusionFilter::new(snap, SpecialPolicy::new([0.5, 0.0, 0.0]));
        assert_eq!(
            scale.special_check(0, 1),
            SpecialCheck::Scale(SpecialTier::OneTwo)
        );
        assert_eq!(
            scale.special_check(1, 0),
            SpecialCheck::Scale(SpecialTier::OneTwo)
        );
    }

    #[test]
    fn no_table_means_nothing_special() {
        let pos = [[0.0; 3]; 2];
        let atom_types = [0u32; 2];
        let atom_tags = tags(&[1, 2]);
        let snap = AtomSnapshot::new(&pos, &atom_types, &atom_tags, 2).unwrap();
        let f = ExclusionFilter::new(snap, SpecialPolicy::default());
        assert_eq!(f.special_check(0, 1), SpecialCheck::None);
    }
}
