//! The read-only per-build view over caller-owned atom arrays.

use crate::error::SnapshotError;
use crate::id::{AtomTag, MoleculeId};
use crate::topology::{SpecialTable, TemplateBinding};

/// Borrowed, validated view of the atom state for one build.
///
/// Arrays are indexed by local slot `0..n_all`, owned atoms first
/// (`0..n_owned`) followed by ghost replicas. The snapshot is immutable
/// for the duration of a build; the borrow checker enforces that the
/// owning integrator cannot mutate the arrays while a build holds the
/// view.
///
/// Slot indices are not stable across rebuilds. Ghost slots carry the tag
/// of the owned atom they image.
#[derive(Clone, Copy, Debug)]
pub struct AtomSnapshot<'a> {
    positions: &'a [[f64; 3]],
    types: &'a [u32],
    tags: &'a [AtomTag],
    molecules: Option<&'a [MoleculeId]>,
    special: Option<&'a SpecialTable>,
    templates: Option<TemplateBinding<'a>>,
    n_owned: usize,
}

impl<'a> AtomSnapshot<'a> {
    /// Create a snapshot over the mandatory arrays.
    ///
    /// All arrays must have equal length `n_all`, and `n_owned <= n_all`.
    pub fn new(
        positions: &'a [[f64; 3]],
        types: &'a [u32],
        tags: &'a [AtomTag],
        n_owned: usize,
    ) -> Result<Self, SnapshotError> {
        let n_all = positions.len();
        if types.len() != n_all {
            return Err(SnapshotError::LengthMismatch {
                array: "types",
                expected: n_all,
                got: types.len(),
            });
        }
        if tags.len() != n_all {
            return Err(SnapshotError::LengthMismatch {
                array: "tags",
                expected: n_all,
                got: tags.len(),
            });
        }
        if n_owned > n_all {
            return Err(SnapshotError::OwnedExceedsTotal { n_owned, n_all });
        }
        Ok(Self {
            positions,
            types,
            tags,
            molecules: None,
            special: None,
            templates: None,
            n_owned,
        })
    }

    /// Attach per-atom molecule ids.
    pub fn with_molecules(mut self, molecules: &'a [MoleculeId]) -> Result<Self, SnapshotError> {
        if molecules.len() != self.n_all() {
            return Err(SnapshotError::LengthMismatch {
                array: "molecules",
                expected: self.n_all(),
                got: molecules.len(),
            });
        }
        self.molecules = Some(molecules);
        Ok(self)
    }

    /// Attach per-atom special bonded-partner rows.
    pub fn with_special(mut self, special: &'a SpecialTable) -> Result<Self, SnapshotError> {
        if special.len() != self.n_all() {
            return Err(SnapshotError::LengthMismatch {
                array: "special",
                expected: self.n_all(),
                got: special.len(),
            });
        }
        self.special = Some(special);
        Ok(self)
    }

    /// Attach molecule-template bindings (template-mode special lookup).
    pub fn with_templates(mut self, templates: TemplateBinding<'a>) -> Result<Self, SnapshotError> {
        if templates.assignment.len() != self.n_all() {
            return Err(SnapshotError::LengthMismatch {
                array: "template assignment",
                expected: self.n_all(),
                got: templates.assignment.len(),
            });
        }
        self.templates = Some(templates);
        Ok(self)
    }

    /// Total slot count, owned plus ghost.
    pub fn n_all(&self) -> usize {
        self.positions.len()
    }

    /// Owned-atom count; slots `0..n_owned` are owned.
    pub fn n_owned(&self) -> usize {
        self.n_owned
    }

    /// Returns `true` if `slot` is a ghost replica.
    pub fn is_ghost(&self, slot: usize) -> bool {
        slot >= self.n_owned
    }

    /// All positions, indexed by slot.
    pub fn positions(&self) -> &'a [[f64; 3]] {
        self.positions
    }

    /// Position of one slot.
    pub fn position(&self, slot: usize) -> [f64; 3] {
        self.positions[slot]
    }

    /// All types, indexed by slot.
    pub fn types(&self) -> &'a [u32] {
        self.types
    }

    /// All tags, indexed by slot.
    pub fn tags(&self) -> &'a [AtomTag] {
        self.tags
    }

    /// All molecule ids, if attached.
    pub fn molecules(&self) -> Option<&'a [MoleculeId]> {
        self.molecules
    }

    /// Type of one slot.
    pub fn type_of(&self, slot: usize) -> u32 {
        self.types[slot]
    }

    /// Tag of one slot.
    pub fn tag(&self, slot: usize) -> AtomTag {
        self.tags[slot]
    }

    /// Molecule id of one slot, if molecule ids were attached.
    pub fn molecule(&self, slot: usize) -> Option<MoleculeId> {
        self.molecules.map(|m| m[slot])
    }

    /// The attached special table, if any.
    pub fn special(&self) -> Option<&'a SpecialTable> {
        self.special
    }

    /// The attached template binding, if any.
    pub fn templates(&self) -> Option<TemplateBinding<'a>> {
        self.templates
    }
}
