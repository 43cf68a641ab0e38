//! Bonded-exclusion topology: special-partner tables and molecule templates.
//!
//! A [`SpecialTable`] records, for every atom slot, the tags of atoms it is
//! connected to through 1-2 (direct bond), 1-3 (one intermediate atom), and
//! 1-4 (two intermediates) bonded paths. Pair enumeration consults it to
//! drop or rescale short-range interactions between chemically connected
//! atoms. Lookups are keyed by tag, never by slot, because slot indices do
//! not survive rebuilds.
//!
//! Molecule-template systems store one shared table per template instead of
//! per-atom rows; [`TemplateBinding`] translates a partner's global tag to
//! the template-local tag space before searching.

use crate::id::AtomTag;

/// Bonded-path tier of a special partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialTier {
    /// Directly bonded (1-2).
    OneTwo,
    /// Two bonds apart (1-3).
    OneThree,
    /// Three bonds apart (1-4).
    OneFour,
}

impl SpecialTier {
    /// Tier index in `0..3`, in 1-2, 1-3, 1-4 order.
    pub fn index(self) -> usize {
        match self {
            Self::OneTwo => 0,
            Self::OneThree => 1,
            Self::OneFour => 2,
        }
    }
}

/// Per-atom tiered special-partner tags in a compact prefix layout.
///
/// Each row holds the three tiers concatenated, each tier sorted by tag so
/// membership checks are a binary search. Rows are pushed in slot order
/// and must cover every slot in `0..n_all`; ghost slots carry the same row
/// content as the owned atom they image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialTable {
    /// Row start offsets into `partners`; `len() + 1` entries.
    offsets: Vec<usize>,
    /// Cumulative tier counts per row: `[n12, n12+n13, total]`.
    cum: Vec<[u32; 3]>,
    partners: Vec<AtomTag>,
}

impl SpecialTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            offsets: vec![0],
            cum: Vec::new(),
            partners: Vec::new(),
        }
    }

    /// Number of atom rows.
    pub fn len(&self) -> usize {
        self.cum.len()
    }

    /// Returns `true` if no rows have been pushed.
    pub fn is_empty(&self) -> bool {
        self.cum.is_empty()
    }

    /// Append the next atom's partners, one slice per tier.
    ///
    /// Each tier is copied and sorted internally; duplicate tags within a
    /// tier are kept as given (they only cost redundant comparisons).
    pub fn push_atom(&mut self, one_two: &[AtomTag], one_three: &[AtomTag], one_four: &[AtomTag]) {
        let mut counts = [0u32; 3];
        for (tier, tags) in [one_two, one_three, one_four].into_iter().enumerate() {
            let start = self.partners.len();
            self.partners.extend_from_slice(tags);
            self.partners[start..].sort_unstable();
            counts[tier] = tags.len() as u32;
        }
        let cum = [
            counts[0],
            counts[0] + counts[1],
            counts[0] + counts[1] + counts[2],
        ];
        self.cum.push(cum);
        self.offsets.push(self.partners.len());
    }

    /// Search atom `row`'s partners for `partner`, returning its tier.
    ///
    /// Returns `None` when the pair is not bonded-special. Untagged
    /// partners never match.
    pub fn find(&self, row: usize, partner: AtomTag) -> Option<SpecialTier> {
        if !partner.is_tagged() {
            return None;
        }
        let base = self.offsets[row];
        let cum = self.cum[row];
        let mut tier_start = 0usize;
        for (tier, &tier_end) in cum.iter().enumerate() {
            let seg = &self.partners[base + tier_start..base + tier_end as usize];
            if seg.binary_search(&partner).is_ok() {
                return Some(match tier {
                    0 => SpecialTier::OneTwo,
                    1 => SpecialTier::OneThree,
                    _ => SpecialTier::OneFour,
                });
            }
            tier_start = tier_end as usize;
        }
        None
    }
}

/// One molecule template: the shared special table for its atoms.
///
/// Row `k` of `special` is the k-th atom of the template; partner tags are
/// template-local (the first template atom is tag 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoleculeTemplate {
    /// Per-template-atom special partners in template-local tag space.
    pub special: SpecialTable,
}

/// An atom's position within a molecule template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateRef {
    /// Index into the template array.
    pub template: u32,
    /// Zero-based atom index within the template.
    pub atom: u32,
}

/// Binds per-atom template assignments to the shared template tables.
#[derive(Clone, Copy, Debug)]
pub struct TemplateBinding<'a> {
    /// The shared templates.
    pub templates: &'a [MoleculeTemplate],
    /// Per-slot assignment, `None` for atoms outside any template.
    pub assignment: &'a [Option<TemplateRef>],
}

impl<'a> TemplateBinding<'a> {
    /// Tier of the bonded path between slot `i` (tag `itag`) and tag `jtag`,
    /// translated through `i`'s template offset.
    ///
    /// The global tag of template atom `k` in `i`'s molecule is
    /// `itag - atom(i) + k`, so the template-local key for `jtag` is
    /// `jtag - (itag - atom(i) - 1)`.
    pub fn find(&self, i: usize, itag: AtomTag, jtag: AtomTag) -> Option<SpecialTier> {
        let r = self.assignment[i]?;
        let tpl = &self.templates[r.template as usize];
        let base = itag.0.checked_sub(r.atom as u64 + 1)?;
        let local = jtag.0.checked_sub(base)?;
        tpl.special.find(r.atom as usize, AtomTag(local))
    }
}
