//! Packed neighbor entries.

use verlet_core::SpecialTier;

/// Bits reserved for the neighbor slot; the top bits carry the special tier.
const SLOT_BITS: u32 = 30;
const SLOT_MASK: u32 = (1 << SLOT_BITS) - 1;

/// One neighbor-list entry: a local slot index with the bonded-special
/// tier packed into the two high bits.
///
/// Tier bits are zero for a plain pair and `tier + 1` for a scaled special
/// pair, so force kernels can unpack the scale factor without a second
/// lookup. Slot indices are valid only until the next rebuild.
///
/// Builders guarantee `slot <= MAX_SLOT` by refusing snapshots with more
/// slots than the packing can address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborEntry(u32);

impl NeighborEntry {
    /// Largest representable slot index.
    pub const MAX_SLOT: usize = SLOT_MASK as usize;

    /// Entry for a plain (non-special) pair.
    pub fn plain(slot: usize) -> Self {
        Self(slot as u32)
    }

    /// Entry for a special pair kept at scaled weight.
    pub fn special(slot: usize, tier: SpecialTier) -> Self {
        Self(slot as u32 | ((tier.index() as u32 + 1) << SLOT_BITS))
    }

    /// The neighbor's local slot index.
    pub fn slot(self) -> usize {
        (self.0 & SLOT_MASK) as usize
    }

    /// The bonded-special tier, or `None` for a plain pair.
    pub fn tier(self) -> Option<SpecialTier> {
        match self.0 >> SLOT_BITS {
            0 => None,
            1 => Some(SpecialTier::OneTwo),
            2 => Some(SpecialTier::OneThree),
            _ => Some(SpecialTier::OneFour),
        }
    }

    /// The packed representation, as stored in the page pool.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Rebuild an entry from its packed representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}
