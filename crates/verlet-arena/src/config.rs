//! Page-pool configuration parameters.

/// Configuration for a [`PagePool`](crate::PagePool).
///
/// Validated at pool construction; immutable afterwards except through
/// [`PagePool::grow`](crate::PagePool::grow), which doubles the chunk
/// budget up to `max_chunk_cap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// Entries per page.
    ///
    /// Default: 131_072 (512KB at 4 bytes per entry). Must be at least
    /// `max_chunk`.
    pub page_size: u32,

    /// Maximum number of pages the pool may allocate.
    ///
    /// Default: 1024. Pages are allocated lazily, so this is a cap on
    /// total footprint, not an up-front cost.
    pub max_pages: u16,

    /// Worst-case entries in a single run — the amount `reserve()` must
    /// guarantee.
    ///
    /// Default: 2048. A run that would exceed this is the overflow signal
    /// that makes the caller grow the pool and rebuild.
    pub max_chunk: u32,

    /// Hard ceiling `grow()` may raise `max_chunk` to.
    ///
    /// Default: 4_194_304. Reaching it converts overflow from recoverable
    /// to fatal.
    pub max_chunk_cap: u32,
}

impl PageConfig {
    /// Default entries per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 131_072;

    /// Default maximum page count.
    pub const DEFAULT_MAX_PAGES: u16 = 1024;

    /// Default worst-case run length.
    pub const DEFAULT_MAX_CHUNK: u32 = 2048;

    /// Default growth ceiling for the run length.
    pub const DEFAULT_MAX_CHUNK_CAP: u32 = 4_194_304;

    /// Total pool capacity in bytes if every page were allocated.
    pub fn capacity_bytes(&self) -> usize {
        self.page_size as usize * self.max_pages as usize * std::mem::size_of::<u32>()
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            max_pages: Self::DEFAULT_MAX_PAGES,
            max_chunk: Self::DEFAULT_MAX_CHUNK,
            max_chunk_cap: Self::DEFAULT_MAX_CHUNK_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity() {
        let c = PageConfig::default();
        assert_eq!(c.capacity_bytes(), 131_072 * 1024 * 4);
    }
}
