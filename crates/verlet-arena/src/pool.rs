//! The page pool and its index-based run handles.

use crate::config::PageConfig;
use crate::error::ArenaError;

/// Index-based handle to one committed run.
///
/// Stays valid until the pool is [`reset`](PagePool::reset) or
/// [`grow`](PagePool::grow)n; never a pointer, so the pool may allocate
/// further pages without invalidating earlier rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row {
    page: u16,
    offset: u32,
    len: u32,
}

impl Row {
    /// A zero-length row, valid on any pool.
    pub const EMPTY: Row = Row {
        page: 0,
        offset: 0,
        len: 0,
    };

    /// Entries in the run.
    pub fn len(self) -> usize {
        self.len as usize
    }

    /// Returns `true` for zero-length runs.
    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Bump allocator over fixed-size pages with a reserve/commit protocol.
///
/// The write cycle per run is: [`reserve`](Self::reserve) a worst-case
/// chunk, fill some prefix of it, then [`commit`](Self::commit) the actual
/// length to obtain a [`Row`]. Reservations that do not fit the current
/// page's remainder advance to a fresh page, so a committed run is always
/// contiguous within one page.
///
/// Pages are never freed during a run; [`reset`](Self::reset) rewinds the
/// cursors so the next rebuild reuses the same memory.
#[derive(Debug)]
pub struct PagePool {
    pages: Vec<Vec<u32>>,
    config: PageConfig,
    current: usize,
    cursor: usize,
}

impl PagePool {
    /// Create an empty pool. The first page is allocated on first use.
    pub fn new(config: PageConfig) -> Result<Self, ArenaError> {
        if config.page_size == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "page_size must be nonzero",
            });
        }
        if config.max_pages == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "max_pages must be nonzero",
            });
        }
        if config.max_chunk == 0 || config.max_chunk > config.page_size {
            return Err(ArenaError::InvalidConfig {
                reason: "max_chunk must be in 1..=page_size",
            });
        }
        if config.max_chunk_cap < config.max_chunk {
            return Err(ArenaError::InvalidConfig {
                reason: "max_chunk_cap must be at least max_chunk",
            });
        }
        Ok(Self {
            pages: Vec::new(),
            config,
            current: 0,
            cursor: 0,
        })
    }

    /// Current worst-case run length guaranteed by [`reserve`](Self::reserve).
    pub fn max_chunk(&self) -> usize {
        self.config.max_chunk as usize
    }

    /// Reserve a chunk of `max_chunk` entries from the current page.
    ///
    /// Advances to a fresh page when the remainder is short. The chunk's
    /// contents are unspecified; callers only read back what they wrote
    /// and committed.
    pub fn reserve(&mut self) -> Result<&mut [u32], ArenaError> {
        let chunk = self.config.max_chunk as usize;
        let page_size = self.config.page_size as usize;

        if self.pages.is_empty() {
            self.pages.push(vec![0; page_size]);
        } else if self.cursor + chunk > page_size {
            let next = self.current + 1;
            if next == self.pages.len() {
                if self.pages.len() >= self.config.max_pages as usize {
                    return Err(ArenaError::CapacityExceeded {
                        pages: self.pages.len(),
                        max_pages: self.config.max_pages as usize,
                    });
                }
                self.pages.push(vec![0; page_size]);
            }
            self.current = next;
            self.cursor = 0;
        }

        let start = self.cursor;
        Ok(&mut self.pages[self.current][start..start + chunk])
    }

    /// Commit the first `n` entries of the chunk returned by the matching
    /// [`reserve`](Self::reserve) call, advancing the cursor past them.
    pub fn commit(&mut self, n: usize) -> Result<Row, ArenaError> {
        if n > self.config.max_chunk as usize {
            return Err(ArenaError::ChunkOverflow {
                committed: n,
                reserved: self.config.max_chunk as usize,
            });
        }
        let row = Row {
            page: self.current as u16,
            offset: self.cursor as u32,
            len: n as u32,
        };
        self.cursor += n;
        Ok(row)
    }

    /// Read a committed run.
    pub fn row(&self, row: Row) -> &[u32] {
        if row.is_empty() {
            return &[];
        }
        let start = row.offset as usize;
        &self.pages[row.page as usize][start..start + row.len as usize]
    }

    /// Rewind every page without deallocating.
    ///
    /// All previously committed rows become invalid.
    pub fn reset(&mut self) {
        self.current = 0;
        self.cursor = 0;
    }

    /// Double both the worst-case run length and the page size, up to the
    /// chunk cap, so one call recovers from either overflow kind (a run
    /// too long for its chunk, or the page set filling up).
    ///
    /// Existing pages are discarded and reallocated lazily; all rows
    /// become invalid. The caller is expected to rebuild from scratch
    /// afterwards.
    pub fn grow(&mut self) -> Result<(), ArenaError> {
        if self.config.max_chunk >= self.config.max_chunk_cap {
            return Err(ArenaError::GrowthExhausted {
                cap: self.config.max_chunk_cap,
            });
        }
        self.config.max_chunk = self
            .config
            .max_chunk
            .saturating_mul(2)
            .min(self.config.max_chunk_cap);
        self.config.page_size = self
            .config
            .page_size
            .saturating_mul(2)
            .max(self.config.max_chunk);
        self.pages.clear();
        self.reset();
        Ok(())
    }

    /// Pages currently allocated.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total memory footprint of the backing pages in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.pages.len() * self.config.page_size as usize * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_pool() -> PagePool {
        PagePool::new(PageConfig {
            page_size: 16,
            max_pages: 2,
            max_chunk: 8,
            max_chunk_cap: 32,
        })
        .unwrap()
    }

    #[test]
    fn reserve_commit_roundtrip() {
        let mut pool = small_pool();
        let chunk = pool.reserve().unwrap();
        chunk[0] = 11;
        chunk[1] = 22;
        let row = pool.commit(2).unwrap();
        assert_eq!(pool.row(row), &[11, 22]);
    }

    #[test]
    fn runs_are_contiguous_and_ordered() {
        let mut pool = small_pool();
        let c = pool.reserve().unwrap();
        c[0] = 1;
        let a = pool.commit(1).unwrap();
        let c = pool.reserve().unwrap();
        c[0] = 2;
        c[1] = 3;
        let b = pool.commit(2).unwrap();
        assert_eq!(pool.row(a), &[1]);
        assert_eq!(pool.row(b), &[2, 3]);
    }

    #[test]
    fn short_remainder_advances_page() {
        let mut pool = small_pool();
        pool.reserve().unwrap();
        pool.commit(5).unwrap();
        pool.reserve().unwrap();
        pool.commit(8).unwrap();
        // The cursor sits at 13; an 8-slot chunk no longer fits page one.
        pool.reserve().unwrap();
        let row = pool.commit(4).unwrap();
        assert_eq!(pool.page_count(), 2);
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn exact_remainder_fit_stays_on_one_page() {
        let mut pool = small_pool();
        pool.reserve().unwrap();
        pool.commit(8).unwrap();
        // 8 + 8 fills page one exactly; no advance yet.
        pool.reserve().unwrap();
        pool.commit(8).unwrap();
        assert_eq!(pool.page_count(), 1);
    }

    #[test]
    fn capacity_exceeded_when_pages_run_out() {
        let mut pool = small_pool();
        for _ in 0..4 {
            pool.reserve().unwrap();
            pool.commit(8).unwrap();
        }
        assert!(matches!(
            pool.reserve(),
            Err(ArenaError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn commit_beyond_chunk_is_rejected() {
        let mut pool = small_pool();
        pool.reserve().unwrap();
        assert!(matches!(
            pool.commit(9),
            Err(ArenaError::ChunkOverflow { .. })
        ));
    }

    #[test]
    fn reset_reuses_pages() {
        let mut pool = small_pool();
        pool.reserve().unwrap();
        pool.commit(8).unwrap();
        pool.reserve().unwrap();
        pool.commit(8).unwrap();
        let pages = pool.page_count();
        pool.reset();
        pool.reserve().unwrap();
        pool.commit(1).unwrap();
        assert_eq!(pool.page_count(), pages);
    }

    #[test]
    fn grow_doubles_chunk_and_respects_cap() {
        let mut pool = small_pool();
        assert_eq!(pool.max_chunk(), 8);
        pool.grow().unwrap();
        assert_eq!(pool.max_chunk(), 16);
        pool.grow().unwrap();
        assert_eq!(pool.max_chunk(), 32);
        assert!(matches!(
            pool.grow(),
            Err(ArenaError::GrowthExhausted { cap: 32 })
        ));
    }

    #[test]
    fn grow_past_page_size_reallocates() {
        let mut pool = small_pool();
        pool.reserve().unwrap();
        pool.commit(8).unwrap();
        pool.grow().unwrap(); // 16, fits page
        pool.grow().unwrap(); // 32, exceeds page_size 16
        let chunk = pool.reserve().unwrap();
        assert_eq!(chunk.len(), 32);
    }

    #[test]
    fn empty_row_reads_empty_on_fresh_pool() {
        let pool = PagePool::new(PageConfig::default()).unwrap();
        assert_eq!(pool.row(Row::EMPTY), &[] as &[u32]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn committed_rows_read_back_intact(
                lens in proptest::collection::vec(0usize..=8, 0..40),
            ) {
                let mut pool = PagePool::new(PageConfig {
                    page_size: 16,
                    max_pages: 64,
                    max_chunk: 8,
                    max_chunk_cap: 8,
                })
                .unwrap();

                let mut rows = Vec::new();
                for (run, &len) in lens.iter().enumerate() {
                    let chunk = pool.reserve().unwrap();
                    for (k, slot) in chunk[..len].iter_mut().enumerate() {
                        *slot = (run * 100 + k) as u32;
                    }
                    rows.push(pool.commit(len).unwrap());
                }
                for (run, (&len, row)) in lens.iter().zip(rows).enumerate() {
                    let data = pool.row(row);
                    prop_assert_eq!(data.len(), len);
                    for (k, &v) in data.iter().enumerate() {
                        prop_assert_eq!(v, (run * 100 + k) as u32);
                    }
                }
            }
        }
    }

    #[test]
    fn invalid_configs_rejected() {
        let bad = PageConfig {
            page_size: 4,
            max_pages: 1,
            max_chunk: 8,
            max_chunk_cap: 8,
        };
        assert!(matches!(
            PagePool::new(bad),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }
}
