//! In-memory page store.

use std::collections::HashMap;

use tracing::trace;

use crate::common::{Error, PageId, Result};
use crate::storage::page::Page;
use crate::storage::PageStore;

/// A [`PageStore`] that keeps every page in a map.
///
/// Pages are numbered sequentially from 0, like [`DiskManager`](super::DiskManager),
/// and vanish when the store is dropped.
#[derive(Default)]
pub struct MemoryPageStore {
    pages: HashMap<PageId, Page>,
    next_page_id: u32,
}

impl MemoryPageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated pages.
    #[inline]
    pub fn page_count(&self) -> u32 {
        self.next_page_id
    }
}

impl PageStore for MemoryPageStore {
    fn read_page(&mut self, page_id: PageId) -> Result<Page> {
        let page = self
            .pages
            .get(&page_id)
            .ok_or(Error::PageNotFound(page_id.0))?;
        trace!(page_id = page_id.0, "read page from memory store");
        Ok(Page::from_bytes(page.as_bytes()))
    }

    fn write_page(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        let slot = self
            .pages
            .get_mut(&page_id)
            .ok_or(Error::PageNotFound(page_id.0))?;
        *slot = Page::from_bytes(page.as_bytes());
        trace!(page_id = page_id.0, "wrote page to memory store");
        Ok(())
    }

    fn allocate_page(&mut self) -> Result<PageId> {
        if self.next_page_id == PageId::INVALID.0 {
            return Err(Error::PageStoreFull(self.next_page_id));
        }

        let page_id = PageId::new(self.next_page_id);
        self.pages.insert(page_id, Page::new());
        self.next_page_id += 1;
        Ok(page_id)
    }
}
