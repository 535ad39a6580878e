//! Disk Manager - file-backed page store.
//!
//! The [`DiskManager`] handles all direct file operations:
//! - Reading and writing node pages
//! - Allocating new pages
//! - Managing the index file

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageId, Result};
use crate::storage::page::Page;
use crate::storage::PageStore;

/// Manages disk I/O for a single index file.
///
/// # File Layout
/// The index is stored as a single file with pages laid out sequentially:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────┐
/// │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N  │
/// │ (1KB)   │ (1KB)   │ (1KB)   │         │ (1KB)   │
/// └─────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      1024     2048    ...    N×1024
/// ```
///
/// Page N is located at file offset `N × PAGE_SIZE`.
///
/// # Thread Safety
/// `DiskManager` is **single-threaded**. The tree driver serializes all
/// access to it.
///
/// # Durability
/// All writes are followed by `fsync()`. A split still spans three separate
/// page writes, so a crash between them can leave the tree inconsistent.
pub struct DiskManager {
    file: File,
    /// Number of pages in the file.
    page_count: u32,
}

impl DiskManager {
    /// Create a new index file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path.as_ref())?;

        debug!(path = %path.as_ref().display(), "created index file");

        Ok(Self {
            file,
            page_count: 0,
        })
    }

    /// Open an existing index file.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;

        // Trailing partial pages are ignored
        let file_size = file.metadata()?.len();
        let page_count = (file_size / PAGE_SIZE as u64) as u32;

        debug!(path = %path.as_ref().display(), page_count, "opened index file");

        Ok(Self { file, page_count })
    }

    /// Open an existing index file, or create if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    /// Get the number of pages in the file.
    #[inline]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Get the total size of the index file in bytes.
    #[inline]
    pub fn file_size(&self) -> u64 {
        (self.page_count as u64) * (PAGE_SIZE as u64)
    }

    fn offset_of(page_id: PageId) -> u64 {
        (page_id.0 as u64) * (PAGE_SIZE as u64)
    }
}

impl PageStore for DiskManager {
    /// Read a page from disk.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the page doesn't exist.
    fn read_page(&mut self, page_id: PageId) -> Result<Page> {
        if page_id.0 >= self.page_count {
            return Err(Error::PageNotFound(page_id.0));
        }

        self.file.seek(SeekFrom::Start(Self::offset_of(page_id)))?;

        let mut page = Page::new();
        self.file.read_exact(page.as_mut_slice())?;

        trace!(page_id = page_id.0, "read page");
        Ok(page)
    }

    /// Write a page to disk.
    ///
    /// The page must have been previously allocated with `allocate_page()`.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the page hasn't been allocated.
    fn write_page(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        if page_id.0 >= self.page_count {
            return Err(Error::PageNotFound(page_id.0));
        }

        self.file.seek(SeekFrom::Start(Self::offset_of(page_id)))?;
        self.file.write_all(page.as_slice())?;
        self.file.sync_all()?;

        trace!(page_id = page_id.0, "wrote page");
        Ok(())
    }

    /// Allocate a new page at the end of the file.
    ///
    /// The page is initialized with zeros.
    fn allocate_page(&mut self) -> Result<PageId> {
        // u32::MAX is PageId::INVALID
        if self.page_count == PageId::INVALID.0 {
            return Err(Error::PageStoreFull(self.page_count));
        }

        let page_id = PageId::new(self.page_count);

        self.file.seek(SeekFrom::Start(Self::offset_of(page_id)))?;

        let zeros = [0u8; PAGE_SIZE];
        self.file.write_all(&zeros)?;
        self.file.sync_all()?;

        self.page_count += 1;
        trace!(page_id = page_id.0, "allocated page");
        Ok(page_id)
    }
}
