//! Page - the fixed-size unit of storage.
//!
//! A [`Page`] is a raw 1KB byte array that serves as the unit of I/O
//! between the page store and the node codecs.

use crate::common::config::PAGE_SIZE;

use super::page_header::PageHeader;

/// A page of data (1KB).
///
/// Nodes never reinterpret a `Page` in place. They decode it field by field
/// into typed arrays and encode back the same way.
///
/// # Clone Implementation
/// `Page` does NOT implement `Clone` in production code; copies go through
/// [`Page::from_bytes`] so they stay explicit.
/// A `#[cfg(test)]` Clone is provided for tests.
///
/// # Example
/// ```
/// use bplus_node::storage::page::Page;
///
/// let mut page = Page::new();
/// page.as_mut_slice()[0] = 0xFF;
/// assert_eq!(page.as_slice()[0], 0xFF);
/// ```
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// Create a new zeroed page.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// Create a page holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8; PAGE_SIZE]) -> Self {
        Self { data: *bytes }
    }

    /// Get immutable slice of page data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable slice of page data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the underlying fixed-size array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PAGE_SIZE] {
        &self.data
    }

    /// Read the page header.
    pub fn header(&self) -> PageHeader {
        PageHeader::from_bytes(&self.data)
    }

    /// Write a page header.
    pub fn set_header(&mut self, header: &PageHeader) {
        header.write_to(&mut self.data);
    }

    /// Compute and store checksum in the header.
    ///
    /// Call this after all modifications to the page are complete.
    pub fn update_checksum(&mut self) {
        let checksum = PageHeader::compute_checksum(&self.data);
        let checksum_bytes = checksum.to_le_bytes();
        self.data[PageHeader::OFFSET_CHECKSUM..PageHeader::OFFSET_CHECKSUM + 4]
            .copy_from_slice(&checksum_bytes);
    }

    /// Verify the page checksum is valid.
    pub fn verify_checksum(&self) -> bool {
        self.header().verify_checksum(&self.data)
    }

    /// Read a little-endian `i32` at `offset`.
    #[inline]
    pub fn read_i32(&self, offset: usize) -> i32 {
        i32::from_le_bytes([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    /// Read a little-endian `u32` at `offset`.
    #[inline]
    pub fn read_u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    /// Write a little-endian `i32` at `offset`.
    #[inline]
    pub fn write_i32(&mut self, offset: usize, value: i32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Write a little-endian `u32` at `offset`.
    #[inline]
    pub fn write_u32(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

// Clone only available in tests - forces explicit copying in production
#[cfg(test)]
impl Clone for Page {
    fn clone(&self) -> Self {
        Page::from_bytes(&self.data)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size() {
        assert_eq!(std::mem::size_of::<Page>(), PAGE_SIZE);
    }

    #[test]
    fn test_page_new() {
        let page = Page::new();
        assert_eq!(page.as_slice()[0], 0);
        assert_eq!(page.as_slice()[PAGE_SIZE - 1], 0);
    }

    #[test]
    fn test_page_read_write() {
        let mut page = Page::new();

        page.as_mut_slice()[0] = 0xFF;
        page.as_mut_slice()[100] = 0xAB;
        page.as_mut_slice()[PAGE_SIZE - 1] = 0xCD;

        assert_eq!(page.as_slice()[0], 0xFF);
        assert_eq!(page.as_slice()[100], 0xAB);
        assert_eq!(page.as_slice()[PAGE_SIZE - 1], 0xCD);
    }

    #[test]
    fn test_page_integer_fields() {
        let mut page = Page::new();

        page.write_i32(8, -2);
        page.write_u32(PAGE_SIZE - 4, u32::MAX);

        assert_eq!(page.read_i32(8), -2);
        assert_eq!(&page.as_slice()[8..12], &[0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(page.read_u32(PAGE_SIZE - 4), u32::MAX);
    }

    #[test]
    fn test_page_checksum_roundtrip() {
        let mut page = Page::new();
        page.write_i32(200, 12345);
        page.update_checksum();
        assert!(page.verify_checksum());

        page.write_i32(200, 12346);
        assert!(!page.verify_checksum());
    }

    #[test]
    fn test_page_from_bytes_copies() {
        let mut page = Page::new();
        page.as_mut_slice()[0] = 0xAB;

        let copy = Page::from_bytes(page.as_bytes());
        page.as_mut_slice()[0] = 0x00;

        assert_eq!(copy.as_slice()[0], 0xAB);
    }
}
