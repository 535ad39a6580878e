//! Page header and type definitions.
//!
//! Every node page starts with a [`PageHeader`] containing metadata:
//! - [`PageType`] discriminator
//! - flags (split pending)
//! - persisted key count
//! - CRC32 checksum for integrity

/// Type of node stored in a page.
///
/// Uses `#[repr(u8)]` to guarantee a 1-byte representation for serialization.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    /// Uninitialized or corrupted page.
    #[default]
    Invalid = 0,
    /// B+-tree internal (routing) node.
    BTreeInternal = 1,
    /// B+-tree leaf node.
    BTreeLeaf = 2,
}

impl PageType {
    /// Convert from u8, returning Invalid for unknown values.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => PageType::BTreeInternal,
            2 => PageType::BTreeLeaf,
            _ => PageType::Invalid,
        }
    }
}

/// Metadata stored at the beginning of every node page.
///
/// # Layout (8 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       1     page_type (PageType as u8)
/// 1       1     flags (bit 0: split pending)
/// 2       2     key_count (little-endian)
/// 4       4     checksum (CRC32, little-endian)
/// ```
///
/// # Checksum
/// The checksum is computed over the entire page with the checksum field
/// itself set to zero. This allows verification without special handling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    /// Type of this page.
    pub page_type: PageType,
    /// Bit flags, see [`PageHeader::FLAG_SPLIT_PENDING`].
    pub flags: u8,
    /// Number of live keys in the node body.
    pub key_count: u16,
    /// CRC32 checksum of the page contents.
    pub checksum: u32,
}

impl PageHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    /// Offset of each field within the header.
    pub const OFFSET_PAGE_TYPE: usize = 0;
    pub const OFFSET_FLAGS: usize = 1;
    pub const OFFSET_KEY_COUNT: usize = 2;
    pub const OFFSET_CHECKSUM: usize = 4;

    /// Set on both halves of a split until the driver has written the
    /// separator into the parent.
    pub const FLAG_SPLIT_PENDING: u8 = 0b0000_0001;

    /// Create a new header with the given page type.
    ///
    /// Flags, key count and checksum are initialized to zero.
    pub fn new(page_type: PageType) -> Self {
        Self {
            page_type,
            flags: 0,
            key_count: 0,
            checksum: 0,
        }
    }

    /// Whether the split-pending flag is set.
    #[inline]
    pub fn split_pending(&self) -> bool {
        self.flags & Self::FLAG_SPLIT_PENDING != 0
    }

    /// Read a header from the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < PageHeader::SIZE`.
    pub fn from_bytes(data: &[u8]) -> Self {
        assert!(data.len() >= Self::SIZE, "buffer too small for PageHeader");

        let page_type = PageType::from_u8(data[Self::OFFSET_PAGE_TYPE]);
        let flags = data[Self::OFFSET_FLAGS];

        let key_count = u16::from_le_bytes([
            data[Self::OFFSET_KEY_COUNT],
            data[Self::OFFSET_KEY_COUNT + 1],
        ]);

        let checksum = u32::from_le_bytes([
            data[Self::OFFSET_CHECKSUM],
            data[Self::OFFSET_CHECKSUM + 1],
            data[Self::OFFSET_CHECKSUM + 2],
            data[Self::OFFSET_CHECKSUM + 3],
        ]);

        Self {
            page_type,
            flags,
            key_count,
            checksum,
        }
    }

    /// Write this header to the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < PageHeader::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for PageHeader");

        data[Self::OFFSET_PAGE_TYPE] = self.page_type as u8;
        data[Self::OFFSET_FLAGS] = self.flags;

        let count_bytes = self.key_count.to_le_bytes();
        data[Self::OFFSET_KEY_COUNT..Self::OFFSET_KEY_COUNT + 2].copy_from_slice(&count_bytes);

        let checksum_bytes = self.checksum.to_le_bytes();
        data[Self::OFFSET_CHECKSUM..Self::OFFSET_CHECKSUM + 4].copy_from_slice(&checksum_bytes);
    }

    /// Compute CRC32 checksum of a page.
    ///
    /// The checksum is computed with the checksum field (bytes 4-7) zeroed out,
    /// so the checksum doesn't include itself.
    pub fn compute_checksum(page_data: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();

        // Type, flags and key count
        hasher.update(&page_data[..Self::OFFSET_CHECKSUM]);

        // Skip checksum field by feeding zeros instead
        hasher.update(&[0u8; 4]);

        // Node body
        hasher.update(&page_data[Self::OFFSET_CHECKSUM + 4..]);

        hasher.finalize()
    }

    /// Verify that the stored checksum matches the computed checksum.
    pub fn verify_checksum(&self, page_data: &[u8]) -> bool {
        self.checksum == Self::compute_checksum(page_data)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::PAGE_SIZE;

    // --- PageType tests ---

    #[test]
    fn test_page_type_from_u8() {
        assert_eq!(PageType::from_u8(0), PageType::Invalid);
        assert_eq!(PageType::from_u8(1), PageType::BTreeInternal);
        assert_eq!(PageType::from_u8(2), PageType::BTreeLeaf);
        assert_eq!(PageType::from_u8(255), PageType::Invalid);
    }

    #[test]
    fn test_page_type_default() {
        assert_eq!(PageType::default(), PageType::Invalid);
    }

    // --- PageHeader tests ---

    #[test]
    fn test_page_header_new() {
        let header = PageHeader::new(PageType::BTreeLeaf);
        assert_eq!(header.page_type, PageType::BTreeLeaf);
        assert_eq!(header.flags, 0);
        assert_eq!(header.key_count, 0);
        assert_eq!(header.checksum, 0);
        assert!(!header.split_pending());
    }

    #[test]
    fn test_page_header_roundtrip() {
        let original = PageHeader {
            page_type: PageType::BTreeInternal,
            flags: PageHeader::FLAG_SPLIT_PENDING,
            key_count: 126,
            checksum: 0xDEADBEEF,
        };

        let mut buffer = [0u8; PageHeader::SIZE];
        original.write_to(&mut buffer);

        let recovered = PageHeader::from_bytes(&buffer);
        assert_eq!(original, recovered);
        assert!(recovered.split_pending());
    }

    #[test]
    fn test_page_header_byte_layout() {
        let header = PageHeader {
            page_type: PageType::BTreeLeaf,
            flags: 0,
            key_count: 0x0201,    // Little-endian: 01 02
            checksum: 0x04030201, // Little-endian: 01 02 03 04
        };

        let mut buffer = [0u8; PageHeader::SIZE];
        header.write_to(&mut buffer);

        assert_eq!(buffer[0], 2); // PageType::BTreeLeaf
        assert_eq!(buffer[1], 0);
        assert_eq!(buffer[2], 0x01); // key_count LSB
        assert_eq!(buffer[3], 0x02);
        assert_eq!(buffer[4], 0x01); // checksum LSB
        assert_eq!(buffer[7], 0x04); // checksum MSB
    }

    // --- Checksum tests ---

    #[test]
    fn test_checksum_changes_with_data() {
        let mut page1 = [0u8; PAGE_SIZE];
        let mut page2 = [0u8; PAGE_SIZE];

        page1[500] = 0xFF;
        page2[500] = 0xFE;

        assert_ne!(
            PageHeader::compute_checksum(&page1),
            PageHeader::compute_checksum(&page2)
        );
    }

    #[test]
    fn test_checksum_covers_key_count() {
        let mut page = [0u8; PAGE_SIZE];
        let before = PageHeader::compute_checksum(&page);

        page[PageHeader::OFFSET_KEY_COUNT] = 1;
        assert_ne!(before, PageHeader::compute_checksum(&page));
    }

    #[test]
    fn test_checksum_ignores_checksum_field() {
        let mut page_data = [0u8; PAGE_SIZE];
        page_data[100] = 0xAB;

        let checksum1 = PageHeader::compute_checksum(&page_data);

        page_data[4..8].copy_from_slice(&[0xFF; 4]);

        let checksum2 = PageHeader::compute_checksum(&page_data);

        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_checksum_verify() {
        let mut page_data = [0u8; PAGE_SIZE];
        page_data[100] = 0xAB;

        let checksum = PageHeader::compute_checksum(&page_data);
        let header = PageHeader {
            checksum,
            ..PageHeader::new(PageType::BTreeLeaf)
        };

        assert!(header.verify_checksum(&page_data));

        // Corrupt the page
        page_data[100] = 0xFF;
        assert!(!header.verify_checksum(&page_data));
    }
}
