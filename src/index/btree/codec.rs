//! Header encode/decode shared by both node kinds.

use tracing::warn;

use crate::common::{Error, PageId, Result};
use crate::storage::page::{Page, PageHeader, PageType};

/// Write a fresh header for a node page. The checksum is filled in later by
/// [`Page::update_checksum`] once the body is encoded.
pub(crate) fn write_header(page: &mut Page, page_type: PageType, key_count: usize, split_pending: bool) {
    let mut header = PageHeader::new(page_type);
    // Capacities are far below u16::MAX
    header.key_count = key_count as u16;
    if split_pending {
        header.flags |= PageHeader::FLAG_SPLIT_PENDING;
    }
    page.set_header(&header);
}

/// Validate a node page header before its body is decoded.
///
/// Checks, in order: page type, checksum, key count against `capacity`.
pub(crate) fn read_header(
    page_id: PageId,
    page: &Page,
    expected: PageType,
    capacity: usize,
) -> Result<PageHeader> {
    let header = page.header();

    if header.page_type != expected {
        warn!(page_id = page_id.0, found = ?header.page_type, expected = ?expected, "rejected page with wrong type");
        return Err(Error::PageTypeMismatch {
            page_id: page_id.0,
            expected,
            found: header.page_type,
        });
    }

    if !page.verify_checksum() {
        warn!(page_id = page_id.0, "rejected page with bad checksum");
        return Err(Error::ChecksumMismatch(page_id.0));
    }

    if header.key_count as usize > capacity {
        return Err(Error::PageCorrupted {
            page_id: page_id.0,
            reason: format!("key count {} exceeds capacity {}", header.key_count, capacity),
        });
    }

    Ok(header)
}

/// Error for a body whose keys are not in ascending order.
pub(crate) fn unsorted(page_id: PageId) -> Error {
    Error::PageCorrupted {
        page_id: page_id.0,
        reason: "keys out of order".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sealed_page(page_type: PageType, key_count: usize) -> Page {
        let mut page = Page::new();
        write_header(&mut page, page_type, key_count, false);
        page.update_checksum();
        page
    }

    #[test]
    fn test_header_accepts_valid_page() {
        let page = sealed_page(PageType::BTreeLeaf, 3);
        let header = read_header(PageId::new(1), &page, PageType::BTreeLeaf, 84).unwrap();
        assert_eq!(header.key_count, 3);
        assert!(!header.split_pending());
    }

    #[test]
    fn test_header_split_pending_flag() {
        let mut page = Page::new();
        write_header(&mut page, PageType::BTreeInternal, 0, true);
        page.update_checksum();

        let header = read_header(PageId::new(0), &page, PageType::BTreeInternal, 126).unwrap();
        assert!(header.split_pending());
    }

    #[test]
    fn test_header_rejects_zeroed_page() {
        let page = Page::new();
        let err = read_header(PageId::new(9), &page, PageType::BTreeLeaf, 84).unwrap_err();
        assert!(matches!(
            err,
            Error::PageTypeMismatch {
                page_id: 9,
                found: PageType::Invalid,
                ..
            }
        ));
    }

    #[test]
    fn test_header_rejects_bad_checksum() {
        let mut page = sealed_page(PageType::BTreeLeaf, 0);
        page.as_mut_slice()[500] ^= 0xFF;

        let err = read_header(PageId::new(2), &page, PageType::BTreeLeaf, 84).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch(2)));
    }

    #[test]
    fn test_header_rejects_oversized_count() {
        let page = sealed_page(PageType::BTreeLeaf, 85);
        let err = read_header(PageId::new(4), &page, PageType::BTreeLeaf, 84).unwrap_err();
        assert!(matches!(err, Error::PageCorrupted { page_id: 4, .. }));
    }
}
