//! Error types for the B+-tree node layer.

use thiserror::Error;

use crate::storage::page::PageType;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the node layer.
///
/// Node operations validate before they mutate, so any error returned by a
/// single-node operation means the node was left exactly as it was.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the page store, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested page does not exist in the page store.
    #[error("Page {0} not found")]
    PageNotFound(u32),

    /// Every assignable page id is in use; the next one would be the sentinel.
    #[error("Page store is full ({0} pages)")]
    PageStoreFull(u32),

    /// Insert attempted against a node already holding `capacity` keys.
    #[error("Node is full ({capacity} keys)")]
    NodeFull { capacity: usize },

    /// Positional access outside `[0, count)`.
    #[error("Entry index {index} out of range (key count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// No entry or child satisfies the search key.
    #[error("No entry for search key {0}")]
    KeyNotFound(i32),

    /// The sibling handed to a split already holds entries.
    #[error("Split sibling must be empty")]
    SiblingNotEmpty,

    /// An internal node needs at least two keys before it can be split.
    #[error("Internal node with {key_count} keys is too small to split")]
    SplitTooSmall { key_count: usize },

    /// The page does not hold the node kind being decoded.
    #[error("Page {page_id} has type {found:?}, expected {expected:?}")]
    PageTypeMismatch {
        page_id: u32,
        expected: PageType,
        found: PageType,
    },

    /// Stored CRC32 does not match the page contents.
    #[error("Checksum mismatch on page {0}")]
    ChecksumMismatch(u32),

    /// The page decoded but its contents break a structural invariant.
    #[error("Page {page_id} corrupted: {reason}")]
    PageCorrupted { page_id: u32, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotFound(42);
        assert_eq!(format!("{}", err), "Page 42 not found");

        let err = Error::NodeFull { capacity: 84 };
        assert_eq!(format!("{}", err), "Node is full (84 keys)");

        let err = Error::PageStoreFull(u32::MAX);
        assert_eq!(format!("{}", err), "Page store is full (4294967295 pages)");

        let err = Error::IndexOutOfRange { index: 7, count: 3 };
        assert_eq!(
            format!("{}", err),
            "Entry index 7 out of range (key count 3)"
        );
    }

    #[test]
    fn test_page_type_mismatch_display() {
        let err = Error::PageTypeMismatch {
            page_id: 3,
            expected: PageType::BTreeLeaf,
            found: PageType::BTreeInternal,
        };
        assert_eq!(
            format!("{}", err),
            "Page 3 has type BTreeInternal, expected BTreeLeaf"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_source_preserved() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = Error::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
