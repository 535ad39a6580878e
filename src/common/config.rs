//! Configuration constants for the node layer.

/// Size of a page in bytes (1KB).
///
/// Every leaf and internal node occupies exactly one page.
///
/// # Memory Layout
/// With 1KB pages and 32-bit PageIds:
/// - Max pages: 2^32 = 4,294,967,296 pages
/// - Max index file size: 4,294,967,296 × 1KB = 4TB
pub const PAGE_SIZE: usize = 1024;

/// Maximum number of pages with u32 PageId.
pub const MAX_PAGES: u64 = (u32::MAX as u64) + 1;

/// Maximum theoretical index file size in bytes.
pub const MAX_DB_SIZE_BYTES: u64 = MAX_PAGES * PAGE_SIZE as u64;

/// Size of the header at the start of every node page.
pub const NODE_HEADER_SIZE: usize = 8;

/// Bytes of one leaf entry: key (4) + record page id (4) + record slot id (4).
pub const LEAF_ENTRY_SIZE: usize = 12;

/// Bytes reserved at the end of a leaf page for the next-leaf pointer.
pub const LEAF_NEXT_PTR_SIZE: usize = 4;

/// Maximum number of (key, RecordId) entries in one leaf page.
pub const LEAF_MAX_KEYS: usize =
    (PAGE_SIZE - NODE_HEADER_SIZE - LEAF_NEXT_PTR_SIZE) / LEAF_ENTRY_SIZE;

/// Maximum number of routing keys in one internal page.
///
/// The body holds `pid0` followed by `(key, pid)` pairs of 8 bytes each.
pub const INTERNAL_MAX_KEYS: usize = (PAGE_SIZE - NODE_HEADER_SIZE - 4) / 8;

/// Maximum number of child pointers in one internal page.
pub const INTERNAL_MAX_CHILDREN: usize = INTERNAL_MAX_KEYS + 1;
