//! Record identifier type.

use std::fmt;

use super::PageId;

/// Locates a record in the heap file that backs the index.
///
/// The node layer stores and returns these verbatim; it never follows them.
///
/// # Layout (8 bytes, little-endian)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     page_id
/// 4       4     slot_id
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    /// Heap page holding the record.
    pub page_id: PageId,
    /// Slot within that heap page.
    pub slot_id: u32,
}

impl RecordId {
    /// Encoded size in bytes.
    pub const SIZE: usize = 8;

    /// Create a new RecordId.
    #[inline]
    pub fn new(page_id: PageId, slot_id: u32) -> Self {
        Self { page_id, slot_id }
    }

    /// Write this id into `data[..8]`.
    ///
    /// # Panics
    /// Panics if `data.len() < RecordId::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        data[0..4].copy_from_slice(&self.page_id.to_le_bytes());
        data[4..8].copy_from_slice(&self.slot_id.to_le_bytes());
    }

    /// Read an id from `data[..8]`.
    ///
    /// # Panics
    /// Panics if `data.len() < RecordId::SIZE`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let page_id = PageId::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let slot_id = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        Self { page_id, slot_id }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rid({}, {})", self.page_id.0, self.slot_id)
    }
}
