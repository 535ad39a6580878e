//! Page identifier type.

use std::fmt;

/// Identifies a page in the page store.
///
/// Values are assigned by the page store and are otherwise opaque to the
/// node layer. A leaf stores one as its next-leaf pointer; an internal node
/// stores one per child.
///
/// # Example
/// ```
/// use bplus_node::PageId;
///
/// let page_id = PageId::new(42);
/// assert!(page_id.is_valid());
/// assert_eq!(page_id.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Invalid/sentinel page ID.
    ///
    /// Terminates the leaf chain and marks an unset child slot.
    pub const INVALID: PageId = PageId(u32::MAX);

    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }

    /// Check if this page ID is valid (not the sentinel value).
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Little-endian on-page encoding.
    #[inline]
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode from the little-endian on-page encoding.
    #[inline]
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        PageId(u32::from_le_bytes(bytes))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "Page(INVALID)")
        } else {
            write!(f, "Page({})", self.0)
        }
    }
}
