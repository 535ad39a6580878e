//! The page store interface consumed by the node layer.

use crate::common::{PageId, Result};
use crate::storage::page::Page;

/// Fixed-size block storage that nodes are serialized to and from.
///
/// Implementations assign page identifiers; nodes treat them as opaque.
/// Failures are returned as-is and the node layer passes them up unchanged.
pub trait PageStore {
    /// Read the full contents of a page.
    fn read_page(&mut self, page_id: PageId) -> Result<Page>;

    /// Overwrite a previously allocated page.
    fn write_page(&mut self, page_id: PageId, page: &Page) -> Result<()>;

    /// Allocate a new zeroed page and return its identifier.
    ///
    /// Never hands out [`PageId::INVALID`]; fails with `Error::PageStoreFull`
    /// once every other id is taken.
    fn allocate_page(&mut self) -> Result<PageId>;
}
