//! B+-tree leaf node.
//!
//! A [`LeafNode`] holds sorted `(key, RecordId)` entries and a pointer to the
//! next leaf, so that range scans can walk leaves left to right without
//! descending the tree again.

use heapless::Vec as FixedVec;
use tracing::{debug, trace};

use crate::common::config::{
    LEAF_ENTRY_SIZE, LEAF_MAX_KEYS, LEAF_NEXT_PTR_SIZE, NODE_HEADER_SIZE, PAGE_SIZE,
};
use crate::common::{Error, Key, PageId, RecordId, Result};
use crate::storage::page::{Page, PageType};
use crate::storage::PageStore;

use super::codec;

/// One `(key, RecordId)` pair stored in a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafEntry {
    pub key: Key,
    pub rid: RecordId,
}

/// In-memory mirror of a leaf page.
///
/// # Page Layout
/// ```text
/// ┌────────┬─────────────────────────────────────┬──────────┬──────────┐
/// │ Header │ key │ rid.page │ rid.slot │ ... ×N  │  (free)  │ next pid │
/// │ 8B     │ 4B  │ 4B       │ 4B       │         │          │ 4B       │
/// └────────┴─────────────────────────────────────┴──────────┴──────────┘
/// Offset:  0       8                                                1020
/// ```
///
/// Entries are kept sorted by key. Equal keys keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    entries: FixedVec<LeafEntry, LEAF_MAX_KEYS>,
    next: PageId,
    split_pending: bool,
}

impl LeafNode {
    /// Offset of the next-leaf pointer.
    const NEXT_PTR_OFFSET: usize = PAGE_SIZE - LEAF_NEXT_PTR_SIZE;

    /// Create an empty leaf with no next leaf.
    pub fn new() -> Self {
        Self {
            entries: FixedVec::new(),
            next: PageId::INVALID,
            split_pending: false,
        }
    }

    // ========================================================================
    // Page I/O
    // ========================================================================

    /// Load this node from `page_id`.
    ///
    /// On error the node keeps its previous contents.
    pub fn read<S: PageStore>(&mut self, page_id: PageId, store: &mut S) -> Result<()> {
        let page = store.read_page(page_id)?;
        *self = Self::from_page(page_id, &page)?;
        trace!(page_id = page_id.0, key_count = self.key_count(), "loaded leaf");
        Ok(())
    }

    /// Persist this node to `page_id`.
    pub fn write<S: PageStore>(&self, page_id: PageId, store: &mut S) -> Result<()> {
        store.write_page(page_id, &self.to_page())?;
        trace!(page_id = page_id.0, key_count = self.key_count(), "stored leaf");
        Ok(())
    }

    /// Decode a leaf from a raw page.
    ///
    /// `page_id` is only used to label errors.
    pub fn from_page(page_id: PageId, page: &Page) -> Result<Self> {
        let header = codec::read_header(page_id, page, PageType::BTreeLeaf, LEAF_MAX_KEYS)?;

        let mut entries: FixedVec<LeafEntry, LEAF_MAX_KEYS> = FixedVec::new();
        for i in 0..header.key_count as usize {
            let offset = Self::entry_offset(i);
            let entry = LeafEntry {
                key: page.read_i32(offset),
                rid: RecordId::from_bytes(&page.as_slice()[offset + 4..offset + LEAF_ENTRY_SIZE]),
            };
            if entries.last().is_some_and(|prev| prev.key > entry.key) {
                return Err(codec::unsorted(page_id));
            }
            entries.push(entry).map_err(|_| Error::NodeFull {
                capacity: LEAF_MAX_KEYS,
            })?;
        }

        Ok(Self {
            entries,
            next: PageId::new(page.read_u32(Self::NEXT_PTR_OFFSET)),
            split_pending: header.split_pending(),
        })
    }

    /// Encode this leaf into a fresh page, checksum included.
    pub fn to_page(&self) -> Page {
        let mut page = Page::new();
        codec::write_header(&mut page, PageType::BTreeLeaf, self.entries.len(), self.split_pending);

        for (i, entry) in self.entries.iter().enumerate() {
            let offset = Self::entry_offset(i);
            page.write_i32(offset, entry.key);
            entry
                .rid
                .write_to(&mut page.as_mut_slice()[offset + 4..offset + LEAF_ENTRY_SIZE]);
        }
        page.write_u32(Self::NEXT_PTR_OFFSET, self.next.0);

        page.update_checksum();
        page
    }

    #[inline]
    fn entry_offset(eid: usize) -> usize {
        NODE_HEADER_SIZE + eid * LEAF_ENTRY_SIZE
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of live entries.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Maximum number of entries a leaf page holds.
    #[inline]
    pub const fn capacity() -> usize {
        LEAF_MAX_KEYS
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Read the entry at position `eid`.
    ///
    /// # Errors
    /// `Error::IndexOutOfRange` if `eid >= key_count()`.
    pub fn read_entry(&self, eid: usize) -> Result<(Key, RecordId)> {
        self.entries
            .get(eid)
            .map(|e| (e.key, e.rid))
            .ok_or(Error::IndexOutOfRange {
                index: eid,
                count: self.entries.len(),
            })
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> std::slice::Iter<'_, LeafEntry> {
        self.entries.iter()
    }

    /// Page id of the next leaf, or [`PageId::INVALID`] for the last leaf.
    #[inline]
    pub fn next_node_ptr(&self) -> PageId {
        self.next
    }

    #[inline]
    pub fn set_next_node_ptr(&mut self, page_id: PageId) {
        self.next = page_id;
    }

    /// Whether this leaf took part in a split the driver has not finished.
    #[inline]
    pub fn is_split_pending(&self) -> bool {
        self.split_pending
    }

    /// Mark the split finished once the parent holds the separator.
    #[inline]
    pub fn clear_split_pending(&mut self) {
        self.split_pending = false;
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Find the first entry whose key is `>= search_key`.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if every key is smaller or the leaf is empty.
    pub fn locate(&self, search_key: Key) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.key >= search_key)
            .ok_or(Error::KeyNotFound(search_key))
    }

    /// Slot a new key goes into: after every entry with a key `<= key`.
    fn insertion_point(&self, key: Key) -> usize {
        self.entries
            .iter()
            .position(|e| e.key > key)
            .unwrap_or(self.entries.len())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `(key, rid)` keeping entries sorted.
    ///
    /// A key equal to existing keys goes after them, so equal keys keep their
    /// insertion order and `locate` finds the earliest one first.
    ///
    /// # Errors
    /// `Error::NodeFull` if the leaf already holds [`LeafNode::capacity`] entries.
    pub fn insert(&mut self, key: Key, rid: RecordId) -> Result<()> {
        if self.is_full() {
            return Err(Error::NodeFull {
                capacity: LEAF_MAX_KEYS,
            });
        }

        let eid = self.insertion_point(key);
        self.entries
            .insert(eid, LeafEntry { key, rid })
            .map_err(|_| Error::NodeFull {
                capacity: LEAF_MAX_KEYS,
            })?;

        trace!(key, eid, key_count = self.entries.len(), "leaf insert");
        Ok(())
    }

    /// Insert `(key, rid)` and move the upper half of the entries to `sibling`.
    ///
    /// Of the `key_count() + 1` entries, `sibling` receives the larger
    /// `ceil` half and this node keeps the rest. The leaf chain is relinked
    /// as `self -> sibling -> old next`, so `sibling_page_id` must already be
    /// allocated. Returns the first key of `sibling`, which stays in the
    /// sibling and is copied into the parent.
    ///
    /// # Errors
    /// `Error::SiblingNotEmpty` if `sibling` holds entries.
    pub fn insert_and_split(
        &mut self,
        key: Key,
        rid: RecordId,
        sibling: &mut LeafNode,
        sibling_page_id: PageId,
    ) -> Result<Key> {
        if sibling.key_count() != 0 {
            return Err(Error::SiblingNotEmpty);
        }

        let mut combined: Vec<LeafEntry> = Vec::with_capacity(self.entries.len() + 1);
        combined.extend_from_slice(&self.entries);
        combined.insert(self.insertion_point(key), LeafEntry { key, rid });

        let keep = combined.len() / 2;
        let full = |_| Error::NodeFull {
            capacity: LEAF_MAX_KEYS,
        };
        let left = FixedVec::from_slice(&combined[..keep]).map_err(full)?;
        let right: FixedVec<LeafEntry, LEAF_MAX_KEYS> =
            FixedVec::from_slice(&combined[keep..]).map_err(full)?;
        let sibling_key = right[0].key;

        sibling.entries = right;
        sibling.next = self.next;
        sibling.split_pending = true;

        self.entries = left;
        self.next = sibling_page_id;
        self.split_pending = true;

        debug!(
            key,
            sibling_key,
            left = self.entries.len(),
            right = sibling.entries.len(),
            sibling_page = sibling_page_id.0,
            "leaf split"
        );
        Ok(sibling_key)
    }
}

impl Default for LeafNode {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
