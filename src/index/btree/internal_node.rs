//! B+-tree internal (routing) node.

use heapless::Vec as FixedVec;
use tracing::{debug, trace};

use crate::common::config::{INTERNAL_MAX_KEYS, NODE_HEADER_SIZE};
use crate::common::{Error, Key, PageId, Result};
use crate::storage::page::{Page, PageType};
use crate::storage::PageStore;

use super::codec;

/// A routing key paired with the child to its right.
///
/// Every key `K` in the subtree under `child` satisfies `key <= K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalEntry {
    pub key: Key,
    pub child: PageId,
}

/// In-memory mirror of an internal page.
///
/// N keys bracket N+1 children: `pid0, key1, pid1, ..., keyN, pidN`.
/// `pid0` is held separately and the `(key_i, pid_i)` pairs move as units,
/// so the child count is always `key_count() + 1`.
///
/// # Page Layout
/// ```text
/// ┌────────┬──────┬──────┬──────┬──────┬──────┬─────┐
/// │ Header │ pid0 │ key1 │ pid1 │ key2 │ pid2 │ ... │
/// │ 8B     │ 4B   │ 4B   │ 4B   │ 4B   │ 4B   │     │
/// └────────┴──────┴──────┴──────┴──────┴──────┴─────┘
/// ```
///
/// A fresh node has no keys and `pid0 == PageId::INVALID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNode {
    first_child: PageId,
    entries: FixedVec<InternalEntry, INTERNAL_MAX_KEYS>,
    split_pending: bool,
}

impl InternalNode {
    const FIRST_CHILD_OFFSET: usize = NODE_HEADER_SIZE;

    /// Create an empty node with no children.
    pub fn new() -> Self {
        Self {
            first_child: PageId::INVALID,
            entries: FixedVec::new(),
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
        trace!(page_id = page_id.0, key_count = self.key_count(), "loaded internal node");
        Ok(())
    }

    /// Persist this node to `page_id`.
    pub fn write<S: PageStore>(&self, page_id: PageId, store: &mut S) -> Result<()> {
        store.write_page(page_id, &self.to_page())?;
        trace!(page_id = page_id.0, key_count = self.key_count(), "stored internal node");
        Ok(())
    }

    /// Decode an internal node from a raw page.
    pub fn from_page(page_id: PageId, page: &Page) -> Result<Self> {
        let header = codec::read_header(page_id, page, PageType::BTreeInternal, INTERNAL_MAX_KEYS)?;

        let mut entries: FixedVec<InternalEntry, INTERNAL_MAX_KEYS> = FixedVec::new();
        for i in 0..header.key_count as usize {
            let offset = Self::entry_offset(i);
            let entry = InternalEntry {
                key: page.read_i32(offset),
                child: PageId::new(page.read_u32(offset + 4)),
            };
            if entries.last().is_some_and(|prev| prev.key > entry.key) {
                return Err(codec::unsorted(page_id));
            }
            entries.push(entry).map_err(|_| Error::NodeFull {
                capacity: INTERNAL_MAX_KEYS,
            })?;
        }

        Ok(Self {
            first_child: PageId::new(page.read_u32(Self::FIRST_CHILD_OFFSET)),
            entries,
            split_pending: header.split_pending(),
        })
    }

    /// Encode this node into a fresh page, checksum included.
    pub fn to_page(&self) -> Page {
        let mut page = Page::new();
        codec::write_header(
            &mut page,
            PageType::BTreeInternal,
            self.entries.len(),
            self.split_pending,
        );

        page.write_u32(Self::FIRST_CHILD_OFFSET, self.first_child.0);
        for (i, entry) in self.entries.iter().enumerate() {
            let offset = Self::entry_offset(i);
            page.write_i32(offset, entry.key);
            page.write_u32(offset + 4, entry.child.0);
        }

        page.update_checksum();
        page
    }

    /// Offset of the i-th `(key, child)` pair.
    #[inline]
    fn entry_offset(i: usize) -> usize {
        Self::FIRST_CHILD_OFFSET + 4 + i * 8
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of routing keys.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub const fn capacity() -> usize {
        INTERNAL_MAX_KEYS
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Routing key at position `i` (0-based, so `key_at(0)` is `key1`).
    pub fn key_at(&self, i: usize) -> Result<Key> {
        self.entries
            .get(i)
            .map(|e| e.key)
            .ok_or(Error::IndexOutOfRange {
                index: i,
                count: self.entries.len(),
            })
    }

    /// Child pointer at position `i`, for `i` in `[0, key_count()]`.
    pub fn child_at(&self, i: usize) -> Result<PageId> {
        match i {
            0 => Ok(self.first_child),
            _ => self
                .entries
                .get(i - 1)
                .map(|e| e.child)
                .ok_or(Error::IndexOutOfRange {
                    index: i,
                    count: self.entries.len() + 1,
                }),
        }
    }

    #[inline]
    pub fn is_split_pending(&self) -> bool {
        self.split_pending
    }

    #[inline]
    pub fn clear_split_pending(&mut self) {
        self.split_pending = false;
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Position of the child whose range holds `search_key`.
    ///
    /// This is the first `i` with `search_key < key_{i+1}`, or `key_count()`
    /// when `search_key` is at least the largest key.
    pub fn locate_child_index(&self, search_key: Key) -> usize {
        self.entries
            .iter()
            .position(|e| search_key < e.key)
            .unwrap_or(self.entries.len())
    }

    /// Child pointer to follow for `search_key`.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if the selected child slot was never set, as in a
    /// fresh node.
    pub fn locate_child_ptr(&self, search_key: Key) -> Result<PageId> {
        let child = self.child_at(self.locate_child_index(search_key))?;
        if !child.is_valid() {
            return Err(Error::KeyNotFound(search_key));
        }
        Ok(child)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Make this node a root with two children separated by `key`.
    ///
    /// Any previous contents are discarded.
    pub fn initialize_root(&mut self, left: PageId, key: Key, right: PageId) -> Result<()> {
        let mut entries: FixedVec<InternalEntry, INTERNAL_MAX_KEYS> = FixedVec::new();
        entries
            .push(InternalEntry { key, child: right })
            .map_err(|_| Error::NodeFull {
                capacity: INTERNAL_MAX_KEYS,
            })?;

        self.first_child = left;
        self.entries = entries;
        self.split_pending = false;

        debug!(left = left.0, key, right = right.0, "initialized root");
        Ok(())
    }

    /// Insert `key` with `child` as its right-hand pointer.
    ///
    /// # Errors
    /// `Error::NodeFull` if the node already holds [`InternalNode::capacity`] keys.
    pub fn insert(&mut self, key: Key, child: PageId) -> Result<()> {
        if self.is_full() {
            return Err(Error::NodeFull {
                capacity: INTERNAL_MAX_KEYS,
            });
        }

        let pos = self.insertion_point(key);
        self.entries
            .insert(pos, InternalEntry { key, child })
            .map_err(|_| Error::NodeFull {
                capacity: INTERNAL_MAX_KEYS,
            })?;

        trace!(key, child = child.0, pos, "internal insert");
        Ok(())
    }

    /// Insert `(key, child)` and move the upper half to `sibling`.
    ///
    /// Of the `key_count() + 1` keys, the middle one is returned and appears
    /// in neither node; the parent takes it. This node keeps the keys left
    /// of it along with their children. `sibling` gets the keys right of it,
    /// with the child that followed the middle key as its first child.
    ///
    /// # Errors
    /// - `Error::SiblingNotEmpty` if `sibling` holds keys
    /// - `Error::SplitTooSmall` if this node has fewer than 2 keys
    pub fn insert_and_split(
        &mut self,
        key: Key,
        child: PageId,
        sibling: &mut InternalNode,
    ) -> Result<Key> {
        if sibling.key_count() != 0 {
            return Err(Error::SiblingNotEmpty);
        }
        if self.entries.len() < 2 {
            return Err(Error::SplitTooSmall {
                key_count: self.entries.len(),
            });
        }

        let mut combined: Vec<InternalEntry> = Vec::with_capacity(self.entries.len() + 1);
        combined.extend_from_slice(&self.entries);
        combined.insert(self.insertion_point(key), InternalEntry { key, child });

        let mid = combined.len() / 2;
        let promoted = combined[mid];

        let full = |_| Error::NodeFull {
            capacity: INTERNAL_MAX_KEYS,
        };
        let left = FixedVec::from_slice(&combined[..mid]).map_err(full)?;
        let right = FixedVec::from_slice(&combined[mid + 1..]).map_err(full)?;

        sibling.first_child = promoted.child;
        sibling.entries = right;
        sibling.split_pending = true;

        self.entries = left;
        self.split_pending = true;

        debug!(
            key,
            mid_key = promoted.key,
            left = self.entries.len(),
            right = sibling.entries.len(),
            "internal split"
        );
        Ok(promoted.key)
    }

    /// Slot a new key goes into: after every key `<= key`.
    fn insertion_point(&self, key: Key) -> usize {
        self.entries
            .iter()
            .position(|e| e.key > key)
            .unwrap_or(self.entries.len())
    }
}

impl Default for InternalNode {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
