//! bplus-node - on-disk node representation for a B+-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        Tree driver (external: root pointer, descent, height)    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               ↓ read / mutate / write
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Node Layer (index/btree/)                     │
//! │   LeafNode: sorted (key, RecordId) + next-leaf pointer          │
//! │   InternalNode: pid0, key1, pid1, ..., keyN, pidN               │
//! │   insert · insert_and_split · locate · locate_child_ptr         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               ↓ Page (1KB)
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Storage Layer (storage/)                      │
//! │   PageStore trait · DiskManager · MemoryPageStore · PageHeader  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, RecordId, Error, config)
//! - [`storage`] - Page stores and page formats
//! - [`index`] - B+-tree nodes
//!
//! # Quick Start
//! ```
//! use bplus_node::{LeafNode, MemoryPageStore, PageId, PageStore, RecordId};
//!
//! let mut store = MemoryPageStore::new();
//! let pid = store.allocate_page().unwrap();
//!
//! let mut leaf = LeafNode::new();
//! leaf.insert(42, RecordId::new(PageId::new(7), 0)).unwrap();
//! leaf.write(pid, &mut store).unwrap();
//!
//! let mut loaded = LeafNode::new();
//! loaded.read(pid, &mut store).unwrap();
//! assert_eq!(loaded.locate(40).unwrap(), 0);
//! ```

pub mod common;
pub mod index;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{INTERNAL_MAX_KEYS, LEAF_MAX_KEYS, PAGE_SIZE};
pub use common::{Error, Key, PageId, RecordId, Result};

pub use index::btree::{InternalEntry, InternalNode, LeafEntry, LeafNode};
pub use storage::page::{Page, PageHeader, PageType};
pub use storage::{DiskManager, MemoryPageStore, PageStore};
