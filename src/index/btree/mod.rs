//! B+-tree node layer.
//!
//! Page-sized, in-memory mirrors of the two node kinds:
//! - [`LeafNode`] - sorted `(key, RecordId)` entries plus a next-leaf pointer
//! - [`InternalNode`] - routing keys bracketing child page pointers
//!
//! A driver loads a node with `read`, applies one mutation or lookup, and
//! persists it with `write`. Nodes do no I/O outside those two calls.
//!
//! # Splits
//! Leaf splits *copy up*: the returned separator stays as the sibling's first
//! key. Internal splits *push up*: the returned middle key is removed from
//! both halves. Both halves of either split are flagged split-pending until
//! the driver clears the flag after updating the parent; three separate page
//! writes are involved and nothing here makes them atomic.

mod codec;
mod internal_node;
mod leaf_node;

pub use internal_node::{InternalEntry, InternalNode};
pub use leaf_node::{LeafEntry, LeafNode};
