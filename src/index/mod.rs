//! Index structures.
//!
//! - [`btree`] - B+-tree leaf and internal nodes

pub mod btree;
