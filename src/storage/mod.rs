//! Storage layer - page stores and the raw page format.
//!
//! This module handles persistent storage:
//! - [`PageStore`] - The interface nodes read and write through
//! - [`DiskManager`] - File-backed page store
//! - [`MemoryPageStore`] - In-memory page store
//! - [`page`] - Page buffer and header layout

mod disk_manager;
mod memory_store;
pub mod page;
mod page_store;

pub use disk_manager::DiskManager;
pub use memory_store::MemoryPageStore;
pub use page_store::PageStore;
