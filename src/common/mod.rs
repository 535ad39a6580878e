//! Common types and utilities shared across the node layer.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and derived node capacities
//! - Error types
//! - Identifiers (PageId, RecordId)

pub mod config;
pub mod error;
mod page_id;
mod record_id;

pub use error::{Error, Result};
pub use page_id::PageId;
pub use record_id::RecordId;

/// Index key type. Only fixed-width 32-bit integer keys are supported.
pub type Key = i32;
