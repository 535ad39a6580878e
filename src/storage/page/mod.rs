//! Page types and layout.
//!
//! This module contains:
//! - [`Page`] - The raw 1KB data container
//! - [`PageHeader`] - Metadata at the start of every node page
//! - [`PageType`] - Discriminator for leaf and internal pages

#[allow(clippy::module_inception)]
mod page;
mod page_header;

pub use page::Page;
pub use page_header::{PageHeader, PageType};
