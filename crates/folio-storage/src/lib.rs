//! Page records and storage abstraction for Folio.
//!
//! This crate provides:
//! - [`Page`]: the immutable page record, with [`PageStatus`] and [`ContentFormat`]
//! - [`PageStore`]: the seam to the host's persistent storage
//! - [`MemoryStore`]: an in-memory implementation for tests and previews
//! - [`page_from_document`]: pages imported from standalone HTML documents
//!
//! Slug uniqueness is a storage concern; [`MemoryStore`] rejects duplicate
//! slugs on insert.

mod document;
mod memory;
mod page;
mod storage;

pub use document::{TitleSource, page_from_document};
pub use memory::MemoryStore;
pub use page::{ContentFormat, Page, PageStatus, PageSummary, navigation_order};
pub use storage::{PageStore, StorageError, StorageErrorKind};
