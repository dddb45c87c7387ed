//! Page view assembly for Folio.
//!
//! Combines the pure helpers from `folio-renderer` with a
//! [`PageStore`](folio_storage::PageStore) to render a complete page:
//! anchored content with a table of contents, reading time, share links,
//! breadcrumbs, SEO head tags and previous/next navigation.
//!
//! A missing or unpublished page yields [`ViewError::NotFound`] so the host
//! can answer with its own not-found response.

mod format;
mod navigation;
mod seo;
mod urls;
mod view;

pub use format::content_html;
pub use navigation::{Neighbors, pagination_html, resolve_neighbors};
pub use seo::{SeoHead, SeoPage};
pub use urls::{DEFAULT_URL_TEMPLATE, PageUrls, SLUG_PLACEHOLDER};
pub use view::{PageView, RenderedPage, ViewConfig, ViewError};
