//! Page rendering helpers.
//!
//! Turns a page's HTML content and metadata into the fragments a host page
//! embeds: content with heading anchors, a table of contents, reading time,
//! share links, breadcrumbs and a last-updated banner.
//!
//! All helpers are pure functions. Host collaborators (site settings,
//! localized strings, date formatting) arrive through an explicit
//! [`RenderContext`] rather than globals.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{Catalog, RenderContext, SiteInfo, StrftimeFormatter, generate_toc};
//!
//! let site = SiteInfo::new("https://example.org", "Example");
//! let strings = Catalog::english();
//! let dates = StrftimeFormatter::default();
//! let ctx = RenderContext::new(&site, &strings, &dates);
//!
//! let result = generate_toc("<h2>Intro</h2><p>Hello</p>", ctx.strings);
//! assert_eq!(result.entries[0].id, "intro-0");
//! assert!(result.content.starts_with(r#"<h2 id="intro-0">"#));
//! ```

mod breadcrumbs;
mod context;
mod dates;
mod format;
mod i18n;
mod last_modified;
mod reading_time;
mod share;
mod slug;
mod text;
mod toc;

pub use breadcrumbs::breadcrumbs;
pub use context::{RenderContext, SiteInfo};
pub use dates::{DateFormatter, StrftimeFormatter, to_rfc3339};
pub use format::{markdown_to_html, plain_to_html};
pub use i18n::{Catalog, CatalogError, StringId, Translator};
pub use last_modified::last_modified;
pub use reading_time::{
    DEFAULT_WORDS_PER_MINUTE, ReadingTime, minutes_for, reading_time, word_count,
};
pub use share::{ShareTarget, share_buttons};
pub use slug::{FALLBACK_SLUG, MAX_SLUG_LEN, is_valid_slug, slugify};
pub use text::{escape_html, strip_tags};
pub use toc::{Heading, TocEntry, TocResult, extract_headings, generate_toc, inject_anchors, toc_html};
