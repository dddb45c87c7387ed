//! Previous/next navigation between pages.

use std::fmt::Write;

use folio_renderer::{StringId, Translator, escape_html};
use folio_storage::PageSummary;

use crate::urls::PageUrls;

/// Pages immediately before and after the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub prev: Option<&'a PageSummary>,
    pub next: Option<&'a PageSummary>,
}

impl Neighbors<'_> {
    /// Whether there is nowhere to navigate to.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// Find the neighbors of `current_slug` in an ordered page list.
///
/// Both sides are `None` when the slug is not in the list.
pub fn resolve_neighbors<'a>(current_slug: &str, pages: &'a [PageSummary]) -> Neighbors<'a> {
    let Some(index) = pages.iter().position(|p| p.slug == current_slug) else {
        return Neighbors::default();
    };
    Neighbors {
        prev: index.checked_sub(1).and_then(|i| pages.get(i)),
        next: pages.get(index + 1),
    }
}

/// Render the prev/next block.
///
/// A missing side becomes an empty disabled placeholder so the remaining
/// link keeps its position. Returns an empty string when both are missing.
pub fn pagination_html(
    neighbors: &Neighbors<'_>,
    urls: &PageUrls,
    strings: &dyn Translator,
) -> String {
    if neighbors.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<nav class="folio-pagination">"#);

    match neighbors.prev {
        Some(page) => write!(
            out,
            r#"<a href="{}" class="pagination-prev" rel="prev"><i class="fa fa-arrow-left"></i> {}<span class="pagination-title">{}</span></a>"#,
            escape_html(&urls.page_url(&page.slug)),
            escape_html(&strings.get(StringId::PreviousPage, None)),
            escape_html(&page.title),
        )
        .unwrap(),
        None => out.push_str(r#"<span class="pagination-prev disabled"></span>"#),
    }

    match neighbors.next {
        Some(page) => write!(
            out,
            r#"<a href="{}" class="pagination-next" rel="next">{} <i class="fa fa-arrow-right"></i><span class="pagination-title">{}</span></a>"#,
            escape_html(&urls.page_url(&page.slug)),
            escape_html(&strings.get(StringId::NextPage, None)),
            escape_html(&page.title),
        )
        .unwrap(),
        None => out.push_str(r#"<span class="pagination-next disabled"></span>"#),
    }

    out.push_str("</nav>");
    out
}
