//! Stored content to HTML.

use folio_renderer::{markdown_to_html, plain_to_html};
use folio_storage::{ContentFormat, Page};

/// Convert a page's content to HTML according to its format.
pub fn content_html(page: &Page) -> String {
    match page.format {
        ContentFormat::Html => page.content.clone(),
        ContentFormat::Markdown => markdown_to_html(&page.content),
        ContentFormat::Plain => plain_to_html(&page.content),
    }
}
