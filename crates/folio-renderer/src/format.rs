//! Conversion of stored content to HTML.

use pulldown_cmark::{Options, Parser, html};

use crate::text::escape_html;

/// Render markdown to HTML (tables, strikethrough and task lists enabled).
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

/// Escape plain text and turn line breaks into `<br>`.
pub fn plain_to_html(text: &str) -> String {
    escape_html(text)
        .replace("\r\n", "\n")
        .replace('\n', "<br>\n")
}
