//! Breadcrumb navigation.

use std::fmt::Write;

use crate::context::RenderContext;
use crate::i18n::StringId;
use crate::text::escape_html;

/// Render a two-level breadcrumb: home link, then the current page title.
///
/// The current page is the terminal node and is not linked.
pub fn breadcrumbs(title: &str, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    write!(
        out,
        r#"<nav class="folio-breadcrumbs" aria-label="{}"><ol class="breadcrumb-list">"#,
        escape_html(&ctx.strings.get(StringId::Breadcrumbs, None))
    )
    .unwrap();
    write!(
        out,
        r#"<li class="breadcrumb-item"><a href="{}"><i class="fa fa-home"></i> {}</a></li>"#,
        escape_html(&ctx.site.home_url),
        escape_html(&ctx.strings.get(StringId::Home, None))
    )
    .unwrap();
    write!(
        out,
        r#"<li class="breadcrumb-item active" aria-current="page">{}</li>"#,
        escape_html(title)
    )
    .unwrap();
    out.push_str("</ol></nav>");
    out
}
