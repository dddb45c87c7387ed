//! Pages imported from standalone HTML documents.
//!
//! A site may ship finished HTML files for pages that have no stored record.
//! The document is reduced to the parts a page needs: a title, the body
//! markup, the meta description and any stylesheets.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::page::{ContentFormat, Page};

/// Where an imported document's title comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSource {
    /// Text of the first `<h1>`.
    #[default]
    H1,
    /// Text of the `<title>` element.
    Title,
}

/// Build a page from a complete HTML document.
///
/// The body's inner markup becomes the content, `<meta name="description">`
/// the meta description, and every `<style>` and `<link>` element the extra
/// head markup. The title falls back to the slug when the chosen element is
/// missing or empty. Imported pages are published but take no part in
/// navigation.
pub fn page_from_document(slug: &str, html: &str, title_source: TitleSource) -> Page {
    let doc = Html::parse_document(html);

    let title = match title_source {
        TitleSource::H1 => first_text(&doc, "h1"),
        TitleSource::Title => first_text(&doc, "title"),
    }
    .unwrap_or_else(|| slug.to_owned());

    let content = first(&doc, "body")
        .map(|body| body.inner_html())
        .unwrap_or_default();

    let mut page = Page::new(slug, title)
        .with_format(ContentFormat::Html)
        .with_navigation(false)
        .with_content(content.trim());

    if let Some(description) = first(&doc, r#"meta[name="description"]"#)
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        page = page.with_meta_description(description);
    }

    let head: Vec<String> = Selector::parse("style, link")
        .ok()
        .map(|sel| doc.select(&sel).map(|el| el.html()).collect())
        .unwrap_or_default();
    if !head.is_empty() {
        page = page.with_head_html(head.join("\n"));
    }

    page
}

fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    let raw: String = first(doc, css)?.text().collect();
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Document Title</title>
  <meta name="description" content=" Terms of service ">
  <style>.terms { color: red; }</style>
  <link rel="stylesheet" href="/terms.css">
</head>
<body>
  <h1>Terms <em>and</em> Conditions</h1>
  <h2>Scope</h2>
  <p class="terms">Text</p>
</body>
</html>"#;

    #[test]
    fn test_title_from_first_heading() {
        let page = page_from_document("terms", DOCUMENT, TitleSource::H1);
        assert_eq!(page.title, "Terms and Conditions");
    }

    #[test]
    fn test_title_from_title_element() {
        let page = page_from_document("terms", DOCUMENT, TitleSource::Title);
        assert_eq!(page.title, "Document Title");
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let html = "<html><body><p>No headings</p></body></html>";
        assert_eq!(page_from_document("plain", html, TitleSource::H1).title, "plain");
        assert_eq!(page_from_document("plain", html, TitleSource::Title).title, "plain");
    }

    #[test]
    fn test_meta_description() {
        let page = page_from_document("terms", DOCUMENT, TitleSource::H1);
        assert_eq!(page.meta_description.as_deref(), Some("Terms of service"));

        let bare = page_from_document("x", "<p>x</p>", TitleSource::H1);
        assert!(bare.meta_description.is_none());
    }

    #[test]
    fn test_body_becomes_content() {
        let page = page_from_document("terms", DOCUMENT, TitleSource::H1);
        assert!(page.content.starts_with("<h1>Terms <em>and</em> Conditions</h1>"));
        assert!(page.content.contains("<h2>Scope</h2>"));
        assert!(!page.content.contains("<body"));
        assert!(!page.content.contains("<title>"));
        assert_eq!(page.format, ContentFormat::Html);
    }

    #[test]
    fn test_styles_and_links_are_kept() {
        let page = page_from_document("terms", DOCUMENT, TitleSource::H1);
        assert_eq!(
            page.head_html.as_deref(),
            Some("<style>.terms { color: red; }</style>\n<link rel=\"stylesheet\" href=\"/terms.css\">")
        );
    }

    #[test]
    fn test_imported_page_is_published_but_not_navigable() {
        let page = page_from_document("terms", DOCUMENT, TitleSource::H1);
        assert!(page.is_published());
        assert!(!page.is_navigable());
    }

    #[test]
    fn test_title_source_from_config_value() {
        let source: TitleSource = serde_json::from_str(r#""title""#).unwrap();
        assert_eq!(source, TitleSource::Title);
        let source: TitleSource = serde_json::from_str(r#""h1""#).unwrap();
        assert_eq!(source, TitleSource::H1);
    }
}
