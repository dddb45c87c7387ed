//! Heading extraction and table of contents generation.
//!
//! Level-2 and level-3 headings are found in a single pass over the HTML.
//! Each one gets an anchor id of the form `<slug>-<index>`, where `index` is
//! its zero-based position among the extracted headings, so ids are unique
//! within a render even when two headings share the same text.
//!
//! Anchors are injected by rebuilding the content from byte offsets, never by
//! searching for the original markup, so byte-identical headings each keep
//! their own id. A pre-existing `id` attribute on a heading is replaced by the
//! generated one.

use std::fmt::Write;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::i18n::{StringId, Translator};
use crate::slug::slugify;
use crate::text::{collapse_whitespace, decode_entities, escape_html, strip_tags};

static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<h([23])(\s(?:[^>"']|"[^"]*"|'[^']*')*)?>(.*?)</h([23])\s*>"#).unwrap()
});

static HEADING_OPEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[23][\s>]").unwrap());

static ID_ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+id\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+)"#).unwrap()
});

/// Lowest heading level that appears in the table of contents.
const BASE_LEVEL: u8 = 2;

/// A heading found in page content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Plain text with markup stripped.
    pub text: String,
    /// Anchor id, unique within the render.
    pub slug: String,
    /// Original heading markup as found in the content.
    pub markup: String,
    /// Byte range of the original markup in the content.
    pub span: Range<usize>,
    attrs: String,
    inner: String,
}

impl Heading {
    /// Heading markup carrying the generated id.
    ///
    /// Keeps the original attributes (minus any `id`) and inner markup.
    #[must_use]
    pub fn anchored_markup(&self) -> String {
        format!(
            r#"<h{level} id="{id}"{attrs}>{inner}</h{level}>"#,
            level = self.level,
            id = self.slug,
            attrs = self.attrs,
            inner = self.inner,
        )
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

impl From<&Heading> for TocEntry {
    fn from(heading: &Heading) -> Self {
        Self {
            level: heading.level,
            title: heading.text.clone(),
            id: heading.slug.clone(),
        }
    }
}

/// Result of table of contents generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocResult {
    /// TOC markup, empty when the content has no headings.
    pub toc: String,
    /// Content with anchor ids injected into the headings.
    pub content: String,
    /// Structured entries in document order.
    pub entries: Vec<TocEntry>,
}

/// Find level-2 and level-3 headings in document order.
///
/// Headings whose opening and closing levels differ, or whose text is empty
/// once markup is stripped, are skipped and do not consume an index. A
/// heading nested inside an unclosed one is still found.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut pos = 0;

    while let Some(caps) = HEADING_PATTERN.captures_at(content, pos) {
        let (Some(whole), Some(open), Some(close), Some(inner)) =
            (caps.get(0), caps.get(1), caps.get(4), caps.get(3))
        else {
            break;
        };

        // An unclosed opener swallows the next heading; rescan from inside it.
        if open.as_str() != close.as_str() || HEADING_OPEN_PATTERN.is_match(inner.as_str()) {
            pos = inner.start();
            continue;
        }
        pos = whole.end();

        let text = collapse_whitespace(&decode_entities(&strip_tags(inner.as_str())));
        if text.is_empty() {
            continue;
        }

        let index = headings.len();
        let level = if open.as_str() == "3" { 3 } else { 2 };
        let attrs = caps
            .get(2)
            .map(|m| ID_ATTR_PATTERN.replace_all(m.as_str(), "").into_owned())
            .unwrap_or_default();

        headings.push(Heading {
            level,
            slug: format!("{}-{index}", slugify(&text)),
            text,
            markup: whole.as_str().to_owned(),
            span: whole.range(),
            attrs,
            inner: inner.as_str().to_owned(),
        });
    }

    tracing::debug!(count = headings.len(), "Extracted headings");
    headings
}

/// Rebuild content with each heading replaced by its anchored version.
///
/// `headings` must come from [`extract_headings`] on the same content.
pub fn inject_anchors(content: &str, headings: &[Heading]) -> String {
    let mut out = String::with_capacity(content.len() + headings.len() * 16);
    let mut last = 0;

    for heading in headings {
        out.push_str(&content[last..heading.span.start]);
        out.push_str(&heading.anchored_markup());
        last = heading.span.end;
    }
    out.push_str(&content[last..]);
    out
}

/// Render the nested TOC list.
///
/// A deeper level opens a sub-list inside the previous item; a shallower one
/// closes it. Returns an empty string for no entries.
pub fn toc_html(entries: &[TocEntry], strings: &dyn Translator) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let label = escape_html(&strings.get(StringId::TableOfContents, None));
    let mut out = String::new();
    write!(
        out,
        r#"<nav class="folio-toc" aria-label="{label}"><h4 class="toc-title">{label}</h4><ul class="toc-list">"#
    )
    .unwrap();

    let mut current = BASE_LEVEL;
    let mut depth = 0usize;

    for (i, entry) in entries.iter().enumerate() {
        if entry.level > current {
            if i == 0 {
                out.push_str(r#"<li class="toc-item">"#);
            }
            out.push_str(r#"<ul class="toc-sublist">"#);
            depth += 1;
        } else {
            if i > 0 {
                out.push_str("</li>");
            }
            if entry.level < current && depth > 0 {
                out.push_str("</ul></li>");
                depth -= 1;
            }
        }
        current = entry.level;

        write!(
            out,
            r##"<li class="toc-item toc-level-{}"><a href="#{}">{}</a>"##,
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .unwrap();
    }

    out.push_str("</li>");
    while depth > 0 {
        out.push_str("</ul></li>");
        depth -= 1;
    }

    out.push_str("</ul></nav>");
    out
}

/// Extract headings, inject anchors and build the TOC in one call.
pub fn generate_toc(content: &str, strings: &dyn Translator) -> TocResult {
    let headings = extract_headings(content);
    if headings.is_empty() {
        return TocResult {
            toc: String::new(),
            content: content.to_owned(),
            entries: Vec::new(),
        };
    }

    let entries: Vec<TocEntry> = headings.iter().map(TocEntry::from).collect();
    TocResult {
        toc: toc_html(&entries, strings),
        content: inject_anchors(content, &headings),
        entries,
    }
}
