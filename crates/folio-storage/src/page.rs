//! Page records.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

/// Publication state of a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Visible to editors only.
    Draft,
    /// Publicly visible.
    #[default]
    Published,
}

/// Format of the stored content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Raw HTML.
    #[default]
    Html,
    /// `CommonMark` with GFM tables, strikethrough and task lists.
    Markdown,
    /// Plain text.
    Plain,
}

/// A content page as persisted by storage.
///
/// Timestamps are seconds since the Unix epoch; `0` or less means unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Page body.
    #[serde(default)]
    pub content: String,
    /// Format of `content`.
    #[serde(default)]
    pub format: ContentFormat,
    /// Publication state.
    #[serde(default)]
    pub status: PageStatus,
    /// Whether the page takes part in prev/next navigation.
    #[serde(default = "default_true")]
    pub show_in_navigation: bool,
    /// Position in navigation; ties are broken by title.
    #[serde(default)]
    pub sort_order: i64,
    /// Creation time.
    #[serde(default)]
    pub created_at: i64,
    /// Last modification time.
    #[serde(default)]
    pub modified_at: i64,
    /// Id of the user who last modified the page.
    #[serde(default)]
    pub modified_by: Option<u64>,
    /// Description for search engines and link previews.
    #[serde(default, deserialize_with = "non_blank")]
    pub meta_description: Option<String>,
    /// Image URL for link previews.
    #[serde(default, deserialize_with = "non_blank")]
    pub og_image: Option<String>,
    /// Extra `<head>` markup, such as stylesheets kept from an imported
    /// HTML document.
    #[serde(default, deserialize_with = "non_blank")]
    pub head_html: Option<String>,
}

impl Page {
    /// Create a published HTML page with navigation enabled.
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            content: String::new(),
            format: ContentFormat::default(),
            status: PageStatus::default(),
            show_in_navigation: true,
            sort_order: 0,
            created_at: 0,
            modified_at: 0,
            modified_by: None,
            meta_description: None,
            og_image: None,
            head_html: None,
        }
    }

    /// Whether the page is publicly visible.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }

    /// Whether the page belongs in prev/next navigation.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.is_published() && self.show_in_navigation
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ContentFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: PageStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_navigation(mut self, show: bool) -> Self {
        self.show_in_navigation = show;
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, created_at: i64, modified_at: i64) -> Self {
        self.created_at = created_at;
        self.modified_at = modified_at;
        self
    }

    #[must_use]
    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_og_image(mut self, url: impl Into<String>) -> Self {
        self.og_image = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_head_html(mut self, markup: impl Into<String>) -> Self {
        self.head_html = Some(markup.into());
        self
    }
}

/// The fields of a page needed for navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page slug.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Navigation position.
    pub sort_order: i64,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            slug: page.slug.clone(),
            title: page.title.clone(),
            sort_order: page.sort_order,
        }
    }
}

/// Navigation order: sort order ascending, then title ascending.
pub fn navigation_order(a: &PageSummary, b: &PageSummary) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| a.title.cmp(&b.title))
}

fn default_true() -> bool {
    true
}

/// Treat empty or whitespace-only strings as absent.
fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
