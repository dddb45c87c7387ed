//! Page view assembly.
//!
//! [`PageView`] resolves a page by slug and renders every fragment the host
//! template needs into a [`RenderedPage`].

use std::sync::Arc;

use folio_renderer::{
    Catalog, DEFAULT_WORDS_PER_MINUTE, DateFormatter, ReadingTime, RenderContext, SiteInfo,
    StrftimeFormatter, StringId, TocResult, Translator, breadcrumbs, escape_html, generate_toc,
    is_valid_slug, last_modified, reading_time, share_buttons,
};
use folio_storage::{PageStore, PageSummary, StorageError};
use serde::Serialize;

use crate::format::content_html;
use crate::navigation::{pagination_html, resolve_neighbors};
use crate::seo::{SeoHead, SeoPage};
use crate::urls::{DEFAULT_URL_TEMPLATE, PageUrls};

/// Error returned when a page view cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// No published page has this slug.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// Page storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ViewError {
    /// Whether the caller should answer with a not-found page.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Message suitable for showing to a visitor.
    #[must_use]
    pub fn user_message(&self, strings: &dyn Translator) -> String {
        match self {
            Self::NotFound(_) => strings.get(StringId::PageNotFound, None),
            Self::Storage(_) => self.to_string(),
        }
    }
}

/// Per-site rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    /// URL template with a `{slug}` placeholder.
    pub url_template: String,
    /// Reading speed for the reading-time estimate.
    pub words_per_minute: u32,
    /// Image used in link previews when a page has none.
    pub default_image: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_owned(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            default_image: None,
        }
    }
}

/// Everything needed to display one page.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedPage {
    pub slug: String,
    pub title: String,
    /// `<title>` text: page title followed by the short site name.
    pub document_title: String,
    pub canonical_url: String,
    /// Meta tags, canonical link and JSON-LD for the document head, followed
    /// by any head markup stored with the page.
    pub head_html: String,
    pub body_classes: Vec<String>,
    pub breadcrumbs: String,
    pub reading_time: ReadingTime,
    /// TOC markup, anchored content and TOC entries.
    pub toc: TocResult,
    pub last_modified: String,
    pub share: String,
    pub prev: Option<PageSummary>,
    pub next: Option<PageSummary>,
    pub pagination: String,
}

impl RenderedPage {
    /// Page body in display order.
    #[must_use]
    pub fn body_html(&self) -> String {
        format!(
            concat!(
                "{breadcrumbs}",
                r#"<div class="folio-content-wrapper"><article class="folio-article">"#,
                r#"<div class="folio-meta"><span class="reading-time"><i class="fa fa-clock-o"></i> {reading_time}</span></div>"#,
                "{toc}",
                r#"<div class="folio-content">{content}</div>"#,
                "{last_modified}{share}{pagination}",
                "</article></div>",
            ),
            breadcrumbs = self.breadcrumbs,
            reading_time = escape_html(&self.reading_time.formatted),
            toc = self.toc.toc,
            content = self.toc.content,
            last_modified = self.last_modified,
            share = self.share,
            pagination = self.pagination,
        )
    }
}

/// Renders pages from a [`PageStore`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use folio_renderer::SiteInfo;
/// use folio_site::PageView;
/// use folio_storage::{MemoryStore, Page};
///
/// let store = MemoryStore::new();
/// store.insert(Page::new("about", "About").with_content("<h2>Team</h2>")).unwrap();
///
/// let view = PageView::new(Arc::new(store), SiteInfo::new("https://example.org", "Example"));
/// let page = view.render("about").unwrap();
/// assert_eq!(page.document_title, "About | Example");
/// assert!(view.render("missing").unwrap_err().is_not_found());
/// ```
pub struct PageView {
    store: Arc<dyn PageStore>,
    site: SiteInfo,
    strings: Arc<dyn Translator>,
    dates: Arc<dyn DateFormatter>,
    urls: PageUrls,
    config: ViewConfig,
}

impl PageView {
    /// Create a view with English strings and default options.
    #[must_use]
    pub fn new(store: Arc<dyn PageStore>, site: SiteInfo) -> Self {
        let config = ViewConfig::default();
        Self {
            store,
            urls: PageUrls::new(&site.base_url, config.url_template.clone()),
            site,
            strings: Arc::new(Catalog::english()),
            dates: Arc::new(StrftimeFormatter::default()),
            config,
        }
    }

    /// Use these localized strings.
    #[must_use]
    pub fn with_strings(mut self, strings: Arc<dyn Translator>) -> Self {
        self.strings = strings;
        self
    }

    /// Use this date formatter.
    #[must_use]
    pub fn with_dates(mut self, dates: Arc<dyn DateFormatter>) -> Self {
        self.dates = dates;
        self
    }

    /// Use these rendering options.
    #[must_use]
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.urls = PageUrls::new(&self.site.base_url, config.url_template.clone());
        self.config = config;
        self
    }

    /// Site settings.
    #[must_use]
    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    /// Localized strings.
    #[must_use]
    pub fn strings(&self) -> &dyn Translator {
        self.strings.as_ref()
    }

    /// Absolute URL of a page.
    #[must_use]
    pub fn page_url(&self, slug: &str) -> String {
        self.urls.page_url(slug)
    }

    /// Render the published page with this slug.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotFound` if the slug is malformed or no published
    /// page has it.
    /// Returns `ViewError::Storage` if the page lookup fails.
    pub fn render(&self, slug: &str) -> Result<RenderedPage, ViewError> {
        if !is_valid_slug(slug) {
            tracing::debug!(slug, "Rejected malformed slug");
            return Err(ViewError::NotFound(slug.to_owned()));
        }

        let page = self
            .store
            .find_published(slug)?
            .ok_or_else(|| ViewError::NotFound(slug.to_owned()))?;

        let ctx = RenderContext::new(&self.site, self.strings.as_ref(), self.dates.as_ref());
        let canonical_url = self.urls.page_url(&page.slug);
        let description = page.meta_description.as_deref();

        let toc = generate_toc(&content_html(&page), ctx.strings);
        let reading_time = reading_time(&toc.content, self.config.words_per_minute, ctx.strings);

        let seo = SeoHead::build(
            &SeoPage {
                title: &page.title,
                canonical_url: &canonical_url,
                description,
                image: page
                    .og_image
                    .as_deref()
                    .or(self.config.default_image.as_deref()),
                created_at: page.created_at,
                modified_at: page.modified_at,
            },
            &self.site,
        );

        let (prev, next, pagination) = match self.store.navigable_pages() {
            Ok(pages) => {
                let neighbors = resolve_neighbors(&page.slug, &pages);
                (
                    neighbors.prev.cloned(),
                    neighbors.next.cloned(),
                    pagination_html(&neighbors, &self.urls, ctx.strings),
                )
            }
            Err(e) => {
                tracing::warn!(slug = %page.slug, error = %e, "Navigation unavailable");
                (None, None, String::new())
            }
        };

        let mut head_html = seo.to_html();
        if let Some(extra) = page.head_html.as_deref() {
            head_html.push('\n');
            head_html.push_str(extra);
        }

        tracing::info!(slug = %page.slug, title = %page.title, "Page viewed");

        Ok(RenderedPage {
            document_title: format!("{} | {}", page.title, self.site.short_name),
            head_html,
            body_classes: vec!["folio-page".to_owned(), format!("folio-page-{}", page.slug)],
            breadcrumbs: breadcrumbs(&page.title, &ctx),
            share: share_buttons(&canonical_url, &page.title, description, ctx.strings),
            last_modified: last_modified(page.modified_at, &ctx),
            reading_time,
            toc,
            canonical_url,
            prev,
            next,
            pagination,
            slug: page.slug,
            title: page.title,
        })
    }
}
