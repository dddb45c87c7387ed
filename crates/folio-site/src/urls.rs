//! Public page URLs.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside a path segment or query value holding a slug.
const SLUG_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Placeholder replaced by the page slug in a URL template.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// Default URL template, relative to the site base URL.
pub const DEFAULT_URL_TEMPLATE: &str = "/static/{slug}.html";

/// Builds absolute page URLs from a base URL and a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageUrls {
    base_url: String,
    template: String,
}

impl PageUrls {
    /// Create a URL builder.
    ///
    /// Templates starting with `http://` or `https://` are used as-is;
    /// anything else is appended to `base_url`.
    #[must_use]
    pub fn new(base_url: &str, template: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            template: template.into(),
        }
    }

    /// Absolute URL of the page with this slug.
    #[must_use]
    pub fn page_url(&self, slug: &str) -> String {
        let encoded = utf8_percent_encode(slug, SLUG_ENCODE_SET).to_string();
        let path = self.template.replace(SLUG_PLACEHOLDER, &encoded);
        if path.starts_with("http://") || path.starts_with("https://") {
            return path;
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for PageUrls {
    fn default() -> Self {
        Self::new("", DEFAULT_URL_TEMPLATE)
    }
}
