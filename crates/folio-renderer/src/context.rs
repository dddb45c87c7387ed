//! Explicit render context passed to every helper.

use crate::dates::DateFormatter;
use crate::i18n::Translator;

/// Host-wide site settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteInfo {
    /// Site root URL without trailing slash (e.g. `https://example.org`).
    pub base_url: String,
    /// Target of the breadcrumb home link.
    pub home_url: String,
    /// Full site name, used for `og:site_name` and the publisher.
    pub full_name: String,
    /// Short site name, appended to document titles.
    pub short_name: String,
    /// Open Graph locale (e.g. `en_US`).
    pub locale: String,
}

impl SiteInfo {
    /// Create site settings with the home link pointing at the base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>, name: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let name = name.into();
        Self {
            home_url: format!("{base_url}/"),
            base_url,
            full_name: name.clone(),
            short_name: name,
            locale: "en_US".to_owned(),
        }
    }
}

/// Everything a helper needs besides its direct inputs.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Site settings.
    pub site: &'a SiteInfo,
    /// Localized strings.
    pub strings: &'a dyn Translator,
    /// Date formatting for display.
    pub dates: &'a dyn DateFormatter,
}

impl<'a> RenderContext<'a> {
    /// Bundle the collaborators for one render.
    #[must_use]
    pub fn new(
        site: &'a SiteInfo,
        strings: &'a dyn Translator,
        dates: &'a dyn DateFormatter,
    ) -> Self {
        Self {
            site,
            strings,
            dates,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dates::StrftimeFormatter;
    use crate::i18n::Catalog;

    use super::{RenderContext, SiteInfo};

    /// Owned collaborators for tests.
    pub(crate) struct Fixture {
        pub site: SiteInfo,
        pub strings: Catalog,
        pub dates: StrftimeFormatter,
    }

    impl Fixture {
        pub(crate) fn new() -> Self {
            Self {
                site: SiteInfo::new("https://x.test", "Example Site"),
                strings: Catalog::english(),
                dates: StrftimeFormatter::default(),
            }
        }

        pub(crate) fn ctx(&self) -> RenderContext<'_> {
            RenderContext::new(&self.site, &self.strings, &self.dates)
        }
    }
}
