//! Search engine and link-preview tags for the document head.

use folio_renderer::{SiteInfo, escape_html, to_rfc3339};
use serde_json::{Value, json};

/// Inputs describing one page for its head tags.
#[derive(Clone, Copy, Debug)]
pub struct SeoPage<'a> {
    pub title: &'a str,
    pub canonical_url: &'a str,
    pub description: Option<&'a str>,
    /// Page image, or the site default when the page has none.
    pub image: Option<&'a str>,
    pub created_at: i64,
    pub modified_at: i64,
}

/// Head tags for one page: meta/link elements plus a JSON-LD script.
#[derive(Clone, Debug, PartialEq)]
pub struct SeoHead {
    /// `<meta>` and `<link>` elements in emission order.
    pub tags: Vec<String>,
    /// schema.org `WebPage` description.
    pub json_ld: Value,
}

impl SeoHead {
    /// Build the head tags for a page.
    #[must_use]
    pub fn build(page: &SeoPage<'_>, site: &SiteInfo) -> Self {
        let mut tags = Vec::new();
        let description = page.description.filter(|d| !d.trim().is_empty());
        let image = page.image.filter(|i| !i.trim().is_empty());

        if let Some(description) = description {
            tags.push(meta_name("description", description));
        }
        tags.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            escape_html(page.canonical_url)
        ));

        tags.push(meta_property("og:type", "article"));
        tags.push(meta_property("og:title", page.title));
        tags.push(meta_property("og:url", page.canonical_url));
        tags.push(meta_property("og:site_name", &site.full_name));
        if let Some(description) = description {
            tags.push(meta_property("og:description", description));
        }
        if let Some(image) = image {
            tags.push(meta_property("og:image", image));
        }
        tags.push(meta_property("og:locale", &site.locale));

        tags.push(meta_name("twitter:card", "summary_large_image"));
        tags.push(meta_name("twitter:title", page.title));
        if let Some(description) = description {
            tags.push(meta_name("twitter:description", description));
        }
        if let Some(image) = image {
            tags.push(meta_name("twitter:image", image));
        }

        Self {
            tags,
            json_ld: web_page_json_ld(page, description, site),
        }
    }

    /// The JSON-LD script element.
    ///
    /// `<` is written as `\u003c` so content can never close the script.
    #[must_use]
    pub fn json_ld_script(&self) -> String {
        let json = self.json_ld.to_string().replace('<', "\\u003c");
        format!(r#"<script type="application/ld+json">{json}</script>"#)
    }

    /// All head markup, one element per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut lines = self.tags.clone();
        lines.push(self.json_ld_script());
        lines.join("\n")
    }
}

fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{name}" content="{}">"#,
        escape_html(content)
    )
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{property}" content="{}">"#,
        escape_html(content)
    )
}

fn web_page_json_ld(page: &SeoPage<'_>, description: Option<&str>, site: &SiteInfo) -> Value {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": page.title,
        "url": page.canonical_url,
        "publisher": {
            "@type": "Organization",
            "name": site.full_name,
            "url": site.base_url,
        },
    });

    if let Some(description) = description {
        data["description"] = json!(description);
    }
    if page.modified_at > 0
        && let Some(date) = to_rfc3339(page.modified_at)
    {
        data["dateModified"] = json!(date);
    }
    if page.created_at > 0
        && let Some(date) = to_rfc3339(page.created_at)
    {
        data["datePublished"] = json!(date);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfo {
        SiteInfo::new("https://x.test", "Example Site")
    }

    fn page<'a>() -> SeoPage<'a> {
        SeoPage {
            title: "About",
            canonical_url: "https://x.test/p/about",
            description: None,
            image: None,
            created_at: 0,
            modified_at: 0,
        }
    }

    #[test]
    fn test_minimal_tags() {
        let head = SeoHead::build(&page(), &site());
        assert_eq!(
            head.tags,
            [
                r#"<link rel="canonical" href="https://x.test/p/about">"#,
                r#"<meta property="og:type" content="article">"#,
                r#"<meta property="og:title" content="About">"#,
                r#"<meta property="og:url" content="https://x.test/p/about">"#,
                r#"<meta property="og:site_name" content="Example Site">"#,
                r#"<meta property="og:locale" content="en_US">"#,
                r#"<meta name="twitter:card" content="summary_large_image">"#,
                r#"<meta name="twitter:title" content="About">"#,
            ]
        );
    }

    #[test]
    fn test_description_and_image() {
        let head = SeoHead::build(
            &SeoPage {
                description: Some("All about us"),
                image: Some("https://x.test/a.png"),
                ..page()
            },
            &site(),
        );
        let html = head.to_html();
        assert!(html.contains(r#"<meta name="description" content="All about us">"#));
        assert!(html.contains(r#"<meta property="og:description" content="All about us">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://x.test/a.png">"#));
        assert!(html.contains(r#"<meta name="twitter:image" content="https://x.test/a.png">"#));
        assert_eq!(head.json_ld["description"], "All about us");
    }

    #[test]
    fn test_blank_description_is_omitted() {
        let head = SeoHead::build(
            &SeoPage {
                description: Some("   "),
                ..page()
            },
            &site(),
        );
        assert!(!head.to_html().contains("description"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let head = SeoHead::build(
            &SeoPage {
                title: r#"Tom & "Jerry""#,
                ..page()
            },
            &site(),
        );
        assert!(
            head.tags
                .contains(&r#"<meta property="og:title" content="Tom &amp; &quot;Jerry&quot;">"#.to_owned())
        );
    }

    #[test]
    fn test_json_ld_without_dates() {
        let head = SeoHead::build(&page(), &site());
        assert_eq!(head.json_ld["@type"], "WebPage");
        assert_eq!(head.json_ld["publisher"]["name"], "Example Site");
        assert_eq!(head.json_ld["publisher"]["url"], "https://x.test");
        assert!(head.json_ld.get("dateModified").is_none());
        assert!(head.json_ld.get("datePublished").is_none());
    }

    #[test]
    fn test_json_ld_with_dates() {
        let head = SeoHead::build(
            &SeoPage {
                created_at: 1_741_964_966,
                modified_at: 1_741_964_966,
                ..page()
            },
            &site(),
        );
        assert_eq!(head.json_ld["datePublished"], "2025-03-14T15:09:26+00:00");
        assert_eq!(head.json_ld["dateModified"], "2025-03-14T15:09:26+00:00");
    }

    #[test]
    fn test_json_ld_cannot_close_script() {
        let head = SeoHead::build(
            &SeoPage {
                title: "</script><script>alert(1)</script>",
                ..page()
            },
            &site(),
        );
        let script = head.json_ld_script();
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.contains(r"\u003c/script>"));
    }
}
