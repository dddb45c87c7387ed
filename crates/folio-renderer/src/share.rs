//! Social share links.
//!
//! Only links are generated; nothing here talks to the networks.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::i18n::{StringId, Translator};
use crate::text::escape_html;

/// Characters left as-is in form-encoded query values: A-Z a-z 0-9 - . _
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Encode a query value the way HTML forms do (space becomes `+`).
fn form_encode(input: &str) -> String {
    utf8_percent_encode(input, FORM_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

/// A sharing destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    LinkedIn,
    WhatsApp,
    Facebook,
    Telegram,
}

impl ShareTarget {
    /// All targets in display order.
    pub const ALL: [ShareTarget; 5] = [
        Self::Twitter,
        Self::LinkedIn,
        Self::WhatsApp,
        Self::Facebook,
        Self::Telegram,
    ];

    /// Brand name shown to screen readers and in the tooltip.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::WhatsApp => "WhatsApp",
            Self::Facebook => "Facebook",
            Self::Telegram => "Telegram",
        }
    }

    /// Short lowercase name used in CSS classes and icons.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::WhatsApp => "whatsapp",
            Self::Facebook => "facebook",
            Self::Telegram => "telegram",
        }
    }

    /// Share-intent URL for a page.
    #[must_use]
    pub fn intent_url(self, url: &str, title: &str, description: Option<&str>) -> String {
        let url = form_encode(url);
        let title = form_encode(title);
        match self {
            Self::Twitter => format!("https://twitter.com/intent/tweet?url={url}&text={title}"),
            Self::LinkedIn => format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
            Self::WhatsApp => {
                let mut text = title;
                if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
                    text.push_str("%20");
                    text.push_str(&form_encode(description));
                }
                format!("https://wa.me/?text={text}%20{url}")
            }
            Self::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
            Self::Telegram => format!("https://t.me/share/url?url={url}&text={title}"),
        }
    }
}

/// Render share links for every target plus a copy-link button.
///
/// The copy button carries the raw URL in `data-url` for client-side
/// clipboard copy.
pub fn share_buttons(
    url: &str,
    title: &str,
    description: Option<&str>,
    strings: &dyn Translator,
) -> String {
    let mut out = String::from(r#"<div class="share-buttons">"#);
    write!(
        out,
        r#"<span class="share-label">{}</span>"#,
        escape_html(&strings.get(StringId::ShareThisPage, None))
    )
    .unwrap();

    for target in ShareTarget::ALL {
        let name = target.name();
        write!(
            out,
            r#"<a href="{href}" class="share-btn share-btn-{name}" target="_blank" rel="noopener noreferrer" title="{tooltip}"><i class="fa fa-{name}"></i><span class="sr-only">{label}</span></a>"#,
            href = escape_html(&target.intent_url(url, title, description)),
            tooltip = escape_html(&strings.get(StringId::ShareOn, Some(target.label()))),
            label = target.label(),
        )
        .unwrap();
    }

    let copy = escape_html(&strings.get(StringId::CopyLink, None));
    write!(
        out,
        r#"<button type="button" class="share-btn share-btn-copy" data-url="{}" title="{copy}"><i class="fa fa-link"></i><span class="sr-only">{copy}</span></button>"#,
        escape_html(url)
    )
    .unwrap();

    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    const URL: &str = "https://x.test/p";
    const ENCODED_URL: &str = "https%3A%2F%2Fx.test%2Fp";

    fn buttons() -> String {
        share_buttons(URL, "T", None, &Catalog::english())
    }

    #[test]
    fn test_form_encode() {
        assert_eq!(form_encode("a b&c"), "a+b%26c");
        assert_eq!(form_encode("safe-._chars"), "safe-._chars");
        assert_eq!(form_encode("ñ"), "%C3%B1");
        assert_eq!(form_encode("100% sure"), "100%25+sure");
    }

    #[test]
    fn test_one_link_per_target() {
        let html = buttons();
        assert_eq!(html.matches("<a href=").count(), ShareTarget::ALL.len());
        for target in ShareTarget::ALL {
            assert_eq!(
                html.matches(&format!("share-btn-{}\"", target.name())).count(),
                1
            );
        }
        assert_eq!(html.matches(ENCODED_URL).count(), ShareTarget::ALL.len());
    }

    #[test]
    fn test_single_copy_button_with_raw_url() {
        let html = buttons();
        assert_eq!(html.matches("share-btn-copy").count(), 1);
        assert_eq!(html.matches(r#"data-url="https://x.test/p""#).count(), 1);
    }

    #[test]
    fn test_targets_in_order() {
        let html = buttons();
        let positions: Vec<usize> = ShareTarget::ALL
            .iter()
            .map(|t| html.find(&format!("share-btn-{}", t.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(positions[4] < html.find("share-btn-copy").unwrap());
    }

    #[test]
    fn test_intent_urls() {
        assert_eq!(
            ShareTarget::Twitter.intent_url(URL, "T", None),
            format!("https://twitter.com/intent/tweet?url={ENCODED_URL}&text=T")
        );
        assert_eq!(
            ShareTarget::LinkedIn.intent_url(URL, "T", None),
            format!("https://www.linkedin.com/sharing/share-offsite/?url={ENCODED_URL}")
        );
        assert_eq!(
            ShareTarget::WhatsApp.intent_url(URL, "T", None),
            format!("https://wa.me/?text=T%20{ENCODED_URL}")
        );
        assert_eq!(
            ShareTarget::Facebook.intent_url(URL, "T", None),
            format!("https://www.facebook.com/sharer/sharer.php?u={ENCODED_URL}")
        );
        assert_eq!(
            ShareTarget::Telegram.intent_url(URL, "T", None),
            format!("https://t.me/share/url?url={ENCODED_URL}&text=T")
        );
    }

    #[test]
    fn test_whatsapp_includes_description() {
        assert_eq!(
            ShareTarget::WhatsApp.intent_url(URL, "T", Some("Short read")),
            format!("https://wa.me/?text=T%20Short+read%20{ENCODED_URL}")
        );
        assert_eq!(
            ShareTarget::WhatsApp.intent_url(URL, "T", Some("  ")),
            format!("https://wa.me/?text=T%20{ENCODED_URL}")
        );
    }

    #[test]
    fn test_query_separator_is_escaped_in_markup() {
        let html = buttons();
        assert!(html.contains(&format!("tweet?url={ENCODED_URL}&amp;text=T")));
    }

    #[test]
    fn test_hostile_title_is_escaped() {
        let html = share_buttons(
            r#"https://x.test/p?a="b""#,
            "<script>",
            None,
            &Catalog::english(),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"data-url="https://x.test/p?a=&quot;b&quot;""#));
    }

    #[test]
    fn test_tooltips_are_localized() {
        let html = share_buttons(URL, "T", None, &Catalog::bundled("es").unwrap());
        assert!(html.contains(r#"title="Compartir en Telegram""#));
        assert!(html.contains(">Compartir:</span>"));
    }
}
