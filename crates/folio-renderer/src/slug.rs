//! Text to slug normalization.

/// Slug used when the text has no letters or digits at all.
pub const FALLBACK_SLUG: &str = "section";

/// Maximum length of a stored page slug.
pub const MAX_SLUG_LEN: usize = 100;

/// Convert text to a URL-safe slug.
///
/// Lowercases, transliterates to ASCII (dropping diacritics), collapses every
/// run of non-alphanumeric characters into a single dash and trims dashes at
/// both ends. Falls back to [`FALLBACK_SLUG`] when nothing is left.
///
/// # Examples
///
/// ```
/// use folio_renderer::slugify;
///
/// assert_eq!(slugify("Título: Sección 1!"), "titulo-seccion-1");
/// assert_eq!(slugify("!!!"), "section");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let slug = ::slug::slugify(text);
    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

/// Check whether a requested page slug has an acceptable shape.
///
/// Accepts ASCII letters, digits, `-` and `_`, up to [`MAX_SLUG_LEN`] bytes.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
