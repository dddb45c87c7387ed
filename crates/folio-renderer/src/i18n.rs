//! Localized strings.
//!
//! Helpers never embed language-specific text. They ask a [`Translator`] for
//! a [`StringId`] and an optional interpolation argument instead. [`Catalog`]
//! is a TOML-backed implementation with bundled `en` and `es` tables.
//!
//! # Catalog format
//!
//! ```toml
//! readingtime = "{$a} min read"
//! lastupdated = "Last updated: {$a}"
//! ```
//!
//! `{$a}` is replaced by the argument passed to [`Translator::get`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the interpolation argument.
const PLACEHOLDER: &str = "{$a}";

const EN: &str = include_str!("../lang/en.toml");
const ES: &str = include_str!("../lang/es.toml");

/// Identifiers of the strings used by the page helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringId {
    TableOfContents,
    ReadingTime,
    ShareThisPage,
    ShareOn,
    CopyLink,
    Breadcrumbs,
    Home,
    LastUpdated,
    PreviousPage,
    NextPage,
    PageNotFound,
}

impl StringId {
    /// Catalog key for this string.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::TableOfContents => "tableofcontents",
            Self::ReadingTime => "readingtime",
            Self::ShareThisPage => "sharethispage",
            Self::ShareOn => "shareon",
            Self::CopyLink => "copylink",
            Self::Breadcrumbs => "breadcrumbs",
            Self::Home => "home",
            Self::LastUpdated => "lastupdated",
            Self::PreviousPage => "previouspage",
            Self::NextPage => "nextpage",
            Self::PageNotFound => "pagenotfound",
        }
    }
}

/// Translation provider capability.
pub trait Translator: Send + Sync {
    /// Look up a string, interpolating `arg` when given.
    fn get(&self, id: StringId, arg: Option<&str>) -> String;
}

/// Error loading a string catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No bundled catalog for the language.
    #[error("No bundled string catalog for language: {0}")]
    UnknownLanguage(String),
    /// I/O error reading a catalog file.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Catalog file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("String catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// String table keyed by catalog key.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    /// Parse a catalog from TOML source.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the source is not a flat string table.
    pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
        let strings: HashMap<String, String> = toml::from_str(source)?;
        Ok(Self { strings })
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::Parse` if it is not a flat string table.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Bundled catalog for a language code (`en`, `es`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownLanguage` for other codes.
    pub fn bundled(language: &str) -> Result<Self, CatalogError> {
        let source = match language {
            "en" => EN,
            "es" => ES,
            other => return Err(CatalogError::UnknownLanguage(other.to_owned())),
        };
        Self::from_toml(source)
    }

    /// Bundled English catalog.
    #[must_use]
    pub fn english() -> Self {
        Self::from_toml(EN).unwrap_or_default()
    }

    /// Overlay another catalog; its strings win over existing ones.
    #[must_use]
    pub fn merged(mut self, other: Catalog) -> Self {
        self.strings.extend(other.strings);
        self
    }
}

impl Translator for Catalog {
    fn get(&self, id: StringId, arg: Option<&str>) -> String {
        let key = id.key();
        let Some(template) = self.strings.get(key) else {
            tracing::warn!(key, "Missing string in catalog");
            return format!("[[{key}]]");
        };

        match arg {
            Some(arg) => template.replace(PLACEHOLDER, arg),
            None => template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_IDS: [StringId; 11] = [
        StringId::TableOfContents,
        StringId::ReadingTime,
        StringId::ShareThisPage,
        StringId::ShareOn,
        StringId::CopyLink,
        StringId::Breadcrumbs,
        StringId::Home,
        StringId::LastUpdated,
        StringId::PreviousPage,
        StringId::NextPage,
        StringId::PageNotFound,
    ];

    #[test]
    fn test_bundled_catalogs_are_complete() {
        for language in ["en", "es"] {
            let catalog = Catalog::bundled(language).unwrap();
            for id in ALL_IDS {
                let value = catalog.get(id, Some("x"));
                assert!(!value.starts_with("[["), "{language} is missing {}", id.key());
            }
        }
    }

    #[test]
    fn test_interpolation() {
        let catalog = Catalog::english();
        assert_eq!(catalog.get(StringId::ReadingTime, Some("3")), "3 min read");
    }

    #[test]
    fn test_spanish_interpolation() {
        let catalog = Catalog::bundled("es").unwrap();
        assert_eq!(
            catalog.get(StringId::ReadingTime, Some("5")),
            "5 min de lectura"
        );
    }

    #[test]
    fn test_missing_key_is_marked() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(StringId::Home, None), "[[home]]");
    }

    #[test]
    fn test_unknown_language() {
        let err = Catalog::bundled("tlh").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownLanguage(lang) if lang == "tlh"));
    }

    #[test]
    fn test_merged_overrides() {
        let overrides = Catalog::from_toml("home = \"Start\"").unwrap();
        let catalog = Catalog::english().merged(overrides);
        assert_eq!(catalog.get(StringId::Home, None), "Start");
        assert_eq!(catalog.get(StringId::CopyLink, None), "Copy link");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fr.toml");
        std::fs::write(&path, "home = \"Accueil\"\n").unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.get(StringId::Home, None), "Accueil");
    }

    #[test]
    fn test_parse_error() {
        let err = Catalog::from_toml("home = [1, 2]").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
