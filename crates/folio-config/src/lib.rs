//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_url`
//! - `site.home_url`
//! - `seo.default_image`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base URL.
    pub base_url: Option<String>,
    /// Override the page source file.
    pub pages_file: Option<PathBuf>,
    /// Override the HTML document directory.
    pub documents_dir: Option<PathBuf>,
    /// Override the string catalog language.
    pub language: Option<String>,
    /// Override reading speed.
    pub words_per_minute: Option<u32>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Placeholder that page URL templates must contain.
const SLUG_PLACEHOLDER: &str = "{slug}";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,
    /// Page source and URLs.
    pub pages: PagesConfig,
    /// Reading-time estimation.
    pub reading: ReadingConfig,
    /// Link-preview defaults.
    pub seo: SeoConfig,
    /// Date display.
    pub dates: DatesConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root URL.
    pub base_url: String,
    /// Breadcrumb home link; defaults to the base URL.
    pub home_url: Option<String>,
    /// Full site name.
    pub full_name: String,
    /// Short site name for document titles; defaults to the full name.
    pub short_name: Option<String>,
    /// Open Graph locale.
    pub locale: String,
    /// String catalog language (`en`, `es`).
    pub language: String,
    /// TOML string table merged over the bundled catalog (relative to the
    /// config file).
    pub strings: Option<PathBuf>,
}

impl SiteConfig {
    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Effective breadcrumb home link.
    #[must_use]
    pub fn home_url(&self) -> String {
        self.home_url
            .clone()
            .unwrap_or_else(|| format!("{}/", self.base_url()))
    }

    /// Effective short site name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.full_name)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_owned(),
            home_url: None,
            full_name: "Folio".to_owned(),
            short_name: None,
            locale: "en_US".to_owned(),
            language: "en".to_owned(),
            strings: None,
        }
    }
}

/// Page source and URL configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// JSON file holding the page records (relative to the config file).
    pub source: PathBuf,
    /// Public URL of a page; `{slug}` is replaced by the page slug.
    pub url_template: String,
    /// Directory of standalone `*.html` documents imported as pages
    /// (relative to the config file).
    pub documents: Option<PathBuf>,
    /// Where an imported document's title comes from.
    pub title_source: TitleSource,
}

/// Element an imported document's title is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSource {
    /// First `<h1>`.
    #[default]
    H1,
    /// `<title>`.
    Title,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("pages.json"),
            url_template: "/static/{slug}.html".to_owned(),
            documents: None,
            title_source: TitleSource::default(),
        }
    }
}

/// Reading-time configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// Reading speed in words per minute.
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// Link-preview configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Image used when a page has none.
    pub default_image: Option<String>,
}

/// Date display configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    /// strftime pattern.
    pub format: String,
    /// Offset from UTC applied before formatting.
    pub utc_offset_minutes: i32,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            format: "%d/%m/%Y".to_owned(),
            utc_offset_minutes: 0,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.site.base_url.clone_from(base_url);
        }
        if let Some(pages_file) = &settings.pages_file {
            self.pages.source.clone_from(pages_file);
        }
        if let Some(documents_dir) = &settings.documents_dir {
            self.pages.documents = Some(documents_dir.clone());
        }
        if let Some(language) = &settings.language {
            self.site.language.clone_from(language);
        }
        if let Some(words_per_minute) = settings.words_per_minute {
            self.reading.words_per_minute = words_per_minute;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let pages = PagesConfig::default();
        Self {
            site: SiteConfig::default(),
            pages: PagesConfig {
                source: base.join(&pages.source),
                ..pages
            },
            reading: ReadingConfig::default(),
            seo: SeoConfig::default(),
            dates: DatesConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.pages.source = config_dir.join(&config.pages.source);
        config.pages.documents = config.pages.documents.map(|dir| config_dir.join(dir));
        config.site.strings = config.site.strings.map(|file| config_dir.join(file));
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_pages()?;

        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be greater than 0".to_owned(),
            ));
        }
        if let Some(ref image) = self.seo.default_image {
            require_non_empty(image, "seo.default_image")?;
        }
        require_non_empty(&self.dates.format, "dates.format")?;

        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_url, "site.base_url")?;
        require_http_url(&self.site.base_url, "site.base_url")?;
        if let Some(ref home_url) = self.site.home_url {
            require_non_empty(home_url, "site.home_url")?;
        }
        require_non_empty(&self.site.full_name, "site.full_name")?;
        require_non_empty(&self.site.locale, "site.locale")?;
        require_non_empty(&self.site.language, "site.language")?;
        Ok(())
    }

    /// Validate page configuration.
    fn validate_pages(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.pages.url_template, "pages.url_template")?;
        if !self.pages.url_template.contains(SLUG_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "pages.url_template must contain {SLUG_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;

        if let Some(ref url) = self.site.home_url {
            self.site.home_url = Some(expand::expand_env(url, "site.home_url")?);
        }

        if let Some(ref image) = self.seo.default_image {
            self.seo.default_image = Some(expand::expand_env(image, "seo.default_image")?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.base_url, "http://localhost");
        assert_eq!(config.site.home_url(), "http://localhost/");
        assert_eq!(config.site.short_name(), "Folio");
        assert_eq!(config.site.language, "en");
        assert_eq!(config.pages.source, PathBuf::from("/test/pages.json"));
        assert_eq!(config.pages.url_template, "/static/{slug}.html");
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.dates.format, "%d/%m/%Y");
        assert!(config.seo.default_image.is_none());
        assert!(config.pages.documents.is_none());
        assert_eq!(config.pages.title_source, TitleSource::H1);
        assert!(config.site.strings.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.full_name, "Folio");
        assert_eq!(config.reading.words_per_minute, 200);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
base_url = "https://example.org/"
home_url = "https://example.org/home"
full_name = "Example Organization"
short_name = "Example"
locale = "es_ES"
language = "es"
strings = "lang/es.toml"

[pages]
source = "data/pages.json"
url_template = "/p/{slug}"
documents = "html"
title_source = "title"

[reading]
words_per_minute = 250

[seo]
default_image = "https://example.org/og.png"

[dates]
format = "%Y-%m-%d"
utc_offset_minutes = 60
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.base_url(), "https://example.org");
        assert_eq!(config.site.home_url(), "https://example.org/home");
        assert_eq!(config.site.short_name(), "Example");
        assert_eq!(config.site.locale, "es_ES");
        assert_eq!(config.site.language, "es");
        assert_eq!(config.pages.source, PathBuf::from("data/pages.json"));
        assert_eq!(config.pages.url_template, "/p/{slug}");
        assert_eq!(config.pages.documents, Some(PathBuf::from("html")));
        assert_eq!(config.pages.title_source, TitleSource::Title);
        assert_eq!(config.site.strings, Some(PathBuf::from("lang/es.toml")));
        assert_eq!(config.reading.words_per_minute, 250);
        assert_eq!(
            config.seo.default_image.as_deref(),
            Some("https://example.org/og.png")
        );
        assert_eq!(config.dates.format, "%Y-%m-%d");
        assert_eq!(config.dates.utc_offset_minutes, 60);
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let toml = r#"
[reading]
words_per_minute = "fast"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_load_resolves_source_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
base_url = "https://example.org"

[pages]
source = "content/pages.json"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.pages.source, dir.path().join("content/pages.json"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_resolves_documents_and_strings_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
strings = "strings.toml"

[pages]
documents = "html"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.pages.documents, Some(dir.path().join("html")));
        assert_eq!(config.site.strings, Some(dir.path().join("strings.toml")));
    }

    #[test]
    fn test_parse_unknown_title_source_fails() {
        let toml = r#"
[pages]
title_source = "h2"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/folio.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\nbase_url = 1").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[pages]\nurl_template = \"/p/\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("pages.url_template"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            base_url: Some("https://cli.test".to_owned()),
            pages_file: Some(PathBuf::from("/tmp/pages.json")),
            documents_dir: Some(PathBuf::from("/tmp/html")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.base_url, "https://cli.test");
        assert_eq!(config.pages.source, PathBuf::from("/tmp/pages.json"));
        assert_eq!(config.pages.documents, Some(PathBuf::from("/tmp/html")));
        assert_eq!(config.site.language, "en"); // Unchanged
        assert_eq!(config.reading.words_per_minute, 200); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_language_and_rate() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            language: Some("es".to_owned()),
            words_per_minute: Some(120),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.language, "es");
        assert_eq!(config.reading.words_per_minute, 120);
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            base_url: Some("ftp://nope".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&overrides));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // Environment variable expansion tests

    #[test]
    fn test_expand_env_vars_site() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_BASE_URL", "https://env.test");
        }

        let toml = r#"
[site]
base_url = "${FOLIO_TEST_BASE_URL}"
home_url = "${FOLIO_TEST_HOME_URL:-https://env.test/start}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.base_url, "https://env.test");
        assert_eq!(config.site.home_url(), "https://env.test/start");

        unsafe {
            std::env::remove_var("FOLIO_TEST_BASE_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_default_image() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_CDN", "https://cdn.test");
        }

        let toml = r#"
[seo]
default_image = "${FOLIO_TEST_CDN}/og.png"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.seo.default_image.as_deref(),
            Some("https://cdn.test/og.png")
        );

        unsafe {
            std::env::remove_var("FOLIO_TEST_CDN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_FOLIO_TEST");
        }

        let toml = r#"
[site]
base_url = "${MISSING_VAR_FOLIO_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_FOLIO_TEST"));
        assert!(err.to_string().contains("site.base_url"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = String::new();
        assert_validation_error(&config, &["site.base_url", "empty"]);
    }

    #[test]
    fn test_validate_base_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "example.org".to_owned();
        assert_validation_error(&config, &["site.base_url", "http://"]);
    }

    #[test]
    fn test_validate_home_url_blank() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.home_url = Some("  ".to_owned());
        assert_validation_error(&config, &["site.home_url"]);
    }

    #[test]
    fn test_validate_template_without_slug() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.pages.url_template = "/pages/".to_owned();
        assert_validation_error(&config, &["pages.url_template", "{slug}"]);
    }

    #[test]
    fn test_validate_words_per_minute_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.reading.words_per_minute = 0;
        assert_validation_error(&config, &["reading.words_per_minute"]);
    }

    #[test]
    fn test_validate_date_format_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.dates.format = String::new();
        assert_validation_error(&config, &["dates.format"]);
    }
}
