//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod slugify;

pub(crate) use list::ListArgs;
pub(crate) use render::RenderArgs;
pub(crate) use slugify::SlugifyArgs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config, TitleSource};
use folio_renderer::{Catalog, SiteInfo, StrftimeFormatter};
use folio_site::{PageView, ViewConfig};
use folio_storage::MemoryStore;
use folio_storage::TitleSource as DocumentTitle;

use crate::error::CliError;

/// Options shared by commands that read pages.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON page file (overrides config).
    #[arg(short, long, env = "FOLIO_PAGES")]
    pages: Option<PathBuf>,

    /// Site base URL (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Directory of standalone HTML documents to import (overrides config).
    #[arg(short, long)]
    documents: Option<PathBuf>,

    /// String catalog language, `en` or `es` (overrides config).
    #[arg(short, long)]
    language: Option<String>,

    /// Reading speed for reading-time estimates (overrides config).
    #[arg(long)]
    words_per_minute: Option<u32>,
}

impl SourceArgs {
    /// Load configuration with these overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            pages_file: self.pages.clone(),
            documents_dir: self.documents.clone(),
            language: self.language.clone(),
            words_per_minute: self.words_per_minute,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Site settings described by the configuration.
pub(crate) fn site_info(config: &Config) -> SiteInfo {
    SiteInfo {
        base_url: config.site.base_url().to_owned(),
        home_url: config.site.home_url(),
        full_name: config.site.full_name.clone(),
        short_name: config.site.short_name().to_owned(),
        locale: config.site.locale.clone(),
    }
}

/// Load the page file named by the configuration, then any HTML documents.
pub(crate) fn load_store(config: &Config) -> Result<MemoryStore, CliError> {
    let store = MemoryStore::load_json(&config.pages.source)?;
    tracing::info!(
        path = %config.pages.source.display(),
        pages = store.len(),
        "Loaded page file"
    );

    if let Some(dir) = &config.pages.documents {
        let title_source = match config.pages.title_source {
            TitleSource::H1 => DocumentTitle::H1,
            TitleSource::Title => DocumentTitle::Title,
        };
        let imported = store.import_documents(dir, title_source)?;
        tracing::info!(path = %dir.display(), pages = imported, "Imported documents");
    }

    Ok(store)
}

/// Bundled catalog for the configured language, with the optional string
/// file laid over it.
fn load_strings(config: &Config) -> Result<Catalog, CliError> {
    let bundled = Catalog::bundled(&config.site.language)?;
    Ok(match &config.site.strings {
        Some(path) => bundled.merged(Catalog::load(path)?),
        None => bundled,
    })
}

/// Build a page view over the configured page file.
pub(crate) fn load_view(config: &Config) -> Result<PageView, CliError> {
    let store = load_store(config)?;
    let strings = load_strings(config)?;
    let dates = StrftimeFormatter::new(config.dates.format.clone())
        .with_offset_minutes(config.dates.utc_offset_minutes);

    Ok(PageView::new(Arc::new(store), site_info(config))
        .with_strings(Arc::new(strings))
        .with_dates(Arc::new(dates))
        .with_config(ViewConfig {
            url_template: config.pages.url_template.clone(),
            words_per_minute: config.reading.words_per_minute,
            default_image: config.seo.default_image.clone(),
        }))
}
