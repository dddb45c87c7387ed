//! CLI error types.

use folio_config::ConfigError;
use folio_renderer::CatalogError;
use folio_site::ViewError;
use folio_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    View(#[from] ViewError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),
}
