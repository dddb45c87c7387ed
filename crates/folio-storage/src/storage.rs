//! Storage trait and error types.
//!
//! The page helpers never fetch data themselves. A [`PageStore`] resolves a
//! page by slug and lists the pages taking part in navigation; the host
//! application implements it on top of its database.

use crate::page::{Page, PageSummary};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Resource already exists (for create operations).
    AlreadyExists,
    /// Stored data could not be decoded.
    InvalidData,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Page slug context (if applicable).
    pub slug: Option<String>,
    /// Backend identifier (e.g., "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            slug: None,
            backend: None,
            source: None,
        }
    }

    /// Attach slug context.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        Self::new(kind).with_source(err)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (slug: about)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::AlreadyExists => "Already exists",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(slug) = &self.slug {
            write!(f, " (slug: {slug})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to page records.
pub trait PageStore: Send + Sync {
    /// Find a published page by slug.
    ///
    /// Returns `Ok(None)` when no published page has this slug; drafts are
    /// never returned.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn find_published(&self, slug: &str) -> Result<Option<Page>, StorageError>;

    /// List published, navigation-visible pages in navigation order
    /// (sort order ascending, then title ascending).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn navigable_pages(&self) -> Result<Vec<PageSummary>, StorageError>;
}
