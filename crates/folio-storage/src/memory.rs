//! In-memory page store.
//!
//! Backs tests and the CLI preview, which loads pages from a JSON file.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::UNIX_EPOCH;

use crate::document::{TitleSource, page_from_document};
use crate::page::{Page, PageSummary, navigation_order};
use crate::storage::{PageStore, StorageError, StorageErrorKind};

const BACKEND: &str = "Memory";

/// Page store holding all records in memory, keyed by slug.
///
/// # Example
///
/// ```
/// use folio_storage::{MemoryStore, Page, PageStore};
///
/// let store = MemoryStore::new();
/// store.insert(Page::new("about", "About")).unwrap();
///
/// let page = store.find_published("about").unwrap();
/// assert_eq!(page.map(|p| p.title), Some("About".to_owned()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<BTreeMap<String, Page>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a list of pages.
    ///
    /// # Errors
    ///
    /// Returns `StorageErrorKind::AlreadyExists` if two pages share a slug.
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Result<Self, StorageError> {
        let store = Self::new();
        for page in pages {
            store.insert(page)?;
        }
        Ok(store)
    }

    /// Load pages from a JSON file containing an array of page records.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file cannot be read, is not a valid
    /// page array, or contains duplicate slugs.
    pub fn load_json(path: &Path) -> Result<Self, StorageError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StorageError::io(e).with_backend(BACKEND))?;
        let pages: Vec<Page> = serde_json::from_str(&content).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidData)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let count = pages.len();
        let store = Self::from_pages(pages)?;
        tracing::debug!(path = %path.display(), count, "Loaded pages");
        Ok(store)
    }

    /// Import every `*.html` file in `dir` as a page named after the file stem.
    ///
    /// Documents only fill gaps: a slug that already has a record keeps it.
    /// The file modification time becomes the page timestamps. Returns the
    /// number of pages added.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory or a document cannot be read.
    pub fn import_documents(
        &self,
        dir: &Path,
        title_source: TitleSource,
    ) -> Result<usize, StorageError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| StorageError::io(e).with_backend(BACKEND))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
            })
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in &paths {
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let html = std::fs::read_to_string(path)
                .map_err(|e| StorageError::io(e).with_backend(BACKEND).with_slug(slug))?;
            let mut page = page_from_document(slug, &html, title_source);
            if let Some(modified) = modified_secs(path) {
                page = page.with_timestamps(modified, modified);
            }
            documents.push(page);
        }

        let mut pages = self.pages.write().map_err(|_| poisoned())?;
        let mut imported = 0;
        for page in documents {
            match pages.entry(page.slug.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(slug = %page.slug, "Stored record shadows document");
                }
                Entry::Vacant(slot) => {
                    slot.insert(page);
                    imported += 1;
                }
            }
        }

        tracing::debug!(dir = %dir.display(), imported, "Imported documents");
        Ok(imported)
    }

    /// Insert a new page.
    ///
    /// # Errors
    ///
    /// Returns `StorageErrorKind::AlreadyExists` if the slug is taken.
    pub fn insert(&self, page: Page) -> Result<(), StorageError> {
        let mut pages = self.pages.write().map_err(|_| poisoned())?;
        if pages.contains_key(&page.slug) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists)
                .with_backend(BACKEND)
                .with_slug(page.slug));
        }
        pages.insert(page.slug.clone(), page);
        Ok(())
    }

    /// Insert or replace a page.
    ///
    /// # Errors
    ///
    /// Returns `StorageErrorKind::Unavailable` if the lock is poisoned.
    pub fn upsert(&self, page: Page) -> Result<(), StorageError> {
        let mut pages = self.pages.write().map_err(|_| poisoned())?;
        pages.insert(page.slug.clone(), page);
        Ok(())
    }

    /// Remove a page, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageErrorKind::Unavailable` if the lock is poisoned.
    pub fn remove(&self, slug: &str) -> Result<Option<Page>, StorageError> {
        let mut pages = self.pages.write().map_err(|_| poisoned())?;
        Ok(pages.remove(slug))
    }

    /// Number of stored pages, drafts included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Whether the store holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageStore for MemoryStore {
    fn find_published(&self, slug: &str) -> Result<Option<Page>, StorageError> {
        let pages = self.pages.read().map_err(|_| poisoned().with_slug(slug))?;
        Ok(pages.get(slug).filter(|p| p.is_published()).cloned())
    }

    fn navigable_pages(&self) -> Result<Vec<PageSummary>, StorageError> {
        let pages = self.pages.read().map_err(|_| poisoned())?;
        let mut summaries: Vec<PageSummary> = pages
            .values()
            .filter(|p| p.is_navigable())
            .map(PageSummary::from)
            .collect();
        summaries.sort_by(navigation_order);
        Ok(summaries)
    }
}

fn modified_secs(path: &Path) -> Option<i64> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let secs = modified.duration_since(UNIX_EPOCH).ok()?.as_secs();
    i64::try_from(secs).ok()
}

fn poisoned() -> StorageError {
    StorageError::new(StorageErrorKind::Unavailable).with_backend(BACKEND)
}
