//! Note catalog: discovery, lookups and lazy content resolution.

mod builder;

pub use builder::{CatalogOptions, DiscoveryReport, SlugCollision};

use crate::domain::Note;
use crate::source::{EntryBody, NoteSource, SourceCause, SourceError};
use builder::{NoteSet, build_notes};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::instrument;

/// Lifecycle of a catalog.
///
/// `Loaded` is terminal until an explicit reload. `Failed` can be retried by
/// calling `ensure_loaded` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for CatalogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CatalogState::Unloaded => "unloaded",
            CatalogState::Loading => "loading",
            CatalogState::Loaded => "loaded",
            CatalogState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Ordering applied to query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Order in which the source listed the notes.
    #[default]
    Discovery,
    /// Newest first; notes without a date last.
    DateDesc,
    /// Case-insensitive by title.
    Title,
}

/// Errors from slug-based catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("note not found: '{slug}'")]
    NotFound { slug: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

struct Inner {
    state: CatalogState,
    notes: Arc<NoteSet>,
    report: DiscoveryReport,
    last_error: Option<Arc<SourceError>>,
}

/// A queryable collection of notes discovered from a `NoteSource`.
///
/// Construct one per process and share it by reference. Discovery happens on
/// the first `ensure_loaded` call; concurrent callers share a single pass.
/// Bodies of lazily sourced notes are fetched by `resolve_content`, once per
/// note.
///
/// # Examples
///
/// ```
/// use noteindex::catalog::Catalog;
/// use noteindex::source::BundledSource;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = BundledSource::new([("git/collaborate.md", "---\ntitle: Collab\n---\nBody")]);
/// let catalog = Catalog::new(source);
/// catalog.ensure_loaded().await;
///
/// let note = catalog.get_by_slug("git/collaborate").unwrap();
/// assert_eq!(note.title(), "Collab");
/// assert_eq!(catalog.categories(), vec!["git".to_string()]);
/// # }
/// ```
pub struct Catalog {
    source: Arc<dyn NoteSource>,
    options: CatalogOptions,
    discovery: tokio::sync::Mutex<()>,
    completed_passes: AtomicU64,
    inner: RwLock<Inner>,
}

impl Catalog {
    /// Creates an unloaded catalog with default options.
    pub fn new<S: NoteSource + 'static>(source: S) -> Self {
        Self::with_options(Arc::new(source), CatalogOptions::default())
    }

    /// Creates an unloaded catalog over a shared source.
    pub fn with_options(source: Arc<dyn NoteSource>, options: CatalogOptions) -> Self {
        Self {
            source,
            options,
            discovery: tokio::sync::Mutex::new(()),
            completed_passes: AtomicU64::new(0),
            inner: RwLock::new(Inner {
                state: CatalogState::Unloaded,
                notes: Arc::new(NoteSet::default()),
                report: DiscoveryReport::default(),
                last_error: None,
            }),
        }
    }

    // ===========================================
    // Lifecycle
    // ===========================================

    /// Loads the catalog unless it is already loaded.
    ///
    /// A caller arriving while a discovery pass is in flight waits for that
    /// pass and observes its result instead of starting another one. After a
    /// failure, the next call retries. Failures are recorded, not returned;
    /// inspect `state()` and `last_error()`.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn ensure_loaded(&self) -> CatalogState {
        let observed = self.completed_passes.load(Ordering::Acquire);
        if self.state() == CatalogState::Loaded {
            return CatalogState::Loaded;
        }

        let _guard = self.discovery.lock().await;
        let state = self.state();
        if state == CatalogState::Loaded || self.completed_passes.load(Ordering::Acquire) != observed
        {
            return state;
        }

        self.discover().await
    }

    /// Discards the current notes and runs a new discovery pass.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn reload(&self) -> CatalogState {
        let _guard = self.discovery.lock().await;
        self.discover().await
    }

    /// Runs one discovery pass. Callers hold the discovery lock.
    async fn discover(&self) -> CatalogState {
        self.inner.write().state = CatalogState::Loading;

        let state = match self.source.list().await {
            Ok(listing) => {
                let (notes, report) = build_notes(listing, &self.options);
                tracing::info!(
                    loaded = report.loaded,
                    malformed = report.malformed.len(),
                    collisions = report.collisions.len(),
                    "catalog loaded"
                );
                self.replace_notes(notes, report, None, CatalogState::Loaded)
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog discovery failed");
                self.replace_notes(
                    NoteSet::default(),
                    DiscoveryReport::default(),
                    Some(Arc::new(e)),
                    CatalogState::Failed,
                )
            }
        };

        self.completed_passes.fetch_add(1, Ordering::Release);
        state
    }

    fn replace_notes(
        &self,
        notes: NoteSet,
        report: DiscoveryReport,
        error: Option<Arc<SourceError>>,
        state: CatalogState,
    ) -> CatalogState {
        let mut inner = self.inner.write();
        inner.notes = Arc::new(notes);
        inner.report = report;
        inner.last_error = error;
        inner.state = state;
        state
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> CatalogState {
        self.inner.read().state
    }

    /// Returns true while a discovery pass is in flight.
    pub fn is_loading(&self) -> bool {
        self.state() == CatalogState::Loading
    }

    /// Returns the error of the last failed discovery pass, if the catalog is
    /// currently failed.
    pub fn last_error(&self) -> Option<Arc<SourceError>> {
        self.inner.read().last_error.clone()
    }

    /// Returns the report of the last discovery pass.
    pub fn report(&self) -> DiscoveryReport {
        self.inner.read().report.clone()
    }

    // ===========================================
    // Queries
    // ===========================================

    fn snapshot(&self) -> Arc<NoteSet> {
        Arc::clone(&self.inner.read().notes)
    }

    /// Returns every note in discovery order.
    pub fn notes(&self) -> Vec<Arc<Note>> {
        self.snapshot().all().to_vec()
    }

    /// Returns the number of notes.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a note by exact slug.
    pub fn get_by_slug(&self, slug: &str) -> Option<Arc<Note>> {
        self.snapshot().get(slug).cloned()
    }

    /// Returns notes in `category`, or every note when `category` is `None`
    /// or empty. Results keep discovery order.
    pub fn get_by_category(&self, category: Option<&str>) -> Vec<Arc<Note>> {
        let notes = self.snapshot();
        match category.filter(|c| !c.is_empty()) {
            None => notes.all().to_vec(),
            Some(category) => notes
                .all()
                .iter()
                .filter(|n| n.category() == category)
                .cloned()
                .collect(),
        }
    }

    /// Same as `get_by_category`, sorted by `order`.
    pub fn get_by_category_sorted(&self, category: Option<&str>, order: SortOrder) -> Vec<Arc<Note>> {
        let mut notes = self.get_by_category(category);
        sort_notes(&mut notes, order);
        notes
    }

    /// Returns the distinct categories, sorted.
    ///
    /// The list is computed on first read after the notes change and cached
    /// with them.
    pub fn categories(&self) -> Vec<String> {
        self.snapshot().categories().to_vec()
    }

    // ===========================================
    // Content
    // ===========================================

    /// Returns the note's body, fetching it from the source on first use.
    ///
    /// Notes whose content is already known return immediately. Concurrent
    /// calls for the same note share one fetch. On failure the note stays
    /// unresolved and a later call retries.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::ContentUnavailable` if the body cannot be
    /// fetched.
    pub async fn resolve_content<'n>(&self, note: &'n Note) -> Result<&'n str, SourceError> {
        if let Some(content) = note.content() {
            return Ok(content);
        }

        let Some(url) = note.body_url() else {
            return Err(SourceError::content(
                note.source_path(),
                SourceCause::Other("note has no body location".to_string()),
            ));
        };

        let body = EntryBody::Remote(url.to_string());
        let content = note
            .content_cell()
            .get_or_try_init(|| async {
                tracing::debug!(slug = note.slug(), url, "resolving note content");
                self.source.resolve_body(&body).await
            })
            .await
            .inspect_err(|e| tracing::warn!(slug = note.slug(), error = %e, "content fetch failed"))?;

        Ok(content.as_str())
    }

    /// Looks up a note by slug and resolves its content.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown slug and
    /// `CatalogError::Source` if the body cannot be fetched.
    pub async fn open(&self, slug: &str) -> Result<Arc<Note>, CatalogError> {
        let note = self.get_by_slug(slug).ok_or_else(|| CatalogError::NotFound {
            slug: slug.to_string(),
        })?;
        self.resolve_content(&note).await?;
        Ok(note)
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("source", &self.source.describe())
            .field("state", &self.state())
            .field("notes", &self.len())
            .finish()
    }
}

/// Sorts notes in place. Sorting is stable, so ties keep discovery order.
pub fn sort_notes(notes: &mut [Arc<Note>], order: SortOrder) {
    match order {
        SortOrder::Discovery => {}
        SortOrder::DateDesc => notes.sort_by(|a, b| match (a.date(), b.date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortOrder::Title => notes.sort_by_cached_key(|n| n.title().to_lowercase()),
    }
}
