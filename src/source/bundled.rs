//! Source over documents that are already in memory.

use super::{Listing, MalformedEntry, NoteSource, SourceEntry, SourceError};
use crate::infra::{FsError, read_document, scan_notes_directory, to_slash_path};
use async_trait::async_trait;
use std::path::Path;

/// A source whose documents are all available at construction time.
///
/// Listing never suspends on I/O and every entry carries its body inline, so
/// notes from this source are resolved as soon as the catalog is loaded.
#[derive(Debug, Clone, Default)]
pub struct BundledSource {
    documents: Vec<(String, String)>,
    unreadable: Vec<(String, String)>,
}

impl BundledSource {
    /// Creates a source from `(path, raw text)` pairs, kept in the given order.
    pub fn new<P, T>(documents: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(p, t)| (p.into(), t.into()))
                .collect(),
            unreadable: Vec::new(),
        }
    }

    /// Loads every markdown document under `root`.
    ///
    /// Paths are recorded relative to `root` with `/` separators, so they
    /// derive identifiers with an empty root prefix. Files that cannot be
    /// read are reported as malformed entries when the source is listed.
    ///
    /// # Errors
    ///
    /// Returns `FsError` if `root` is missing or not a directory.
    pub fn from_dir(root: &Path) -> Result<Self, FsError> {
        let mut source = Self::default();

        for relative in scan_notes_directory(root)? {
            let path = to_slash_path(&relative);
            match read_document(&root.join(&relative)) {
                Ok(text) => source.documents.push((path, text)),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "skipping unreadable document");
                    source.unreadable.push((path, e.to_string()));
                }
            }
        }

        tracing::debug!(
            root = %root.display(),
            documents = source.documents.len(),
            "loaded bundled documents"
        );
        Ok(source)
    }

    /// Returns the number of readable documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl NoteSource for BundledSource {
    fn describe(&self) -> String {
        format!("bundled source ({} documents)", self.documents.len())
    }

    async fn list(&self) -> Result<Listing, SourceError> {
        let mut listing = Listing::default();

        for (position, (path, text)) in self.documents.iter().enumerate() {
            if path.trim().is_empty() {
                listing.malformed.push(MalformedEntry {
                    position,
                    path: None,
                    reason: "missing path".to_string(),
                });
                continue;
            }
            listing.entries.push(SourceEntry::inline(path.clone(), text.clone()));
        }

        let offset = self.documents.len();
        for (i, (path, reason)) in self.unreadable.iter().enumerate() {
            listing.malformed.push(MalformedEntry {
                position: offset + i,
                path: Some(path.clone()),
                reason: reason.clone(),
            });
        }

        Ok(listing)
    }
}
