//! Source backed by a remote manifest with lazily fetched bodies.

use super::{EntryBody, Listing, MalformedEntry, NoteSource, SourceEntry, SourceError};
use crate::infra::{Fetch, HttpFetcher};
use crate::manifest::{Manifest, ManifestNote};
use async_trait::async_trait;
use std::sync::Arc;

/// A source that lists notes from a manifest URL.
///
/// `list` fetches and parses the manifest once; entries carry their body URL
/// rather than the body. `resolve_body` fetches a single body on demand.
#[derive(Clone)]
pub struct RemoteManifestSource {
    manifest_url: String,
    fetcher: Arc<dyn Fetch>,
}

impl RemoteManifestSource {
    /// Creates a source that fetches through `fetcher`.
    pub fn new(manifest_url: impl Into<String>, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            manifest_url: manifest_url.into(),
            fetcher,
        }
    }

    /// Creates a source that fetches over HTTP.
    pub fn over_http(manifest_url: impl Into<String>) -> Self {
        Self::new(manifest_url, Arc::new(HttpFetcher::new()))
    }

    /// Returns the manifest URL.
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }
}

impl std::fmt::Debug for RemoteManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteManifestSource")
            .field("manifest_url", &self.manifest_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NoteSource for RemoteManifestSource {
    fn describe(&self) -> String {
        format!("manifest {}", self.manifest_url)
    }

    async fn list(&self) -> Result<Listing, SourceError> {
        let text = self
            .fetcher
            .get_text(&self.manifest_url)
            .await
            .map_err(|e| SourceError::unavailable(self.manifest_url.clone(), e))?;

        let manifest = Manifest::from_xml(&text)
            .map_err(|e| SourceError::unavailable(self.manifest_url.clone(), e))?;

        let mut listing = Listing::default();
        for (position, note) in manifest.notes.into_iter().enumerate() {
            match to_entry(note) {
                Ok(entry) => listing.entries.push(entry),
                Err((path, reason)) => {
                    tracing::warn!(position, ?path, reason, "skipping manifest entry");
                    listing.malformed.push(MalformedEntry {
                        position,
                        path,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            url = %self.manifest_url,
            entries = listing.entries.len(),
            malformed = listing.malformed.len(),
            "listed manifest"
        );
        Ok(listing)
    }

    async fn resolve_body(&self, body: &EntryBody) -> Result<String, SourceError> {
        match body {
            EntryBody::Inline(text) => Ok(text.clone()),
            EntryBody::Remote(url) => self
                .fetcher
                .get_text(url)
                .await
                .map_err(|e| SourceError::content(url.clone(), e)),
        }
    }
}

/// Converts a manifest record into an entry, or explains why it is unusable.
fn to_entry(note: ManifestNote) -> Result<SourceEntry, (Option<String>, &'static str)> {
    let date = note.date();
    let Some(path) = non_blank(note.path) else {
        return Err((None, "missing path"));
    };
    let Some(url) = non_blank(note.url) else {
        return Err((Some(path), "missing url"));
    };

    Ok(SourceEntry {
        path,
        title: non_blank(note.title),
        category: non_blank(note.category),
        date,
        body: EntryBody::Remote(url),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
