//! Note sources: providers of raw documents for the catalog.
//!
//! A source lists entries once per discovery pass and resolves bodies on
//! request. Bundled sources carry every body inline; remote sources list
//! metadata from a manifest and fetch each body separately.

mod bundled;
mod remote;

pub use bundled::BundledSource;
pub use remote::RemoteManifestSource;

use crate::infra::{FetchError, FsError};
use crate::manifest::ManifestError;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Where an entry's body lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    /// The raw document text, already in memory.
    Inline(String),
    /// A URL the body must be fetched from.
    Remote(String),
}

/// A raw document as listed by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub body: EntryBody,
}

impl SourceEntry {
    /// Creates an entry with an inline body and no source-supplied metadata.
    pub fn inline(path: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            category: None,
            date: None,
            body: EntryBody::Inline(raw.into()),
        }
    }
}

/// An entry that was skipped during listing or note construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    /// Zero-based position of the entry in discovery order.
    pub position: usize,
    /// Path of the entry, when it had one.
    pub path: Option<String>,
    pub reason: String,
}

/// Result of listing a source.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<SourceEntry>,
    pub malformed: Vec<MalformedEntry>,
}

/// Underlying cause of a source failure.
#[derive(Debug, Error)]
pub enum SourceCause {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by note sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The listing could not be produced; nothing can be shown.
    #[error("note source unavailable: {origin}")]
    SourceUnavailable {
        origin: String,
        #[source]
        cause: SourceCause,
    },

    /// One note's body could not be fetched; other notes are unaffected.
    #[error("content unavailable: {location}")]
    ContentUnavailable {
        location: String,
        #[source]
        cause: SourceCause,
    },
}

impl SourceError {
    pub(crate) fn unavailable(origin: impl Into<String>, cause: impl Into<SourceCause>) -> Self {
        SourceError::SourceUnavailable {
            origin: origin.into(),
            cause: cause.into(),
        }
    }

    pub(crate) fn content(location: impl Into<String>, cause: impl Into<SourceCause>) -> Self {
        SourceError::ContentUnavailable {
            location: location.into(),
            cause: cause.into(),
        }
    }
}

/// A provider of raw documents.
///
/// `list` is called once per discovery pass. `resolve_body` is called at
/// most once per note by the catalog, the first time its content is needed.
#[async_trait]
pub trait NoteSource: Send + Sync {
    /// Short human-readable description used in logs and errors.
    fn describe(&self) -> String;

    /// Lists every entry the source knows about.
    async fn list(&self) -> Result<Listing, SourceError>;

    /// Produces the body for an entry.
    ///
    /// Inline bodies are returned as-is. Sources that cannot fetch remote
    /// bodies report `ContentUnavailable`.
    async fn resolve_body(&self, body: &EntryBody) -> Result<String, SourceError> {
        match body {
            EntryBody::Inline(text) => Ok(text.clone()),
            EntryBody::Remote(location) => Err(SourceError::content(
                location.clone(),
                SourceCause::Other(format!("{} cannot fetch remote bodies", self.describe())),
            )),
        }
    }
}
