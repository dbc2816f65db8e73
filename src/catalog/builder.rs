//! Turns a source listing into the catalog's note set.

use crate::domain::Note;
use crate::infra::{Metadata, derive_identity, file_stem, parse_frontmatter};
use crate::source::{EntryBody, Listing, MalformedEntry, SourceEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

// ===========================================
// Options and Reports
// ===========================================

/// Settings applied while building notes from source entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Prefix stripped from entry paths before deriving slugs.
    pub root_prefix: String,
    /// When set, notes with a known body and no supplied preview get the
    /// first this-many characters of the body as a preview.
    pub preview_chars: Option<usize>,
}

/// Two entries that derived the same slug. The later entry is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    pub kept: String,
    pub replaced: String,
}

/// Outcome of the last discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Number of notes in the catalog after the pass.
    pub loaded: usize,
    /// Entries skipped by the source or during note construction.
    pub malformed: Vec<MalformedEntry>,
    pub collisions: Vec<SlugCollision>,
}

// ===========================================
// NoteSet
// ===========================================

/// Notes in discovery order with a slug index.
///
/// The sorted category list is derived on first use and lives as long as the
/// set, so replacing the set drops it too.
#[derive(Debug, Default)]
pub(crate) struct NoteSet {
    notes: Vec<Arc<Note>>,
    by_slug: HashMap<String, usize>,
    categories: OnceLock<Arc<[String]>>,
}

impl NoteSet {
    /// Inserts a note, replacing (in place) any note with the same slug.
    ///
    /// Returns the replaced note.
    fn insert(&mut self, note: Note) -> Option<Arc<Note>> {
        let note = Arc::new(note);
        match self.by_slug.get(note.slug()) {
            Some(&idx) => Some(std::mem::replace(&mut self.notes[idx], note)),
            None => {
                self.by_slug.insert(note.slug().to_string(), self.notes.len());
                self.notes.push(note);
                None
            }
        }
    }

    pub(crate) fn get(&self, slug: &str) -> Option<&Arc<Note>> {
        self.by_slug.get(slug).map(|&idx| &self.notes[idx])
    }

    pub(crate) fn all(&self) -> &[Arc<Note>] {
        &self.notes
    }

    pub(crate) fn len(&self) -> usize {
        self.notes.len()
    }

    /// Distinct categories, sorted.
    pub(crate) fn categories(&self) -> Arc<[String]> {
        let categories = self.categories.get_or_init(|| {
            self.notes
                .iter()
                .map(|n| n.category().to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        });
        Arc::clone(categories)
    }
}

// ===========================================
// Build Pass
// ===========================================

/// Builds notes from every listed entry.
///
/// Malformed entries reported by the source are carried into the report;
/// entries that cannot form a note (empty slug) are added to them.
pub(crate) fn build_notes(listing: Listing, options: &CatalogOptions) -> (NoteSet, DiscoveryReport) {
    let mut set = NoteSet::default();
    let mut report = DiscoveryReport {
        malformed: listing.malformed,
        ..Default::default()
    };

    for (position, entry) in listing.entries.into_iter().enumerate() {
        let path = entry.path.clone();
        match build_note(entry, options) {
            Some(note) => {
                let kept = note.source_path().to_string();
                if let Some(replaced) = set.insert(note) {
                    tracing::warn!(
                        slug = replaced.slug(),
                        kept = %kept,
                        replaced = replaced.source_path(),
                        "duplicate slug, keeping later entry"
                    );
                    report.collisions.push(SlugCollision {
                        slug: replaced.slug().to_string(),
                        kept,
                        replaced: replaced.source_path().to_string(),
                    });
                }
            }
            None => {
                tracing::warn!(path = %path, "entry does not produce a slug");
                report.malformed.push(MalformedEntry {
                    position,
                    path: Some(path),
                    reason: "empty slug".to_string(),
                });
            }
        }
    }

    report.loaded = set.len();
    (set, report)
}

fn build_note(entry: SourceEntry, options: &CatalogOptions) -> Option<Note> {
    let identity = derive_identity(&entry.path, &options.root_prefix);

    let (metadata, content, body_url) = match entry.body {
        EntryBody::Inline(raw) => {
            let parsed = parse_frontmatter(&raw);
            (parsed.metadata, Some(parsed.body), None)
        }
        EntryBody::Remote(url) => (Metadata::new(), None, Some(url)),
    };

    let title = first_non_blank([
        metadata.get("title").map(String::as_str),
        entry.title.as_deref(),
        Some(file_stem(&entry.path)),
    ])
    .unwrap_or_default()
    .to_string();

    let category = first_non_blank([entry.category.as_deref(), Some(identity.category.as_str())])
        .unwrap_or_default()
        .to_string();

    let date = metadata
        .get("date")
        .and_then(|d| parse_calendar_date(d))
        .or(entry.date);

    let preview = first_non_blank([
        metadata.get("preview").map(String::as_str),
        metadata.get("description").map(String::as_str),
    ])
    .map(str::to_string)
    .or_else(|| {
        let limit = options.preview_chars?;
        content.as_deref().map(|body| excerpt(body, limit))
    })
    .filter(|p| !p.is_empty());

    Note::builder(identity.slug, category, title, entry.path)
        .date(date)
        .preview(preview)
        .body_url(body_url)
        .content(content)
        .build()
        .ok()
}

fn first_non_blank<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Parses a metadata date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, RFC 3339 timestamps and
/// `YYYY-MM-DD HH:MM[:SS]`. Anything else yields `None`.
pub(crate) fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    None
}

/// Collapses whitespace and cuts to `limit` characters, marking the cut.
fn excerpt(body: &str, limit: usize) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= limit {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(limit).collect();
    format!("{}…", cut.trim_end())
}
