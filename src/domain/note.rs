//! Note record held by the catalog.

use crate::infra::UNCATEGORIZED;
use chrono::NaiveDate;
use std::fmt;
use tokio::sync::OnceCell;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptySlug,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptySlug => write!(f, "invalid note: slug cannot be empty"),
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A note discovered from a note source.
///
/// Everything except the body is fixed when the note is built. The body is
/// either known up front (bundled documents) or fetched on first access
/// (remote manifest). `content()` returns `None` until then, which is
/// distinct from an empty document.
///
/// Content moves from unresolved to resolved at most once and is never
/// replaced afterwards.
///
/// # Examples
///
/// ```
/// use noteindex::domain::Note;
///
/// let note = Note::builder("git/collaborate", "git", "Collab", "git/collaborate.md")
///     .body_url(Some("http://x/collab.md"))
///     .build()
///     .unwrap();
/// assert_eq!(note.title(), "Collab");
/// assert_eq!(note.content(), None);
/// ```
pub struct Note {
    slug: String,
    category: String,
    title: String,
    date: Option<NaiveDate>,
    preview: Option<String>,
    source_path: String,
    body_url: Option<String>,
    content: OnceCell<String>,
}

impl Note {
    /// Creates a builder for constructing a note.
    pub fn builder(
        slug: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        source_path: impl Into<String>,
    ) -> NoteBuilder {
        NoteBuilder::new(slug, category, title, source_path)
    }

    /// Returns the note's unique slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the note's category (never empty).
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's calendar date, if known.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the date formatted as `YYYY-MM-DD`.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Returns the short excerpt, if one was supplied or requested.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Returns the path the note was discovered at.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Returns the URL the body is fetched from, for lazily resolved notes.
    pub fn body_url(&self) -> Option<&str> {
        self.body_url.as_deref()
    }

    /// Returns the body text, or `None` if it has not been resolved yet.
    pub fn content(&self) -> Option<&str> {
        self.content.get().map(String::as_str)
    }

    /// Returns true once the body is known.
    pub fn is_resolved(&self) -> bool {
        self.content.initialized()
    }

    pub(crate) fn content_cell(&self) -> &OnceCell<String> {
        &self.content
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.slug)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("slug", &self.slug)
            .field("category", &self.category)
            .field("title", &self.title)
            .field("date", &self.date)
            .field("source_path", &self.source_path)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Builder for constructing notes with optional fields.
pub struct NoteBuilder {
    slug: String,
    category: String,
    title: String,
    date: Option<NaiveDate>,
    preview: Option<String>,
    source_path: String,
    body_url: Option<String>,
    content: Option<String>,
}

impl NoteBuilder {
    fn new(
        slug: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            category: category.into(),
            title: title.into(),
            date: None,
            preview: None,
            source_path: source_path.into(),
            body_url: None,
            content: None,
        }
    }

    /// Sets the calendar date.
    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Sets the preview excerpt.
    pub fn preview(mut self, preview: Option<impl Into<String>>) -> Self {
        self.preview = preview.map(Into::into);
        self
    }

    /// Sets the URL used to fetch the body later.
    pub fn body_url(mut self, url: Option<impl Into<String>>) -> Self {
        self.body_url = url.map(Into::into);
        self
    }

    /// Sets a body that is already known.
    pub fn content(mut self, content: Option<impl Into<String>>) -> Self {
        self.content = content.map(Into::into);
        self
    }

    /// Builds the note.
    ///
    /// A blank category becomes `Uncategorized`. A blank title falls back to
    /// the last segment of the slug.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the slug is empty.
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let slug = self.slug.trim().to_string();
        if slug.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptySlug,
            });
        }

        let category = match self.category.trim() {
            "" => UNCATEGORIZED.to_string(),
            c => c.to_string(),
        };

        let title = match self.title.trim() {
            "" => slug.rsplit('/').next().unwrap_or(&slug).to_string(),
            t => t.to_string(),
        };

        Ok(Note {
            slug,
            category,
            title,
            date: self.date,
            preview: self.preview,
            source_path: self.source_path,
            body_url: self.body_url,
            content: OnceCell::new_with(self.content),
        })
    }
}
