//! File I/O, frontmatter parsing, identifiers and HTTP fetching

mod frontmatter;
mod fs;
mod http;
mod slug;

pub use frontmatter::{Frontmatter, Metadata, parse as parse_frontmatter};
pub use fs::{FsError, read_document, scan_notes_directory, to_slash_path};
pub(crate) use fs::{ensure_directory, has_md_extension, is_hidden};
pub use http::{Fetch, FetchError, HttpFetcher};
pub use slug::{DOCUMENT_EXTENSION, NoteIdentity, UNCATEGORIZED, derive_identity, file_stem};
