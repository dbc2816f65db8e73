//! Slug and category derivation from document paths.

/// Category assigned to documents that sit directly in the notes root.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Extension stripped from document paths when deriving slugs.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Identity of a note as derived from its source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteIdentity {
    pub slug: String,
    pub category: String,
}

/// Derives a slug and category from a document path.
///
/// - Strips `root_prefix` (and any leading `/`) if present
/// - Documents in the root get the `Uncategorized` category
/// - Otherwise the first path segment is the category
/// - The slug is the remaining path with the `.md` extension removed
///   (case-insensitive); separators are kept
///
/// # Examples
///
/// ```
/// use noteindex::infra::{derive_identity, UNCATEGORIZED};
///
/// let id = derive_identity("/notes/git/collaborate.md", "/notes/");
/// assert_eq!(id.slug, "git/collaborate");
/// assert_eq!(id.category, "git");
///
/// let id = derive_identity("readme.MD", "");
/// assert_eq!(id.slug, "readme");
/// assert_eq!(id.category, UNCATEGORIZED);
/// ```
pub fn derive_identity(path: &str, root_prefix: &str) -> NoteIdentity {
    let relative = path
        .strip_prefix(root_prefix)
        .unwrap_or(path)
        .trim_start_matches('/');

    let category = match relative.split_once('/') {
        Some((first, _)) if !first.is_empty() => first.to_string(),
        _ => UNCATEGORIZED.to_string(),
    };

    NoteIdentity {
        slug: strip_document_extension(relative).to_string(),
        category,
    }
}

/// Returns the file name of `path` without the document extension.
///
/// ```
/// use noteindex::infra::file_stem;
///
/// assert_eq!(file_stem("git/collaborate.md"), "collaborate");
/// assert_eq!(file_stem("notes.txt"), "notes.txt");
/// ```
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    strip_document_extension(name)
}

/// Removes a trailing `.md` from the final path segment only.
fn strip_document_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    let name = &path[name_start..];

    match name.rfind('.') {
        Some(dot) if dot > 0 && name[dot + 1..].eq_ignore_ascii_case(DOCUMENT_EXTENSION) => {
            &path[..name_start + dot]
        }
        _ => path,
    }
}
