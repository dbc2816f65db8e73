//! Builds a manifest from a notes directory.

use super::{Manifest, ManifestNote};
use crate::infra::{FsError, ensure_directory, file_stem, has_md_extension, is_hidden, to_slash_path};
use std::path::Path;
use std::time::UNIX_EPOCH;
use walkdir::{DirEntry, WalkDir};

/// Top-level names never treated as notes or categories.
pub const EXCLUDED_NAMES: &[&str] = &[
    "blog.xml",
    "config.yaml",
    "config.toml",
    "install.sh",
    "update.sh",
    "venv",
    "main.py",
    "package.json",
    "package-lock.json",
    "node_modules",
    "dist",
    "public",
    "target",
];

/// Generates a manifest for the notes under `root`.
///
/// Markdown files directly in `root` are uncategorized. Markdown files one
/// level down take their directory name as category; deeper files are not
/// listed. Hidden entries and `EXCLUDED_NAMES` at the top level are skipped.
/// Entries are listed in file-name order.
///
/// Each entry's URL is `content_url` joined with its relative path.
///
/// # Errors
///
/// Returns `FsError` if `root` is not a readable directory or a file's
/// metadata cannot be read.
pub fn generate(root: &Path, content_url: &str) -> Result<Manifest, FsError> {
    ensure_directory(root)?;

    let base = if content_url.ends_with('/') {
        content_url.to_string()
    } else {
        format!("{content_url}/")
    };

    let mut manifest = Manifest::default();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !(e.depth() == 1 && is_excluded(e)));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            FsError::from_io(&path, e.into())
        })?;

        if !entry.file_type().is_file() || !has_md_extension(&entry) {
            continue;
        }

        let relative = to_slash_path(entry.path().strip_prefix(root).unwrap_or(entry.path()));
        let category = match relative.split_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => String::new(),
        };

        let modified = entry
            .metadata()
            .map_err(|e| FsError::from_io(entry.path(), e.into()))?
            .modified()
            .map_err(|e| FsError::from_io(entry.path(), e))?;
        let mtime = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        manifest.notes.push(ManifestNote {
            title: Some(file_stem(&relative).to_string()),
            mtime: Some(mtime.to_string()),
            url: Some(format!("{base}{relative}")),
            path: Some(relative),
            category: Some(category),
        });
    }

    tracing::info!(root = %root.display(), notes = manifest.notes.len(), "generated manifest");
    Ok(manifest)
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| EXCLUDED_NAMES.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str) {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "# note").unwrap();
    }

    fn paths(manifest: &Manifest) -> Vec<&str> {
        manifest
            .notes
            .iter()
            .filter_map(|n| n.path.as_deref())
            .collect()
    }

    #[test]
    fn lists_root_and_category_notes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "about.md");
        write(&dir, "git/collaborate.md");
        write(&dir, "git/merge.md");

        let manifest = generate(dir.path(), "https://example.com/notes").unwrap();
        assert_eq!(
            paths(&manifest),
            vec!["about.md", "git/collaborate.md", "git/merge.md"]
        );

        let about = &manifest.notes[0];
        assert_eq!(about.title.as_deref(), Some("about"));
        assert_eq!(about.category.as_deref(), Some(""));
        assert_eq!(
            about.url.as_deref(),
            Some("https://example.com/notes/about.md")
        );

        let collab = &manifest.notes[1];
        assert_eq!(collab.title.as_deref(), Some("collaborate"));
        assert_eq!(collab.category.as_deref(), Some("git"));
        assert_eq!(
            collab.url.as_deref(),
            Some("https://example.com/notes/git/collaborate.md")
        );
    }

    #[test]
    fn content_url_with_trailing_slash_is_not_doubled() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md");

        let manifest = generate(dir.path(), "http://x/").unwrap();
        assert_eq!(manifest.notes[0].url.as_deref(), Some("http://x/a.md"));
    }

    #[test]
    fn mtime_is_recent_epoch_seconds() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md");

        let manifest = generate(dir.path(), "http://x").unwrap();
        let mtime: f64 = manifest.notes[0].mtime.as_deref().unwrap().parse().unwrap();
        assert!(mtime > 1_600_000_000.0);
        assert!(manifest.notes[0].date().is_some());
    }

    #[test]
    fn skips_hidden_excluded_and_non_markdown() {
        let dir = TempDir::new().unwrap();
        write(&dir, ".hidden.md");
        write(&dir, ".git/notes.md");
        write(&dir, "node_modules/pkg/readme.md");
        write(&dir, "public/index.md");
        write(&dir, "git/.draft.md");
        write(&dir, "git/diagram.png");
        write(&dir, "readme.txt");
        write(&dir, "kept.md");

        let manifest = generate(dir.path(), "http://x").unwrap();
        assert_eq!(paths(&manifest), vec!["kept.md"]);
    }

    #[test]
    fn deeper_files_are_not_listed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "lang/rust/async.md");
        write(&dir, "lang/overview.md");

        let manifest = generate(dir.path(), "http://x").unwrap();
        assert_eq!(paths(&manifest), vec!["lang/overview.md"]);
    }

    #[test]
    fn missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let result = generate(&dir.path().join("missing"), "http://x");
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }
}
