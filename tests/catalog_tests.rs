//! Library-level tests that drive a catalog through both source kinds.

mod common;

use async_trait::async_trait;
use common::harness::{TestEnv, TestNote};
use noteindex::catalog::{Catalog, CatalogOptions, CatalogState, SortOrder};
use noteindex::infra::{Fetch, FetchError};
use noteindex::manifest::generate;
use noteindex::source::{BundledSource, RemoteManifestSource};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const CONTENT_URL: &str = "https://example.com/notes";
const MANIFEST_URL: &str = "https://example.com/blog.xml";

/// Serves a generated manifest and the files it points at from disk.
struct DirectoryFetcher {
    root: PathBuf,
    manifest: String,
    calls: AtomicUsize,
}

#[async_trait]
impl Fetch for DirectoryFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url == MANIFEST_URL {
            return Ok(self.manifest.clone());
        }

        let not_found = || FetchError::Status {
            url: url.to_string(),
            status: 404,
        };
        let relative = url
            .strip_prefix(CONTENT_URL)
            .map(|r| r.trim_start_matches('/'))
            .ok_or_else(not_found)?;
        std::fs::read_to_string(self.root.join(relative)).map_err(|_| not_found())
    }
}

fn populated_env() -> TestEnv {
    let env = TestEnv::new();
    env.add_note(
        &TestNote::new("collaborate")
            .category("git")
            .title("Collaborate")
            .body("Pull requests."),
    );
    env.add_note(&TestNote::new("merge").category("git").body("Merging."));
    env.add_note(&TestNote::new("about").title("About").body("Hello."));
    env
}

fn remote_catalog(env: &TestEnv) -> (Catalog, Arc<DirectoryFetcher>) {
    let manifest = generate(env.notes_dir(), CONTENT_URL)
        .unwrap()
        .to_xml()
        .unwrap();
    let fetcher = Arc::new(DirectoryFetcher {
        root: env.notes_dir().to_path_buf(),
        manifest,
        calls: AtomicUsize::new(0),
    });
    let source = RemoteManifestSource::new(MANIFEST_URL, fetcher.clone());
    (Catalog::new(source), fetcher)
}

#[tokio::test]
async fn generated_manifest_loads_through_remote_source() {
    let env = populated_env();
    let (catalog, fetcher) = remote_catalog(&env);

    assert_eq!(catalog.ensure_loaded().await, CatalogState::Loaded);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.categories(), vec!["Uncategorized", "git"]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

    let note = catalog.get_by_slug("git/collaborate").unwrap();
    assert_eq!(note.category(), "git");
    assert!(note.date().is_some());
    assert!(!note.is_resolved());

    // Generated titles are file stems; the remote body is served raw.
    assert_eq!(note.title(), "collaborate");
    let content = catalog.resolve_content(&note).await.unwrap();
    assert!(content.contains("Pull requests."));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn bundled_and_remote_catalogs_agree_on_identity() {
    let env = populated_env();
    let bundled = Catalog::new(BundledSource::from_dir(env.notes_dir()).unwrap());
    let (remote, _) = remote_catalog(&env);

    bundled.ensure_loaded().await;
    remote.ensure_loaded().await;

    let slugs = |catalog: &Catalog| -> Vec<String> {
        catalog
            .get_by_category_sorted(None, SortOrder::Discovery)
            .iter()
            .map(|n| n.slug().to_string())
            .collect()
    };
    assert_eq!(slugs(&bundled), slugs(&remote));
    assert_eq!(bundled.categories(), remote.categories());
}

#[tokio::test]
async fn bundled_catalog_previews_bodies_when_configured() {
    let env = TestEnv::new();
    env.add_note(&TestNote::new("long").body("one two three four five six"));
    env.add_note(
        &TestNote::new("described")
            .description("Given summary")
            .body("ignored for preview"),
    );

    let catalog = Catalog::with_options(
        Arc::new(BundledSource::from_dir(env.notes_dir()).unwrap()),
        CatalogOptions {
            root_prefix: String::new(),
            preview_chars: Some(7),
        },
    );
    catalog.ensure_loaded().await;

    assert_eq!(
        catalog.get_by_slug("long").unwrap().preview(),
        Some("one two…")
    );
    assert_eq!(
        catalog.get_by_slug("described").unwrap().preview(),
        Some("Given summary")
    );
}

#[tokio::test]
async fn shared_catalog_across_tasks_loads_once() {
    let env = populated_env();
    let (catalog, fetcher) = remote_catalog(&env);
    let catalog = Arc::new(catalog);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.ensure_loaded().await })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), CatalogState::Loaded);
    }

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}
