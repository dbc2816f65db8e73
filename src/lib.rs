//! noteindex - a queryable index of markdown notes from a directory or a remote manifest

pub mod catalog;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod manifest;
pub mod source;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use catalog::{Catalog, CatalogOptions};
use cli::{
    Cli, Command,
    config::{Config, SourceLocation},
    handlers::{
        handle_categories, handle_completions, handle_list, handle_manifest, handle_show,
    },
    logging::setup_logging,
};
use source::{BundledSource, NoteSource, RemoteManifestSource};

/// Main entry point for the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let config = Config::load()?;

    match &cli.command {
        Command::Manifest(args) => {
            return handle_manifest(args, &config.notes_dir(cli.dir.as_ref()), &config);
        }
        Command::Completions(args) => return handle_completions(args),
        _ => {}
    }

    let location = config.source_location(cli.manifest.as_deref(), cli.dir.as_ref());
    let catalog = Catalog::with_options(
        open_source(&location)?,
        CatalogOptions {
            root_prefix: String::new(),
            preview_chars: config.preview_chars,
        },
    );

    match &cli.command {
        Command::List(args) => handle_list(args, &catalog).await,
        Command::Show(args) => handle_show(args, &catalog).await,
        Command::Categories(args) => handle_categories(args, &catalog).await,
        Command::Manifest(_) | Command::Completions(_) => Ok(()),
    }
}

fn open_source(location: &SourceLocation) -> Result<Arc<dyn NoteSource>> {
    tracing::debug!(?location, "opening note source");
    let source: Arc<dyn NoteSource> = match location {
        SourceLocation::Manifest(url) => Arc::new(RemoteManifestSource::over_http(url.clone())),
        SourceLocation::Directory(dir) => Arc::new(
            BundledSource::from_dir(dir)
                .with_context(|| format!("failed to read notes directory: {}", dir.display()))?,
        ),
    };
    Ok(source)
}
