//! Manifest command handler.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::ManifestArgs;
use crate::cli::config::Config;
use crate::manifest::generate;

pub fn handle_manifest(args: &ManifestArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let content_url = config.content_url(args.content_url.as_deref()).context(
        "no content URL: pass --content-url or set content_url in the config file",
    )?;

    let manifest = generate(notes_dir, &content_url)
        .with_context(|| format!("failed to scan {}", notes_dir.display()))?;
    let xml = manifest.to_xml()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, xml)
                .with_context(|| format!("failed to write manifest: {}", path.display()))?;
            println!(
                "Wrote {} note(s) to {}",
                manifest.notes.len(),
                path.display()
            );
        }
        None => print!("{xml}"),
    }

    Ok(())
}
