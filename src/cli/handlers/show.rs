//! Show command handler.

use anyhow::{Context, Result};
use std::fmt::Write;

use super::load_catalog;
use crate::catalog::Catalog;
use crate::cli::ShowArgs;
use crate::cli::output::{NoteDetail, NoteListing, Output, OutputFormat};
use crate::domain::Note;

pub async fn handle_show(args: &ShowArgs, catalog: &Catalog) -> Result<()> {
    load_catalog(catalog).await?;

    let note = catalog
        .get_by_slug(&args.slug)
        .with_context(|| format!("note not found: '{}'", args.slug))?;
    let content = catalog
        .resolve_content(&note)
        .await
        .with_context(|| format!("failed to load note '{}'", note.slug()))?;

    print!("{}", render_show(&note, content, args.format)?);
    Ok(())
}

pub(crate) fn render_show(note: &Note, content: &str, format: OutputFormat) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Human => {
            writeln!(out, "# {}", note.title())?;
            writeln!(out)?;

            write!(out, "Slug: {}  Category: {}", note.slug(), note.category())?;
            if let Some(date) = note.date_string() {
                write!(out, "  Date: {date}")?;
            }
            writeln!(out)?;
            writeln!(out)?;

            if !content.is_empty() {
                writeln!(out, "{}", content.trim_end())?;
            }
        }
        OutputFormat::Json => {
            let detail = NoteDetail {
                note: NoteListing::from(note),
                content: content.to_string(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(detail))?)?;
        }
        OutputFormat::Paths => {
            writeln!(out, "{}", note.source_path())?;
        }
    }

    Ok(out)
}
