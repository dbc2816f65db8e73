//! List command handler.

use anyhow::Result;
use std::fmt::Write;
use std::sync::Arc;

use super::{load_catalog, truncate_str};
use crate::catalog::Catalog;
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;

pub async fn handle_list(args: &ListArgs, catalog: &Catalog) -> Result<()> {
    load_catalog(catalog).await?;

    let notes = catalog.get_by_category_sorted(args.category.as_deref(), args.sort.into());
    print!("{}", render_list(&notes, args.format)?);
    Ok(())
}

pub(crate) fn render_list(notes: &[Arc<Note>], format: OutputFormat) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                writeln!(out, "No notes found.")?;
                return Ok(out);
            }

            writeln!(out, "{:<30}  {:<40}  {:>10}", "Slug", "Title", "Date")?;
            writeln!(
                out,
                "{:<30}  {:<40}  {:>10}",
                "-".repeat(30),
                "-".repeat(40),
                "-".repeat(10)
            )?;

            for note in notes {
                let date = note.date_string().unwrap_or_default();
                writeln!(
                    out,
                    "{:<30}  {:<40}  {:>10}",
                    truncate_str(note.slug(), 30),
                    truncate_str(note.title(), 40),
                    date
                )?;
            }

            writeln!(out)?;
            writeln!(out, "{} note(s)", notes.len())?;
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> =
                notes.iter().map(|n| NoteListing::from(n.as_ref())).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(listings))?)?;
        }
        OutputFormat::Paths => {
            for note in notes {
                writeln!(out, "{}", note.slug())?;
            }
        }
    }

    Ok(out)
}
