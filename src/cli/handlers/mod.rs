//! Command handlers for the CLI.

mod categories;
mod completions;
mod list;
mod manifest;
mod show;


use anyhow::Result;

use crate::catalog::{Catalog, CatalogState};

// Re-export public items
pub use categories::handle_categories;
pub use completions::handle_completions;
pub use list::handle_list;
pub use manifest::handle_manifest;
pub use show::handle_show;

// Re-export for tests
#[cfg(test)]
pub(crate) use categories::render_categories;
#[cfg(test)]
pub(crate) use list::render_list;
#[cfg(test)]
pub(crate) use show::render_show;

// ===========================================
// Shared Utilities
// ===========================================

/// Loads the catalog, turning a failed discovery into an error.
pub(crate) async fn load_catalog(catalog: &Catalog) -> Result<()> {
    match catalog.ensure_loaded().await {
        CatalogState::Failed => match catalog.last_error() {
            Some(err) => Err(anyhow::Error::new(err).context("failed to load notes")),
            None => anyhow::bail!("failed to load notes"),
        },
        _ => {
            let report = catalog.report();
            for skipped in &report.malformed {
                tracing::info!(
                    position = skipped.position,
                    path = ?skipped.path,
                    reason = %skipped.reason,
                    "skipped entry"
                );
            }
            Ok(())
        }
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
