//! Categories command handler.

use anyhow::Result;
use std::fmt::Write;

use super::load_catalog;
use crate::catalog::Catalog;
use crate::cli::CategoriesArgs;
use crate::cli::output::{CategoryListing, Output, OutputFormat};

pub async fn handle_categories(args: &CategoriesArgs, catalog: &Catalog) -> Result<()> {
    load_catalog(catalog).await?;

    let listings: Vec<CategoryListing> = catalog
        .categories()
        .into_iter()
        .map(|name| CategoryListing {
            count: catalog.get_by_category(Some(&name)).len(),
            name,
        })
        .collect();

    print!("{}", render_categories(&listings, args.format)?);
    Ok(())
}

pub(crate) fn render_categories(
    categories: &[CategoryListing],
    format: OutputFormat,
) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Human => {
            if categories.is_empty() {
                writeln!(out, "No categories found.")?;
            }
            for category in categories {
                writeln!(out, "{} ({})", category.name, category.count)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(categories))?)?;
        }
        OutputFormat::Paths => {
            for category in categories {
                writeln!(out, "{}", category.name)?;
            }
        }
    }

    Ok(out)
}
