//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::catalog::SortOrder;
use output::OutputFormat;

/// notes - browse a collection of markdown notes
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Manifest URL; reads notes remotely instead of from a directory
    #[arg(short = 'm', long, global = true)]
    pub manifest: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes, optionally filtered by category
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// List all categories
    Categories(CategoriesArgs),

    /// Generate a manifest for the notes directory
    Manifest(ManifestArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Sort key for listings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortKey {
    /// Order the source listed the notes in
    #[default]
    Discovery,
    /// Newest first
    Date,
    /// Alphabetical by title
    Title,
}

impl From<SortKey> for SortOrder {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Discovery => SortOrder::Discovery,
            SortKey::Date => SortOrder::DateDesc,
            SortKey::Title => SortOrder::Title,
        }
    }
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Category to filter by
    pub category: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Sort order
    #[arg(short = 's', long, value_enum, default_value_t = SortKey::Discovery)]
    pub sort: SortKey,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note slug, e.g. git/collaborate
    pub slug: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `categories` command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `manifest` command
#[derive(Parser, Debug)]
pub struct ManifestArgs {
    /// Base URL note bodies are served from (overrides config file)
    #[arg(long)]
    pub content_url: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
