//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Default manifest URL; when set, notes are read remotely
    pub manifest_url: Option<String>,

    /// Base URL written into generated manifests
    pub content_url: Option<String>,

    /// Length of generated previews, in characters
    pub preview_chars: Option<usize>,
}

/// Where notes are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Directory(PathBuf),
    Manifest(String),
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/noteindex/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("noteindex")
            .join("config.toml")
    }

    /// Resolve the notes directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve where notes come from.
    ///
    /// A manifest URL from the CLI wins, then an explicit `--dir`, then the
    /// config file's `manifest_url`, then the notes directory.
    pub fn source_location(
        &self,
        cli_manifest: Option<&str>,
        cli_dir: Option<&PathBuf>,
    ) -> SourceLocation {
        if let Some(url) = cli_manifest {
            return SourceLocation::Manifest(url.to_string());
        }
        if cli_dir.is_none() {
            if let Some(url) = &self.manifest_url {
                return SourceLocation::Manifest(url.clone());
            }
        }
        SourceLocation::Directory(self.notes_dir(cli_dir))
    }

    /// Resolve the content URL for manifest generation.
    pub fn content_url(&self, cli_url: Option<&str>) -> Option<String> {
        cli_url
            .map(str::to_string)
            .or_else(|| self.content_url.clone())
    }
}
