//! Isolated test environment with temp directory.

use super::{NotesCommand, TestNote};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// Creates a temp directory that is automatically cleaned up on drop. The
/// directory holds the notes and a separate, empty config home so a user's
/// real config file never leaks into tests.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes directory
    notes_dir: PathBuf,
    /// Path used as the config home for spawned commands
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&notes_dir).expect("Failed to create notes directory");
        std::fs::create_dir_all(&config_home).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_home,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the directory spawned commands use as their config home.
    pub fn config_home(&self) -> &Path {
        &self.config_home
    }

    /// Adds a test note to the environment and returns its path.
    pub fn add_note(&self, test_note: &TestNote) -> PathBuf {
        self.write_file(&test_note.relative_path(), &test_note.render())
    }

    /// Writes a file under the notes directory, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes the tool's config file into the isolated config home.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home.join("noteindex");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Creates a NotesCommand configured for this test environment.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new()
            .config_home(&self.config_home)
            .dir(&self.notes_dir)
    }

    /// Creates a NotesCommand with the isolated config but no `--dir`.
    pub fn cmd_without_dir(&self) -> NotesCommand {
        NotesCommand::new().config_home(&self.config_home)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Phase 1: TestEnv Foundation
    // ===========================================

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir(), "notes directory should exist");
        assert!(env.config_home().is_dir(), "config home should exist");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.notes_dir().to_string_lossy());
    }

    // ===========================================
    // Phase 2: TestEnv Note Addition
    // ===========================================

    #[test]
    fn test_env_add_note_creates_category_directory() {
        let env = TestEnv::new();
        let path = env.add_note(&TestNote::new("merge").category("git").body("text"));

        assert!(path.is_file());
        assert!(path.ends_with("git/merge.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "text");
    }

    #[test]
    fn test_env_write_config() {
        let env = TestEnv::new();
        let path = env.write_config("preview_chars = 10\n");
        assert!(path.ends_with("noteindex/config.toml"));
        assert!(path.starts_with(env.config_home()));
    }
}
