//! Runtime configuration for the command-line front end.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from flags,
//!   environment and platform defaults.
//!
//! # Invariants
//! - Resolved paths are absolute.
//! - Priority is flag/env (handled by clap) over platform default.

use crate::error::CliError;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "bookshelf";
const DB_FILE_NAME: &str = "library.db";
const LOG_DIR_NAME: &str = "logs";

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_dir: PathBuf,
    pub(crate) log_level: String,
}

impl Config {
    /// Applies defaults to any setting the caller left unset.
    pub(crate) fn resolve(
        db_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self, CliError> {
        let cwd = std::env::current_dir()?;
        let app_dir = app_data_dir(&cwd);

        let db_path = absolutize(&cwd, db_path.unwrap_or_else(|| app_dir.join(DB_FILE_NAME)));
        let log_dir = absolutize(&cwd, log_dir.unwrap_or_else(|| app_dir.join(LOG_DIR_NAME)));
        let log_level =
            log_level.unwrap_or_else(|| bookshelf_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Creates the parent directory of the database file when missing.
    pub(crate) fn ensure_db_parent(&self) -> Result<(), CliError> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CliError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

/// `~/.local/share/bookshelf` (or platform equivalent), else `./bookshelf`.
fn app_data_dir(cwd: &Path) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| cwd.to_path_buf())
        .join(APP_DIR_NAME)
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::path::PathBuf;

    #[test]
    fn explicit_values_win_over_defaults() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/shelf/books.db")),
            Some(PathBuf::from("/tmp/shelf/logs")),
            Some("warn".to_string()),
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/shelf/books.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/shelf/logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_paths_are_made_absolute() {
        let config = Config::resolve(
            Some(PathBuf::from("books.db")),
            Some(PathBuf::from("logs")),
            None,
        )
        .unwrap();

        assert!(config.db_path.is_absolute());
        assert!(config.db_path.ends_with("books.db"));
        assert!(config.log_dir.is_absolute());
        assert_eq!(config.log_level, bookshelf_core::default_log_level());
    }

    #[test]
    fn defaults_land_under_app_directory() {
        let config = Config::resolve(None, None, None).unwrap();

        assert!(config.db_path.ends_with("bookshelf/library.db"));
        assert!(config.log_dir.ends_with("bookshelf/logs"));
    }

    #[test]
    fn ensure_db_parent_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(
            Some(dir.path().join("nested").join("library.db")),
            Some(dir.path().join("logs")),
            None,
        )
        .unwrap();

        config.ensure_db_parent().unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
