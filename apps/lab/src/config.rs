//! Runtime configuration from the environment.

use std::path::PathBuf;

/// Environment variable naming the progress database file.
pub const DB_PATH_VAR: &str = "LAB_DB_PATH";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Read configuration from the process environment, after loading `.env`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(
            std::env::var(DB_PATH_VAR).ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(db_path: Option<String>, log_filter: Option<String>) -> Self {
        Self {
            db_path: db_path
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        }
    }

    /// Replace the database path, e.g. from a command-line flag.
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.db_path = path;
        }
        self
    }
}

fn default_db_path() -> PathBuf {
    // Use app data directory, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fundamentals-lab")
        .join("progress.db")
}
