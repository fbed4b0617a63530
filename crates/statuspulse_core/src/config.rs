//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve settings from defaults plus `STATUSPULSE_*` environment
//!   overrides and derive runtime paths from them.
//!
//! # Invariants
//! - `Settings` is a plain value object; reading it never touches the
//!   filesystem. Directory creation happens only in
//!   [`Settings::ensure_directories`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_SAFE_MODE: &str = "STATUSPULSE_SAFE_MODE";
const ENV_DATA_DIR: &str = "STATUSPULSE_DATA_DIR";
const ENV_CACHE_DIR: &str = "STATUSPULSE_CACHE_DIR";
const ENV_LOG_DIR: &str = "STATUSPULSE_LOG_DIR";
const ENV_DATASET: &str = "STATUSPULSE_DATASET";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// When set, outbound adapters must stay in mock mode.
    pub safe_mode: bool,
    pub dataset_name: String,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            safe_mode: true,
            dataset_name: "autonomy_program".to_string(),
            data_dir: PathBuf::from("data/samples"),
            cache_dir: PathBuf::from(".cache"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Settings {
    /// Builds settings from defaults overridden by environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            safe_mode: env_flag(ENV_SAFE_MODE).unwrap_or(defaults.safe_mode),
            dataset_name: env_string(ENV_DATASET).unwrap_or(defaults.dataset_name),
            data_dir: env_path(ENV_DATA_DIR).unwrap_or(defaults.data_dir),
            cache_dir: env_path(ENV_CACHE_DIR).unwrap_or(defaults.cache_dir),
            log_dir: env_path(ENV_LOG_DIR).unwrap_or(defaults.log_dir),
        }
    }

    /// Path of the SQLite cache database.
    pub fn db_path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.db", self.dataset_name))
    }

    /// Creates the directories required for runtime artifacts.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [&self.cache_dir, &self.log_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key).map(PathBuf::from)
}

/// Truthy values: `1`, `true`, `yes`, `y` (case-insensitive).
fn env_flag(key: &str) -> Option<bool> {
    env_string(key).map(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y"
        )
    })
}
