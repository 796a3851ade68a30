/*
 * Persists the recent-history slots between runs. This module defines how
 * that snapshot is stored and retrieved, abstracting the underlying storage
 * (a JSON file in the user's local application data directory).
 *
 * It uses a trait-based approach (`ConfigManagerOperations`) to allow for
 * different storage backends or mock implementations for testing. The
 * concrete implementation (`CoreConfigManager`) handles the file system
 * interaction, using `path_utils` to locate the configuration directory.
 */
use crate::core::path_utils;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

const RECENT_HISTORY_FILENAME: &str = "recent_codes.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    NoConfigDirectory,
    Serde(serde_json::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine configuration directory")
            }
            ConfigError::Serde(e) => write!(f, "Configuration serialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// The on-disk shape of the recent-history slots, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedHistory {
    pub entries: Vec<String>,
}

pub trait ConfigManagerOperations: Send + Sync {
    fn load_recent_history(&self, app_name: &str) -> Result<Option<PersistedHistory>>;
    fn save_recent_history(&self, app_name: &str, history: &PersistedHistory) -> Result<()>;
}

pub struct CoreConfigManager {}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {}
    }

    fn history_file_path(config_dir: &Path) -> std::path::PathBuf {
        config_dir.join(RECENT_HISTORY_FILENAME)
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    /*
     * Loads the persisted recent-history snapshot for the application.
     * A missing file is a normal first-run condition and yields `Ok(None)`;
     * a file that exists but cannot be parsed is an error, so callers can
     * decide whether to start fresh.
     */
    fn load_recent_history(&self, app_name: &str) -> Result<Option<PersistedHistory>> {
        log::trace!("CoreConfigManager: loading recent history for app '{app_name}'");
        let config_dir =
            path_utils::ensure_app_config_dir(app_name).ok_or(ConfigError::NoConfigDirectory)?;
        let file_path = Self::history_file_path(&config_dir);

        if !file_path.exists() {
            log::debug!("CoreConfigManager: history file {file_path:?} does not exist.");
            return Ok(None);
        }

        let reader = BufReader::new(File::open(&file_path)?);
        let history: PersistedHistory = serde_json::from_reader(reader)?;
        log::debug!(
            "CoreConfigManager: loaded {} history entries from {file_path:?}.",
            history.entries.len()
        );
        Ok(Some(history))
    }

    /*
     * Writes the recent-history snapshot, replacing any previous file.
     */
    fn save_recent_history(&self, app_name: &str, history: &PersistedHistory) -> Result<()> {
        log::trace!(
            "CoreConfigManager: saving {} history entries for app '{app_name}'",
            history.entries.len()
        );
        let config_dir =
            path_utils::ensure_app_config_dir(app_name).ok_or(ConfigError::NoConfigDirectory)?;
        let file_path = Self::history_file_path(&config_dir);

        let file = File::create(&file_path)?;
        serde_json::to_writer_pretty(file, history)?;
        log::debug!("CoreConfigManager: saved recent history to {file_path:?}.");
        Ok(())
    }
}
