//! Store configuration, persisted as `config.json` in the application data directory.
//!
//! The configuration only covers where the database lives and how many points
//! a completed activity earns. User-facing preferences (sound, monthly
//! retention) are kept in the `settings` table instead; see
//! [`crate::libs::preferences`].
//!
//! ```rust,no_run
//! use littlewins::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("{} point(s) per completed activity", config.points_per_check);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default database file name inside the data directory.
pub const DB_FILE_NAME: &str = "littlewins.db";

/// Points written to the reward ledger for each completed activity.
pub const DEFAULT_POINTS_PER_CHECK: i64 = 1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Explicit database location. When absent the store lives at
    /// `<data dir>/littlewins.db`.
    pub database_path: Option<PathBuf>,

    /// Reward points recorded when an activity is marked done.
    pub points_per_check: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            points_per_check: DEFAULT_POINTS_PER_CHECK,
        }
    }
}

impl Config {
    /// Reads the configuration from the platform data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Reads `config.json` from `storage`, falling back to defaults when the file is missing.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            msg_debug!(Message::ConfigFileNotFound);
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        if config.points_per_check < 0 {
            return Err(msg_error_anyhow!(Message::ConfigInvalidPoints(config.points_per_check)));
        }
        msg_debug!(Message::ConfigLoaded(config_file_path.display().to_string()));
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        msg_debug!(Message::ConfigSaved(config_file_path.display().to_string()));
        Ok(())
    }

    /// Resolves the database file, defaulting to the data directory.
    pub fn database_path(&self, storage: &DataStorage) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => storage.get_path(DB_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.points_per_check, 1);
    }

    #[test]
    fn explicit_database_path_wins() {
        let config: Config = serde_json::from_str(r#"{"database_path": "/tmp/kids.db"}"#).unwrap();
        let storage = DataStorage::at(std::env::temp_dir());
        assert_eq!(config.database_path(&storage).unwrap(), PathBuf::from("/tmp/kids.db"));
    }
}
