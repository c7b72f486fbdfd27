//! # Configuration
//!
//! Roster reads a single `config.json` from its config directory (see
//! [`crate::init`]). Every key is optional; missing keys fall back to the
//! compiled defaults below.
//!
//! | Key                 | Default              | Description                                   |
//! |---------------------|----------------------|-----------------------------------------------|
//! | `connection`        | `file://<data dir>`  | Where the member collection lives             |
//! | `database`          | `MemberDatabaseDb`   | Database name inside the connection           |
//! | `collection`        | `members`            | Collection name inside the database           |
//! | `report-all-errors` | `false`              | Show every validation failure, not just first |
//!
//! The `ROSTER_CONNECTION` environment variable and the `--connection` flag
//! override `connection`, in that order of increasing priority.

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DATABASE: &str = "MemberDatabaseDb";
pub const DEFAULT_COLLECTION: &str = "members";

/// Configuration for roster, stored in `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RosterConfig {
    /// Connection string; `None` means the per-user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub report_all_errors: bool,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            connection: None,
            database: default_database(),
            collection: default_collection(),
            report_all_errors: false,
        }
    }
}

/// Everything [`crate::store::connect`] needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub connection: String,
    pub database: String,
    pub collection: String,
}

impl RosterConfig {
    pub const KEYS: &'static [&'static str] =
        &["connection", "database", "collection", "report-all-errors"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RosterConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "connection" => Ok(self.connection.clone().unwrap_or_default()),
            "database" => Ok(self.database.clone()),
            "collection" => Ok(self.collection.clone()),
            "report-all-errors" => Ok(self.report_all_errors.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "connection" => {
                self.connection = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "database" => self.database = non_empty(key, value)?,
            "collection" => self.collection = non_empty(key, value)?,
            "report-all-errors" => {
                self.report_all_errors = value.parse().map_err(|_| {
                    RosterError::Config(format!("{} expects true or false, got '{}'", key, value))
                })?;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Resolve the store settings. `default_connection` applies when neither
    /// the config file nor `override_connection` names one.
    pub fn store_config(
        &self,
        override_connection: Option<&str>,
        default_connection: &str,
    ) -> StoreConfig {
        let connection = override_connection
            .map(str::to_string)
            .or_else(|| self.connection.clone())
            .unwrap_or_else(|| default_connection.to_string());
        StoreConfig {
            connection,
            database: self.database.clone(),
            collection: self.collection.clone(),
        }
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(RosterError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn unknown_key(key: &str) -> RosterError {
    RosterError::Config(format!(
        "unknown key '{}' (expected one of: {})",
        key,
        RosterConfig::KEYS.join(", ")
    ))
}
