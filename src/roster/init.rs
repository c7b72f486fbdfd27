use crate::api::RosterApi;
use crate::config::{RosterConfig, StoreConfig};
use crate::error::{Result, RosterError};
use crate::store::{self, Collection, MemberStore};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the config and data directories, e.g. for tests.
pub const HOME_ENV: &str = "ROSTER_HOME";
/// Overrides the `connection` config key.
pub const CONNECTION_ENV: &str = "ROSTER_CONNECTION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl RosterPaths {
    /// Both directories under one root.
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.join("data"),
        }
    }

    /// `$ROSTER_HOME` if set, otherwise the platform's per-user directories.
    pub fn resolve() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::under(Path::new(&home)));
        }
        let dirs = ProjectDirs::from("com", "roster", "roster").ok_or_else(|| {
            RosterError::Config("could not determine a home directory".to_string())
        })?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    pub fn default_connection(&self) -> String {
        format!("file://{}", self.data_dir.display())
    }
}

pub struct RosterContext {
    pub api: RosterApi<Collection>,
    pub config: RosterConfig,
}

/// Settle on a connection string: flag, then environment, then config file,
/// then the per-user data directory.
pub fn resolve_store_config(
    config: &RosterConfig,
    paths: &RosterPaths,
    flag: Option<&str>,
) -> StoreConfig {
    let env = std::env::var(CONNECTION_ENV).ok().filter(|v| !v.trim().is_empty());
    let override_connection = flag.map(str::to_string).or(env);
    config.store_config(override_connection.as_deref(), &paths.default_connection())
}

/// Load config, open the collection and fetch the initial list.
///
/// A connection failure is returned as-is so the caller can report it once;
/// a failing first fetch is also returned, since an unreadable collection
/// leaves nothing to show.
pub fn initialize(connection_flag: Option<&str>) -> Result<RosterContext> {
    let paths = RosterPaths::resolve()?;
    let config = RosterConfig::load(&paths.config_dir)?;
    let store_config = resolve_store_config(&config, &paths, connection_flag);

    let collection = store::connect(&store_config)?;
    tracing::debug!(store = %collection.describe(), "connected");

    let mut api = RosterApi::new(collection);
    api.reload()?;

    Ok(RosterContext {
        api,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_under_root() {
        let temp = TempDir::new().unwrap();
        let paths = RosterPaths::under(temp.path());
        assert_eq!(paths.config_dir, temp.path());
        assert_eq!(paths.data_dir, temp.path().join("data"));
        assert!(paths.default_connection().starts_with("file://"));
    }

    #[test]
    fn flag_beats_config_file() {
        let temp = TempDir::new().unwrap();
        let paths = RosterPaths::under(temp.path());
        let config = RosterConfig {
            connection: Some("file:///somewhere".to_string()),
            ..Default::default()
        };

        let resolved = resolve_store_config(&config, &paths, Some("memory://"));
        assert_eq!(resolved.connection, "memory://");
    }

    #[test]
    fn default_connection_opens_data_dir() {
        let temp = TempDir::new().unwrap();
        let paths = RosterPaths::under(temp.path());
        let store_config = RosterConfig::default()
            .store_config(None, &paths.default_connection());

        let collection = store::connect(&store_config).unwrap();
        assert!(collection.fetch_all().unwrap().is_empty());
        assert!(paths.data_dir.join("MemberDatabaseDb").is_dir());
    }
}
