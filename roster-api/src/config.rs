//! Server settings resolution
//!
//! Command-line values arrive with their environment fallback already
//! applied by clap; the TOML file and compiled defaults fill the rest.

use roster_common::config::{
    resolve_root_folder, sqlite_url, TomlConfig, DEFAULT_DB_NAME, DEFAULT_PORT, ROOT_FOLDER_ENV,
};
use std::path::PathBuf;

/// Values taken from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub db_name: Option<String>,
    pub root_folder: Option<PathBuf>,
    pub uploads_dir: Option<PathBuf>,
}

/// Where the record store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Explicit connection URL
    Url(String),
    /// Database file under the root folder, created on first start
    File(PathBuf),
}

impl StoreLocation {
    pub fn url(&self) -> String {
        match self {
            StoreLocation::Url(url) => url.clone(),
            StoreLocation::File(path) => sqlite_url(path),
        }
    }
}

/// Fully resolved server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub store: StoreLocation,
    pub root_folder: PathBuf,
    pub uploads_dir: PathBuf,
    pub log_level: String,
}

impl ServerConfig {
    pub fn resolve(overrides: ServerOverrides, toml: &TomlConfig) -> Self {
        let root_folder =
            resolve_root_folder(overrides.root_folder.as_deref(), ROOT_FOLDER_ENV, toml);

        let store = match overrides.database_url.or_else(|| toml.database_url.clone()) {
            Some(url) if !url.trim().is_empty() => StoreLocation::Url(url),
            _ => {
                let db_name = overrides
                    .db_name
                    .or_else(|| toml.db_name.clone())
                    .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                StoreLocation::File(root_folder.join(format!("{}.db", db_name)))
            }
        };

        let uploads_dir = overrides
            .uploads_dir
            .or_else(|| toml.uploads_dir.clone())
            .unwrap_or_else(|| root_folder.join("uploads"));

        Self {
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            store,
            root_folder,
            uploads_dir,
            log_level: toml.logging.level.clone(),
        }
    }
}

/// Filter used when `RUST_LOG` is not set
///
/// Includes `roster_common` so config and store startup messages show up.
pub fn default_log_filter(level: &str) -> String {
    format!("roster_api={level},roster_common={level},tower_http={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooted(root: &str) -> ServerOverrides {
        ServerOverrides {
            root_folder: Some(PathBuf::from(root)),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_under_root_folder() {
        let config = ServerConfig::resolve(rooted("/srv/roster"), &TomlConfig::default());

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.store,
            StoreLocation::File(PathBuf::from("/srv/roster/roster.db"))
        );
        assert_eq!(config.uploads_dir, PathBuf::from("/srv/roster/uploads"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_override_beats_toml() {
        let toml = TomlConfig::from_toml_str(
            r#"
            port = 8080
            db_name = "people"
            uploads_dir = "/data/photos"
            "#,
        )
        .unwrap();

        let overrides = ServerOverrides {
            port: Some(9000),
            ..rooted("/srv/roster")
        };
        let config = ServerConfig::resolve(overrides, &toml);

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.store,
            StoreLocation::File(PathBuf::from("/srv/roster/people.db"))
        );
        assert_eq!(config.uploads_dir, PathBuf::from("/data/photos"));
    }

    #[test]
    fn test_database_url_wins_over_db_name() {
        let overrides = ServerOverrides {
            database_url: Some("sqlite::memory:".to_string()),
            db_name: Some("ignored".to_string()),
            ..rooted("/srv/roster")
        };
        let config = ServerConfig::resolve(overrides, &TomlConfig::default());

        assert_eq!(config.store, StoreLocation::Url("sqlite::memory:".to_string()));
        assert_eq!(config.store.url(), "sqlite::memory:");
    }

    #[test]
    fn test_default_log_filter_covers_common_crate() {
        assert_eq!(
            default_log_filter("debug"),
            "roster_api=debug,roster_common=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_file_store_url() {
        let store = StoreLocation::File(PathBuf::from("/tmp/roster.db"));
        assert_eq!(store.url(), "sqlite:///tmp/roster.db?mode=rwc");
    }
}
