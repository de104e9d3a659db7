//! Configuration loading and root folder resolution
//!
//! Each setting is resolved in this order:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing TOML file is not an error; an unreadable or malformed one that
//! was explicitly requested is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "ROSTER_ROOT_FOLDER";

/// Fallback HTTP port for the record store
pub const DEFAULT_PORT: u16 = 3000;

/// Database file stem used when no URL is configured
pub const DEFAULT_DB_NAME: &str = "roster";

/// Bootstrap configuration loaded from TOML
///
/// All keys are optional:
///
/// ```toml
/// root_folder = "/var/lib/roster"
/// port = 3000
/// database_url = "sqlite:///var/lib/roster/roster.db"
/// db_name = "roster"
/// uploads_dir = "/var/lib/roster/uploads"
/// api_url = "http://localhost:3000"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub uploads_dir: Option<PathBuf>,
    /// Backend base URL used by the dashboard client
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Result of loading the bootstrap configuration
///
/// Loading happens before the tracing subscriber exists, so anything worth
/// reporting is kept here and emitted with [`LoadedConfig::log`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// File the configuration was read from, `None` when defaults are used
    pub path: Option<PathBuf>,
    /// Why a default-location file was skipped
    pub warning: Option<String>,
}

impl LoadedConfig {
    /// Report where the configuration came from
    pub fn log(&self) {
        if let Some(warning) = &self.warning {
            warn!("{}", warning);
        }
        match &self.path {
            Some(path) => info!("Loaded config file {}", path.display()),
            None => debug!("No config file loaded, using defaults"),
        }
    }
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration
    ///
    /// With an explicit `path` the file must exist and parse. Without one the
    /// default locations are searched, and defaults are used if none exists
    /// or the one found is unusable.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig> {
        match path {
            Some(path) => Self::load_from(Some(path), None),
            None => Self::load_from(None, default_config_path()),
        }
    }

    /// Load from an explicit file, else from `default_path` if given
    pub fn load_from(
        explicit: Option<&Path>,
        default_path: Option<PathBuf>,
    ) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            return Ok(LoadedConfig {
                config: Self::read(path)?,
                path: Some(path.to_path_buf()),
                warning: None,
            });
        }

        let Some(path) = default_path else {
            return Ok(LoadedConfig::default());
        };

        match Self::read(&path) {
            Ok(config) => Ok(LoadedConfig {
                config,
                path: Some(path),
                warning: None,
            }),
            Err(e) => Ok(LoadedConfig {
                warning: Some(format!("Ignoring config file {}: {}", path.display(), e)),
                ..Default::default()
            }),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// First existing default config file
///
/// `<config dir>/roster/config.toml`, then `/etc/roster/config.toml` on Unix.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("roster").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/roster/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolve the root folder holding the database file and uploads
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("roster"))
        .unwrap_or_else(|| PathBuf::from("./roster_data"))
}

/// SQLite URL for a database file, created on first connect
pub fn sqlite_url(db_path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", db_path.display())
}
