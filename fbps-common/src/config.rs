//! Configuration loading and root folder resolution
//!
//! Every setting is resolved independently in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`FBPS_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or malformed TOML file never prevents startup; a warning is
//! logged and the remaining tiers are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5730;
pub const DEFAULT_DATABASE_FILE: &str = "players.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_ROOT_FOLDER: &str = "FBPS_ROOT_FOLDER";
pub const ENV_HOST: &str = "FBPS_HOST";
pub const ENV_PORT: &str = "FBPS_PORT";
pub const ENV_LOG_LEVEL: &str = "FBPS_LOG_LEVEL";

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub database_file: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub database_file: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Where the TOML tier came from
///
/// Returned by [`ServiceConfig::load`] so it can be logged once tracing is
/// initialized (the log level itself comes from the resolved config).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// No config file found
    Defaults,
    /// Config file read successfully
    File(PathBuf),
    /// Config file found but unreadable or malformed
    Ignored { path: PathBuf, error: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No config file found, using defaults"),
            ConfigSource::File(path) => info!("Loaded config file: {}", path.display()),
            ConfigSource::Ignored { path, error } => {
                warn!("Ignoring config file {}: {}", path.display(), error)
            }
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from CLI, environment and the platform TOML file
    pub fn load(cli: &CliOverrides) -> (Self, ConfigSource) {
        let (toml_config, source) = match find_config_file() {
            Some(path) => match load_toml_config(&path) {
                Ok(config) => (Some(config), ConfigSource::File(path)),
                Err(e) => (
                    None,
                    ConfigSource::Ignored {
                        path,
                        error: e.to_string(),
                    },
                ),
            },
            None => (None, ConfigSource::Defaults),
        };

        (Self::resolve(cli, toml_config.as_ref()), source)
    }

    /// Resolve configuration from already-loaded tiers
    pub fn resolve(cli: &CliOverrides, toml_config: Option<&TomlConfig>) -> Self {
        let toml_config = toml_config.cloned().unwrap_or_default();

        let root_folder = cli
            .root_folder
            .clone()
            .or_else(|| std::env::var(ENV_ROOT_FOLDER).ok().map(PathBuf::from))
            .or(toml_config.root_folder)
            .unwrap_or_else(default_root_folder);

        let host = cli
            .host
            .clone()
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli
            .port
            .or_else(env_port)
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| std::env::var(ENV_LOG_LEVEL).ok())
            .or(toml_config.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            root_folder,
            database_file: toml_config
                .database_file
                .unwrap_or_else(|| DEFAULT_DATABASE_FILE.to_string()),
            host,
            port,
            log_level,
        }
    }

    /// Full path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(&self.database_file)
    }

    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create the root folder if missing (idempotent)
    pub fn ensure_root_folder(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

fn env_port() -> Option<u16> {
    let raw = std::env::var(ENV_PORT).ok()?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring {}={}: not a valid port", ENV_PORT, raw);
            None
        }
    }
}

/// Locate the config file for the platform, if one exists
fn find_config_file() -> Option<PathBuf> {
    // ~/.config/fbps/config.toml first, then /etc/fbps/config.toml
    let user_config = dirs::config_dir().map(|d| d.join("fbps").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/fbps/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\fbps
        dirs::data_local_dir()
            .map(|d| d.join("fbps"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\fbps"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/fbps
        dirs::data_dir()
            .map(|d| d.join("fbps"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/fbps"))
    } else {
        // ~/.local/share/fbps (or /var/lib/fbps for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("fbps"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/fbps"))
    }
}
