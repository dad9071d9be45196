//! Bootstrap configuration and default path resolution
//!
//! Priority order for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! Levels 1 and 2 are handled by the binary's argument parser; this module
//! supplies levels 3 and 4 and the merge.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_DIR: &str = "mycolog";

/// Bootstrap configuration loaded from TOML
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Interface to bind
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// JSON data set loaded into the store at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Built-in defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            database_path: default_data_dir().join("mycolog.db"),
            host: "127.0.0.1".to_string(),
            port: 9090,
            log_level: "info".to_string(),
        }
    }
}

/// Settings given explicitly on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub seed_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub seed_file: Option<PathBuf>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge overrides over TOML over compiled defaults
    pub fn resolve(overrides: Overrides, toml: TomlConfig) -> Self {
        let defaults = CompiledDefaults::for_current_platform();

        Self {
            database_path: overrides
                .database_path
                .or(toml.database_path)
                .unwrap_or(defaults.database_path),
            host: overrides.host.or(toml.host).unwrap_or(defaults.host),
            port: overrides.port.or(toml.port).unwrap_or(defaults.port),
            seed_file: overrides.seed_file.or(toml.seed_file),
            log_level: overrides
                .log_level
                .or(toml.logging.level)
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load TOML configuration
///
/// A missing file is not an error: a warning is logged and defaults are
/// returned. An unreadable or malformed file is.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Default config file location: `<config_dir>/mycolog/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// OS-dependent data directory
fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/mycolog (or /var/lib/mycolog for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("/var/lib/mycolog"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/mycolog"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\mycolog"))
    } else {
        PathBuf::from("./mycolog_data")
    }
}
