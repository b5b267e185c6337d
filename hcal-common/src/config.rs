//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `HCAL_CONFIG` environment variable
//! 3. Platform config file (`<config dir>/hcal/config.toml`), if present
//! 4. Built-in defaults (fallback)
//!
//! A missing platform file is not an error. A file named on the command line
//! or in the environment must exist and parse.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "HCAL_CONFIG";

/// Default HTTP port for hcal-re
pub const DEFAULT_PORT: u16 = 5790;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// External library file replacing the embedded catalog and mappings
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            library_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformDefault(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformDefault(p) => Some(p),
            ConfigSource::BuiltIn => None,
        }
    }
}

/// Platform config file location, whether or not it exists
pub fn platform_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hcal").join("config.toml"))
}

/// Decide which config file to read
pub fn resolve_config_source(cli_arg: Option<&Path>) -> ConfigSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigSource::CommandLine(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return ConfigSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config file
    if let Some(path) = platform_config_path() {
        if path.exists() {
            return ConfigSource::PlatformDefault(path);
        }
    }

    // Priority 4: Built-in defaults
    ConfigSource::BuiltIn
}

impl TomlConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Read and parse a config file that must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Load configuration from a resolved source
    ///
    /// Explicitly named files propagate errors. A broken platform file
    /// degrades to built-in defaults with a warning.
    pub fn load(source: &ConfigSource) -> Result<Self> {
        match source {
            ConfigSource::CommandLine(path) | ConfigSource::Environment(path) => {
                let config = Self::load_from(path)?;
                info!("Loaded configuration from {:?}", path);
                Ok(config)
            }
            ConfigSource::PlatformDefault(path) => match Self::load_from(path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    Ok(config)
                }
                Err(e) => {
                    warn!("{}; using built-in defaults", e);
                    Ok(Self::default())
                }
            },
            ConfigSource::BuiltIn => {
                info!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(default_port(), 5790);
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_source_path() {
        assert!(ConfigSource::BuiltIn.path().is_none());
        let source = ConfigSource::CommandLine(PathBuf::from("/tmp/hcal.toml"));
        assert_eq!(source.path(), Some(Path::new("/tmp/hcal.toml")));
    }
}
