//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dashboard::DashboardSettings;
use crate::devices::{Device, ScanProfile};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persisted state configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_state_file")]
    pub state_file: String,

    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("efarm").to_string_lossy().to_string())
        .unwrap_or_else(|| "./efarm_data".to_string())
}

fn default_state_file() -> String {
    "state.json".to_string()
}

fn default_log_capacity() -> usize {
    crate::activity::MAX_ENTRIES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_file: default_state_file(),
            log_capacity: default_log_capacity(),
        }
    }
}

impl StorageConfig {
    /// Full path of the key-value state file
    pub fn state_path(&self) -> PathBuf {
        expand_home(&self.data_dir).join(&self.state_file)
    }
}

/// Expand a leading `~/` to the user's home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Dashboard behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Reading data file (JSON or CSV). Fallback data is used when unset.
    #[serde(default)]
    pub data_file: Option<String>,

    #[serde(default = "default_rotation_interval")]
    pub rotation_interval_secs: u64,

    #[serde(default = "default_scan_delay")]
    pub scan_delay_ms: u64,

    /// Preset devices a scan discovers
    #[serde(default)]
    pub scan_profile: ScanProfile,

    /// Explicit discovered devices; replaces the profile when non-empty
    #[serde(default)]
    pub discovered_devices: Vec<Device>,
}

fn default_rotation_interval() -> u64 {
    15
}

fn default_scan_delay() -> u64 {
    2000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            rotation_interval_secs: default_rotation_interval(),
            scan_delay_ms: default_scan_delay(),
            scan_profile: ScanProfile::default(),
            discovered_devices: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// The first existing file wins. A file that exists but cannot be read
    /// or parsed is an error rather than being skipped.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("efarm").join("config.toml")),
            Some(PathBuf::from("./efarm.toml")),
        ];

        Self::load_first(config_paths.iter().flatten())
    }

    fn load_first<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Result<Self, ConfigError> {
        match paths.into_iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = var("EFARM_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Dashboard overrides
        if let Some(data_file) = var("EFARM_DATA_FILE") {
            self.dashboard.data_file = Some(data_file);
        }
        if let Some(secs) = var("EFARM_ROTATION_SECS") {
            if let Ok(s) = secs.parse() {
                self.dashboard.rotation_interval_secs = s;
            }
        }

        // Logging overrides
        if let Some(level) = var("EFARM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("EFARM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Dashboard tunables derived from this config
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            log_capacity: self.storage.log_capacity,
            rotation_interval: Duration::from_secs(self.dashboard.rotation_interval_secs.max(1)),
            scan_delay: Duration::from_millis(self.dashboard.scan_delay_ms),
            discoverable: if self.dashboard.discovered_devices.is_empty() {
                self.dashboard.scan_profile.devices()
            } else {
                self.dashboard.discovered_devices.clone()
            },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# eFarm Configuration
#
# Environment variables override these settings:
# - EFARM_DATA_DIR
# - EFARM_DATA_FILE
# - EFARM_ROTATION_SECS
# - EFARM_LOG_LEVEL
# - EFARM_LOG_FORMAT

[storage]
# Directory holding persisted dashboard state
data_dir = "~/.local/share/efarm"

# Key-value state file inside data_dir
state_file = "state.json"

# Activity log entries to keep (at most 50)
log_capacity = 50

[dashboard]
# Sensor reading data (JSON array or CSV). Built-in sample data when unset.
# data_file = "farm-data.json"

# Seconds between switching to the next reading
rotation_interval_secs = 15

# Simulated device scan duration (ms)
scan_delay_ms = 2000

# Devices a scan discovers: dashboard, field or simulated
scan_profile = "dashboard"

# Or list them explicitly (replaces scan_profile):
# [[dashboard.discovered_devices]]
# id = "SoilProbe-23"
# name = "SoilProbe-23"
# status = "online"
# signal = "~ -60 dBm"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
