//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `klfhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use klfhub_app::services::discovery::ScanConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bridge connection settings.
    pub bridge: BridgeSection,
    /// Discovery scan settings.
    pub scan: ScanSection,
    /// Logging settings.
    pub logging: LoggingSection,
    /// Device directory settings.
    pub directory: DirectorySection,
}

/// Bridge connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BridgeSection {
    /// Display name for the bridge.
    pub name: String,
    /// Hostname or IP address of the bridge.
    pub host: String,
    /// TCP port of the bridge API.
    pub port: u16,
    /// API password.
    pub password: String,
}

/// Discovery scan configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    /// Seconds between two background scan cycles.
    pub interval_secs: u64,
    /// Wall-clock budget for one scan, in seconds.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Device directory settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectorySection {
    /// Seed the virtual directory with the demo inventory.
    pub seed_demo: bool,
}

impl Config {
    /// Load configuration from `klfhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("klfhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("KLFHUB_HOST") {
            self.bridge.host = val;
        }
        if let Ok(val) = std::env::var("KLFHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.bridge.port = port;
            }
        }
        if let Ok(val) = std::env::var("KLFHUB_PASSWORD") {
            self.bridge.password = val;
        }
        if let Ok(val) = std::env::var("KLFHUB_SCAN_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.scan.interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("KLFHUB_SCAN_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.scan.timeout_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("KLFHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.scan.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scan interval must be non-zero".to_string(),
            ));
        }
        if self.scan.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "scan timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Scan pacing for the discovery service.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            interval: Duration::from_secs(self.scan.interval_secs),
            budget: Duration::from_secs(self.scan.timeout_secs),
        }
    }

    /// The opaque handler-configuration value for the bridge handler.
    #[must_use]
    pub fn bridge_value(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.bridge.name,
            "host": self.bridge.host,
            "port": self.bridge.port,
            "password": self.bridge.password,
        })
    }
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            name: "KLF200".to_string(),
            host: "192.168.1.1".to_string(),
            port: 80,
            password: "velux123".to_string(),
        }
    }
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            timeout_secs: 300,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "klfhubd=info,klfhub=info".to_string(),
        }
    }
}

impl Default for DirectorySection {
    fn default() -> Self {
        Self { seed_demo: true }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
