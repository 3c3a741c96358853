//! Profile loading traits and types.
//!
//! A profile is one TOML file describing a hardware/motor variant: the
//! shared application section plus the physical configuration record the
//! derivation engine consumes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mcconv_common::config::{ConfigError, ConfigLoader, ProfileConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let profile = ProfileConfig::load(Path::new("config/profile.toml"))?;
//!     profile.validate()?;
//!     println!("Profile: {}", profile.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::drive::config::PhysicalConfig;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, per-formula tracing.
    Trace,
    /// Per-group derivation results.
    Debug,
    /// Derivation summary.
    #[default]
    Info,
    /// Saturated values and other suspicious results.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common fields every profile carries.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "acim-g431"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Hardware/motor variant identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// On-disk profile: `[shared]` plus the `[physical]` input record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Application section.
    pub shared: SharedConfig,
    /// Physical configuration record fed to the derivation engine.
    pub physical: PhysicalConfig,
}

impl ProfileConfig {
    /// Parse a profile from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate the application section.
    ///
    /// Physical preconditions are checked by the derivation engine, which
    /// reports every violated field at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Any serde-deserializable struct can be loaded from TOML.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
