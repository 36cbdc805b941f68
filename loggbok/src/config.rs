//! File and environment configuration surface.
//!
//! The logging topology can be set up programmatically through the
//! `set_*` calls, or declaratively from a YAML file merged with
//! `LOGGBOK_*` environment overrides:
//!
//! ```yaml
//! level: INFO
//! file: /var/log/app.log
//! rotate_check_interval: 60s
//! access:
//!   - name: order
//!     file: /var/log/access.log
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

use loggbok_core::{LogError, Severity};

use crate::registry::{set_access_log_file, set_default_log_file};
use crate::scheduler;

/// Unified configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found error.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Figment parsing error.
    #[error("configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),

    /// Applying the configuration to the logging facility failed.
    #[error("logging setup failed: {0}")]
    Setup(#[from] LogError),
}

/// One named access channel.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccessChannelConfig {
    /// Channel name used by `access!` call sites.
    #[validate(length(min = 1, message = "channel name must not be empty"))]
    pub name: String,

    /// Backing file, opened in append mode.
    pub file: PathBuf,
}

/// Top-level logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_unique_channel_names))]
pub struct LogConfig {
    /// Minimum severity emitted on the default channel.
    #[validate(custom(function = validate_level_name))]
    #[serde(default = "default_level")]
    pub level: String,

    /// Default leveled channel destination. Standard output when absent.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Named access channels.
    #[serde(default)]
    #[validate(nested)]
    pub access: Vec<AccessChannelConfig>,

    /// How often the background sweep checks for a date change.
    #[serde(default = "default_rotate_check_interval", with = "humantime_serde")]
    pub rotate_check_interval: Duration,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
            access: Vec::new(),
            rotate_check_interval: default_rotate_check_interval(),
        }
    }
}

fn default_level() -> String {
    "DEBUG".into()
}

fn default_rotate_check_interval() -> Duration {
    scheduler::DEFAULT_SWEEP_INTERVAL
}

fn validate_level_name(level: &str) -> Result<(), ValidationError> {
    level
        .parse::<Severity>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_level"))
}

fn validate_unique_channel_names(config: &LogConfig) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for channel in &config.access {
        if !seen.insert(channel.name.as_str()) {
            return Err(ValidationError::new("duplicate_channel_name"));
        }
    }
    Ok(())
}

impl LogConfig {
    /// Load configuration from a YAML file, with `LOGGBOK_*` environment
    /// variables taking precedence.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_owned()));
        }

        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("LOGGBOK_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Apply the configuration: set the threshold, bind the default
    /// channel, register access channels, and start the rotation sweep
    /// when any file-backed channel exists.
    pub fn apply(&self) -> Result<(), ConfigError> {
        self.validate()?;
        loggbok_core::set_level(&self.level)?;

        if self.file.is_some() || !self.access.is_empty() {
            scheduler::ensure_started(self.rotate_check_interval)?;
        }
        if let Some(file) = &self.file {
            set_default_log_file(file)?;
        }
        for channel in &self.access {
            set_access_log_file(&channel.name, &channel.file)?;
        }
        Ok(())
    }
}
