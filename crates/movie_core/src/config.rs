//! Runtime configuration.
//!
//! # Responsibility
//! - Hold every setting the CLI needs to open storage, reach OMDb and write
//!   exports.
//! - Merge an optional TOML file over built-in defaults.
//!
//! # Invariants
//! - A config that passed `validate()` has a non-empty API key, a non-blank
//!   database path and a non-zero request timeout.

use crate::logging::default_log_level;
use crate::remote::DEFAULT_OMDB_URL;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "data/movies.db";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_SITE_TITLE: &str = "My Movie App";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    Invalid { field: &'static str, message: String },
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "missing OMDb API key; set OMDB_API_KEY (or API_KEY) or pass --api-key"
            ),
            Self::Invalid { field, message } => write!(f, "invalid `{field}`: {message}"),
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "cannot parse config `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Settings that may appear in a TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub db_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub template_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub site_title: Option<String>,
}

impl FileConfig {
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }
}

/// Effective application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub api_key: String,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub log_dir: PathBuf,
    pub log_level: String,
    /// `None` uses the embedded template.
    pub template_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub site_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            api_key: String::new(),
            api_url: DEFAULT_OMDB_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: default_log_level().to_string(),
            template_path: None,
            output_dir: PathBuf::from("."),
            site_title: DEFAULT_SITE_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Overlays every key present in `file` onto `self`.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(value) = file.db_path {
            self.db_path = value;
        }
        if let Some(value) = file.api_key {
            self.api_key = value;
        }
        if let Some(value) = file.api_url {
            self.api_url = value;
        }
        if let Some(value) = file.request_timeout_secs {
            self.request_timeout_secs = value;
        }
        if let Some(value) = file.log_dir {
            self.log_dir = value;
        }
        if let Some(value) = file.log_level {
            self.log_level = value;
        }
        if file.template_path.is_some() {
            self.template_path = file.template_path;
        }
        if let Some(value) = file.output_dir {
            self.output_dir = value;
        }
        if let Some(value) = file.site_title {
            self.site_title = value;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rejects configurations the CLI cannot start with.
    ///
    /// # Errors
    /// - `MissingApiKey` for a blank API key.
    /// - `Invalid` for a blank database path/API URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "db_path",
                message: "cannot be empty".to_string(),
            });
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_url",
                message: "cannot be empty".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs",
                message: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}
