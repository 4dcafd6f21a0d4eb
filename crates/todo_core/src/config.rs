//! Runtime configuration for front ends.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level.
//!
//! # Resolution order
//! explicit override > environment variable > platform default.
//!
//! | setting   | env var          | default                              |
//! |-----------|------------------|--------------------------------------|
//! | db path   | `TODO_DB_PATH`   | `<data_dir>/todo/todo.sqlite3`       |
//! | log dir   | `TODO_LOG_DIR`   | `<data_dir>/todo/logs`               |
//! | log level | `TODO_LOG_LEVEL` | `debug` (debug build), else `info`   |

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
pub const LOG_DIR_ENV: &str = "TODO_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TODO_LOG_LEVEL";

const APP_DIR_NAME: &str = "todo";
const DB_FILE_NAME: &str = "todo.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Explicit settings, typically from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No override, no env var and no platform data directory.
    NoDataDir,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "cannot determine a data directory; set {DB_PATH_ENV} and {LOG_DIR_ENV}"
            ),
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Resolves configuration from the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(
            overrides,
            |name| std::env::var(name).ok(),
            dirs::data_dir(),
        )
    }

    /// Resolves configuration from an injected environment lookup and data
    /// directory.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let env_path = |name: &str| {
            env(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        let app_dir = data_dir.map(|dir| dir.join(APP_DIR_NAME));

        let db_path = overrides
            .db_path
            .or_else(|| env_path(DB_PATH_ENV))
            .or_else(|| app_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME)))
            .ok_or(ConfigError::NoDataDir)?;
        let log_dir = overrides
            .log_dir
            .or_else(|| env_path(LOG_DIR_ENV))
            .or_else(|| app_dir.as_ref().map(|dir| dir.join(LOG_DIR_NAME)))
            .ok_or(ConfigError::NoDataDir)?;

        let log_level = match overrides.log_level.or_else(|| env(LOG_LEVEL_ENV)) {
            Some(raw) => normalize_level(&raw).map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}
