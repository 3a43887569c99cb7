//! Application configuration.
//!
//! # Responsibility
//! - Load an optional TOML file and fill in defaults for missing keys.
//! - Validate values before any subsystem sees them.
//!
//! # Invariants
//! - Unknown keys are rejected.
//! - `default_event_color` is a `#rrggbb` string.
//! - `recent_limit` is within `1..=RECENT_LIMIT_MAX`.

use crate::calendar::WeekStart;
use crate::db::DB_FILE_NAME;
use crate::logging::{default_log_level, normalize_level};
use crate::model::event::{is_hex_color, DEFAULT_EVENT_COLOR};
use crate::service::dashboard_service::{RECENT_DEFAULT_LIMIT, RECENT_LIMIT_MAX};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "daybook";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// On-disk shape; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
    default_event_color: Option<String>,
    week_start: Option<WeekStart>,
    recent_limit: Option<u32>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub default_event_color: String,
    pub week_start: WeekStart,
    pub recent_limit: u32,
    /// File the values came from, if any.
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            log_level: default_log_level().to_string(),
            default_event_color: DEFAULT_EVENT_COLOR.to_string(),
            week_start: WeekStart::default(),
            recent_limit: RECENT_DEFAULT_LIMIT,
            source: None,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given, else the per-user config file if it
    /// exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.is_file()),
        };
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut config = Self::from_file(file)?;
        info!(
            "event=config_load module=config status=ok path={}",
            path.display()
        );
        config.source = Some(path);
        Ok(config)
    }

    /// Parses TOML text without touching the file system.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::from_file(file)
    }

    /// Location of the SQLite database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let data_dir = file.data_dir.unwrap_or(defaults.data_dir);

        let log_level = match file.log_level {
            Some(level) => normalize_level(&level)
                .map_err(|err| ConfigError::Invalid(err.to_string()))?
                .to_string(),
            None => defaults.log_level,
        };

        let default_event_color = file
            .default_event_color
            .unwrap_or(defaults.default_event_color);
        if !is_hex_color(&default_event_color) {
            return Err(ConfigError::Invalid(format!(
                "default_event_color `{default_event_color}` is not #rrggbb"
            )));
        }

        let recent_limit = file.recent_limit.unwrap_or(defaults.recent_limit);
        if !(1..=RECENT_LIMIT_MAX).contains(&recent_limit) {
            return Err(ConfigError::Invalid(format!(
                "recent_limit must be within 1..={RECENT_LIMIT_MAX}, got {recent_limit}"
            )));
        }

        Ok(Self {
            log_dir: file.log_dir.unwrap_or_else(|| data_dir.join("logs")),
            data_dir,
            log_level,
            default_event_color,
            week_start: file.week_start.unwrap_or(defaults.week_start),
            recent_limit,
            source: None,
        })
    }
}

/// `<config_dir>/daybook/config.toml` for the current user.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
