use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use lookup_core::{DictionarySite, DEFAULT_DICTIONARY_BASE};
use lookup_engine::{EngineConfig, PLACEHOLDER_AUDIO_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_ENV_VAR: &str = "LOOKUP_CONFIG";
const DEFAULT_CONFIG_FILENAME: &str = "lookup.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid dictionary base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
    /// Off unless set; a stalled fetch then only stalls its own lookup.
    pub request_timeout_secs: Option<u64>,
    pub ignored_audio_urls: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DICTIONARY_BASE.to_string(),
            log_destination: LogDestination::Terminal,
            log_level: "info".to_string(),
            log_file: PathBuf::from("./lookup.log"),
            request_timeout_secs: None,
            ignored_audio_urls: vec![PLACEHOLDER_AUDIO_URL.to_string()],
        }
    }
}

impl AppConfig {
    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let site = DictionarySite::new(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        let mut config = EngineConfig::with_site(site);
        config.fetch.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        config.dictionary.ignored_audio_urls = self.ignored_audio_urls.clone();
        Ok(config)
    }
}

/// `$LOOKUP_CONFIG`, else `./lookup.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// Reads the config file. A missing file is `Ok(None)`.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}
