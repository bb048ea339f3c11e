use crate::application::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    ReadError(String),

    #[error("Failed to write configuration: {0}")]
    WriteError(String),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parses `log_level` as a `tracing` level name such as "debug" or "WARN".
    pub fn tracing_level(&self) -> ConfigResult<tracing::Level> {
        self.log_level.trim().parse().map_err(|_| {
            ConfigError::InvalidFormat(format!("unknown log level `{}`", self.log_level))
        })
    }
}

pub trait ConfigStore: Send + Sync {
    fn load_config(&self) -> ConfigResult<AppConfig>;
    fn save_config(&self, config: &AppConfig) -> ConfigResult<()>;
}
