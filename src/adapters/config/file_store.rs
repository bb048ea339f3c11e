use crate::ports::{AppConfig, ConfigError, ConfigResult, ConfigStore};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "TODO_PROJECTS_DATA_DIR";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
    log_level: Option<String>,
}

pub struct FileConfigStore {
    config_path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::ReadError("Cannot determine config directory".to_string())
        })?;

        Ok(Self::with_path(
            config_dir.join("todo-projects").join("config.json"),
        ))
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    fn ensure_config_dir(&self) -> ConfigResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_file(&self) -> ConfigResult<AppConfig> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            // No config file yet, use defaults
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
            Err(e) => return Err(ConfigError::ReadError(e.to_string())),
        };

        let config_file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let defaults = AppConfig::default();
        Ok(AppConfig {
            data_dir: config_file.data_dir,
            storage_key: config_file.storage_key.unwrap_or(defaults.storage_key),
            log_level: config_file.log_level.unwrap_or(defaults.log_level),
        })
    }
}

/// Environment wins over the config file for the data directory.
fn apply_env_overrides(config: &mut AppConfig, data_dir: Option<OsString>) {
    if let Some(dir) = data_dir.filter(|dir| !dir.is_empty()) {
        config.data_dir = Some(PathBuf::from(dir));
    }
}

impl ConfigStore for FileConfigStore {
    fn load_config(&self) -> ConfigResult<AppConfig> {
        let mut config = self.read_file()?;
        apply_env_overrides(&mut config, std::env::var_os(DATA_DIR_ENV));
        Ok(config)
    }

    fn save_config(&self, config: &AppConfig) -> ConfigResult<()> {
        self.ensure_config_dir()?;

        let config_file = ConfigFile {
            data_dir: config.data_dir.clone(),
            storage_key: Some(config.storage_key.clone()),
            log_level: Some(config.log_level.clone()),
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        fs::write(&self.config_path, content).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}
