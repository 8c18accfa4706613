use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::JsonStorage;

/// Environment variable pointing at an alternate config file; used by the
/// integration tests to keep real user data out of reach.
pub const CONFIG_ENV: &str = "TASKDECK_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

fn validate_data_dir(path: &str) -> Result<PathBuf, ConfigError> {
    // Check for null bytes and other invalid characters
    if path.contains('\0') {
        return Err(ConfigError::InvalidConfig(
            "Path contains invalid characters".to_string(),
        ));
    }

    let path = shellexpand::tilde(path);
    let path = PathBuf::from(path.as_ref());

    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "Path cannot be empty".to_string(),
        ));
    }

    Ok(path)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub default_category: Option<String>,
    #[serde(default = "default_priority")]
    pub default_priority: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_category: None,
            default_priority: default_priority(),
        }
    }
}

impl Config {
    pub fn with_defaults() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_category: None,
            default_priority: default_priority(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.data_dir {
            validate_data_dir(path)?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Option<String> {
    let home = dirs::home_dir().expect("Could not determine home directory");
    Some(
        home.join(".config")
            .join("taskdeck")
            .to_string_lossy()
            .to_string(),
    )
}

fn default_priority() -> Option<String> {
    Some("Default".to_string())
}

fn default_config_path() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("taskdeck").join("config.json")
}

pub struct ConfigManager {
    path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Resolution order: explicit path, then `TASKDECK_CONFIG`, then
    /// `~/.config/taskdeck/config.json`. A missing file means defaults.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(default_config_path);

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Config::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            Config::default()
        };

        Ok(Self { path, config })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data.dir" => self.config.data_dir.clone(),
            "default-category" => self.config.default_category.clone(),
            "default-priority" => self.config.default_priority.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "data.dir" => {
                let path = validate_data_dir(value)?;
                self.config.data_dir = Some(path.to_string_lossy().to_string());
            }
            "default-category" => {
                // Category existence is checked against the stores when the
                // value is actually used, not here.
                self.config.default_category = Some(value.to_string());
            }
            "default-priority" => {
                self.config.default_priority = Some(value.to_string());
            }
            _ => {
                return Err(ConfigError::InvalidKey(key.to_string()));
            }
        }
        self.config.validate()?;
        self.save()
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        match key {
            "data.dir" => self.config.data_dir = None,
            "default-category" => self.config.default_category = None,
            "default-priority" => self.config.default_priority = None,
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        self.save()
    }

    /// `(key, value, is_default)` triples: the built-in defaults first, then
    /// any values set in the config file.
    pub fn list(&self) -> Vec<(String, String, bool)> {
        let mut list = Vec::new();
        let defaults = Config::with_defaults();

        list.push((
            "data.dir".to_string(),
            defaults.data_dir.unwrap_or_else(|| "null".to_string()),
            true,
        ));
        list.push((
            "default-priority".to_string(),
            defaults
                .default_priority
                .unwrap_or_else(|| "null".to_string()),
            true,
        ));

        if let Some(value) = self.config.data_dir.clone() {
            list.push(("data.dir".to_string(), value, false));
        }
        if let Some(value) = self.config.default_category.clone() {
            list.push(("default-category".to_string(), value, false));
        }
        if let Some(value) = self.config.default_priority.clone() {
            list.push(("default-priority".to_string(), value, false));
        }

        list
    }

    /// Effective data directory: the configured value or the default, with
    /// `~` expanded.
    pub fn data_dir(&self) -> PathBuf {
        let configured = self
            .config
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| ".".to_string());
        PathBuf::from(shellexpand::tilde(&configured).to_string())
    }

    pub fn default_category(&self) -> Option<String> {
        self.config.default_category.clone()
    }

    pub fn default_priority(&self) -> Option<String> {
        self.config.default_priority.clone()
    }

    pub fn create_storage(&self) -> JsonStorage {
        JsonStorage::new(self.data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_manager() -> (ConfigManager, TempDir) {
        let temp_dir = tempfile::Builder::new()
            .prefix("taskdeck_test")
            .tempdir()
            .expect("Failed to create temporary directory");
        let config_path = temp_dir.path().join("config.json");
        let manager = ConfigManager::new(Some(&config_path)).expect("Failed to create manager");
        (manager, temp_dir)
    }

    #[test]
    fn test_config_manager_set_get_unset() {
        let (mut manager, temp_dir) = test_manager();

        let data_dir = temp_dir.path().join("data");
        manager
            .set("data.dir", data_dir.to_str().unwrap())
            .unwrap();
        assert_eq!(
            manager.get("data.dir"),
            Some(data_dir.to_str().unwrap().to_string())
        );

        manager.set("default-category", "Work").unwrap();
        assert_eq!(manager.get("default-category"), Some("Work".to_string()));

        manager.unset("default-category").unwrap();
        assert_eq!(manager.get("default-category"), None);
    }

    #[test]
    fn test_config_manager_rejects_unknown_key() {
        let (mut manager, _temp_dir) = test_manager();
        assert!(matches!(
            manager.set("storage.type", "json"),
            Err(ConfigError::InvalidKey(_))
        ));
        assert!(matches!(
            manager.unset("storage.type"),
            Err(ConfigError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_config_manager_defaults() {
        let (manager, _temp_dir) = test_manager();
        assert_eq!(manager.get("default-priority"), Some("Default".to_string()));
        assert_eq!(manager.get("default-category"), None);
    }

    #[test]
    fn test_config_survives_reload() {
        let (mut manager, temp_dir) = test_manager();
        manager.set("default-category", "Home").unwrap();

        let config_path = temp_dir.path().join("config.json");
        let reloaded = ConfigManager::new(Some(&config_path)).unwrap();
        assert_eq!(reloaded.get("default-category"), Some("Home".to_string()));
    }

    #[test]
    fn test_config_manager_list_marks_defaults() {
        let (manager, _temp_dir) = test_manager();
        let list = manager.list();
        assert!(list
            .iter()
            .any(|(key, value, is_default)| key == "default-priority"
                && value == "Default"
                && *is_default));
    }

    #[test]
    fn test_data_dir_rejects_null_bytes() {
        let (mut manager, _temp_dir) = test_manager();
        assert!(matches!(
            manager.set("data.dir", "bad\0path"),
            Err(ConfigError::InvalidConfig(_))
        ));
    }
}
