use crate::error::{MemoError, Result};
use crate::storage::table_endpoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".memos.yml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemosConfig {
    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default)]
    pub log: LogSettings,
}

/// Which [`RemoteMemoService`](crate::storage::RemoteMemoService) backs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Rest,
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Rest => write!(f, "rest"),
            Backend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSettings {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_table() -> String {
    "memos".to_string()
}

fn default_api_key_env() -> String {
    "MEMOS_API_KEY".to_string()
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            url: None,
            table: default_table(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl RemoteSettings {
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// Checks that a REST backend has a usable endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Memory {
            return Ok(());
        }
        let url = self.url.as_deref().ok_or_else(|| {
            MemoError::Config("remote.url is required for the rest backend".to_string())
        })?;
        table_endpoint(url, &self.table)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl MemosConfig {
    /// Loads the nearest `.memos.yml`, then the per-user config, then defaults.
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Ok(path) => return Self::load(&path),
            Err(MemoError::NotInitialized) => {}
            Err(e) => return Err(e),
        }

        if let Some(path) = Self::user_config_file().filter(|p| p.exists()) {
            return Self::load(&path);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)?;
        let config: MemosConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(MemoError::NotInitialized);
            }
        }
    }

    pub fn user_config_file() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "memos")
            .map(|dirs| dirs.config_dir().join("config.yml"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MemosConfig::default();
        assert_eq!(config.remote.backend, Backend::Rest);
        assert_eq!(config.remote.table, "memos");
        assert_eq!(config.remote.api_key_env, "MEMOS_API_KEY");
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: MemosConfig =
            serde_yaml::from_str("remote:\n  url: https://example.com\n").unwrap();
        assert_eq!(config.remote.url.as_deref(), Some("https://example.com"));
        assert_eq!(config.remote.table, "memos");
        assert_eq!(config.remote.backend, Backend::Rest);
    }

    #[test]
    fn test_find_config_walks_upward() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = MemosConfig::default();
        config.remote.backend = Backend::Memory;
        config.save(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let found = MemosConfig::find_config_file(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(MemosConfig::discover(&nested).unwrap(), config);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut config = MemosConfig::default();
        config.remote.url = Some("http://localhost:54321".to_string());
        config.remote.table = "notes".to_string();
        config.save(&path).unwrap();

        assert_eq!(MemosConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rest_requires_url() {
        let mut settings = RemoteSettings::default();
        assert!(settings.validate().is_err());

        settings.url = Some("https://example.com".to_string());
        assert!(settings.validate().is_ok());

        settings.url = Some("nope".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_memory_needs_nothing() {
        let settings = RemoteSettings {
            backend: Backend::Memory,
            ..RemoteSettings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
