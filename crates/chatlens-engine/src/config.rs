use crate::{Error, Result};
use chatlens_state::FsStorage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Resolve the configuration directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CHATLENS_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.chatlens (fallback for systems without XDG)
pub fn resolve_config_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CHATLENS_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("chatlens"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".chatlens"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_poll_interval() -> u64 {
    10
}

fn default_stop_on_terminal() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// Jobs API connection and polling cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_token: Option<String>,

    /// Seconds between job status re-fetches
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Stop polling once a job reaches a terminal status
    #[serde(default = "default_stop_on_terminal")]
    pub stop_on_terminal: bool,
}

impl ApiConfig {
    /// Polling cadence as a duration, for handing to the jobs poller
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            poll_interval_secs: default_poll_interval(),
            stop_on_terminal: default_stop_on_terminal(),
        }
    }
}

/// Context snapshot persistence location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit snapshot path; the platform default is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_config_dir(None)?.join("config.toml"))
    }

    /// Context snapshot location: the explicit override when set, otherwise
    /// the platform default
    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(FsStorage::default_path()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.poll_interval_secs, 10);
        assert!(config.api.stop_on_terminal);
        assert_eq!(config.storage.path, None);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://assistant.internal:9443".to_string();
        config.api.poll_interval_secs = 5;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.api.base_url, "https://assistant.internal:9443");
        assert_eq!(loaded.api.poll_interval_secs, 5);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.api.base_url, default_base_url());

        Ok(())
    }

    #[test]
    fn test_storage_path_prefers_explicit_override() -> Result<()> {
        let mut config = Config::default();
        config.storage.path = Some(PathBuf::from("/tmp/ctx.json"));
        assert_eq!(config.storage_path()?, PathBuf::from("/tmp/ctx.json"));
        Ok(())
    }

    #[test]
    fn test_poll_interval_conversion() {
        let config = Config::default();
        assert_eq!(config.api.poll_interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[api]\nbase_url = \"http://10.0.0.5\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.api.base_url, "http://10.0.0.5");
        assert_eq!(config.api.poll_interval_secs, 10);

        Ok(())
    }
}
