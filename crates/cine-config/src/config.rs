use crate::credentials::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable that takes precedence over the stored API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No TMDB API key configured. Set TMDB_API_KEY or run `cinenos config set-key`")]
    MissingApiKey,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Streaming providers the lists are restricted to (Netflix, Prime Video, Max, ...)
    #[serde(default = "default_provider_ids")]
    pub provider_ids: Vec<u32>,
    /// Genre left out of every discover query (animation)
    #[serde(default = "default_excluded_genre_id")]
    pub excluded_genre_id: Option<u32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    /// Where watched.json and friends live; defaults to the platform data path
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "pt-BR".to_string()
}

fn default_region() -> String {
    "BR".to_string()
}

fn default_provider_ids() -> Vec<u32> {
    vec![8, 119, 1899, 384]
}

fn default_excluded_genre_id() -> Option<u32> {
    Some(16)
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_ttl_secs() -> u64 {
    3600 // 1 hour
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            region: default_region(),
            provider_ids: default_provider_ids(),
            excluded_genre_id: default_excluded_genre_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or fall back to defaults when it doesn't exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("tmdb.base_url cannot be empty".to_string()));
        }
        if self.tmdb.provider_ids.is_empty() {
            return Err(ConfigError::Invalid("tmdb.provider_ids cannot be empty".to_string()));
        }
        if self.tmdb.region.len() != 2 {
            return Err(ConfigError::Invalid(format!(
                "tmdb.region must be a two-letter country code, got '{}'",
                self.tmdb.region
            )));
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Invalid("cache.ttl_secs must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Resolve the API key: environment first, then the credentials file
    pub fn resolve_api_key(credentials: &CredentialStore) -> Result<String, ConfigError> {
        Self::api_key_from(std::env::var(API_KEY_ENV).ok(), credentials)
    }

    fn api_key_from(env_value: Option<String>, credentials: &CredentialStore) -> Result<String, ConfigError> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| credentials.get_tmdb_api_key().cloned())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tmdb.language = "en-US".to_string();
        config.cache.ttl_secs = 60;
        config.storage.data_dir = Some(PathBuf::from("/tmp/cinenos-data"));

        config.save_to_file(file.path()).unwrap();
        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[tmdb]\nregion = \"PT\"\n").unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.tmdb.region, "PT");
        assert_eq!(loaded.tmdb.language, "pt-BR");
        assert_eq!(loaded.tmdb.provider_ids, vec![8, 119, 1899, 384]);
        assert_eq!(loaded.tmdb.excluded_genre_id, Some(16));
        assert_eq!(loaded.cache.ttl_secs, 3600);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.provider_ids.clear();
        assert!(config.validate().is_err());

        config = Config::default();
        config.cache.ttl_secs = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.tmdb.region = "Brazil".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_precedence() {
        let dir = TempDir::new().unwrap();
        let mut creds = CredentialStore::new(dir.path().join("credentials.toml"));

        assert!(matches!(
            Config::api_key_from(None, &creds),
            Err(ConfigError::MissingApiKey)
        ));

        creds.set_tmdb_api_key("from-file".to_string());
        assert_eq!(Config::api_key_from(None, &creds).unwrap(), "from-file");
        assert_eq!(
            Config::api_key_from(Some("from-env".to_string()), &creds).unwrap(),
            "from-env"
        );
        assert_eq!(Config::api_key_from(Some("  ".to_string()), &creds).unwrap(), "from-file");
    }
}
