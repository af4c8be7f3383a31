use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Secrets kept apart from config.toml so the config can be shared freely
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.get("tmdb_api_key")
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set("tmdb_api_key".to_string(), key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_tmdb_api_key("abc123".to_string());
        store.save().unwrap();

        let mut reloaded = CredentialStore::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_tmdb_api_key().map(String::as_str), Some("abc123"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert!(store.get_tmdb_api_key().is_none());
    }
}
