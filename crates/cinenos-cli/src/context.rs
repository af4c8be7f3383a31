use cine_catalog::{CachedCatalog, CatalogClient, HttpTransport};
use cine_config::{Config, CredentialStore, PathManager};
use cine_core::JsonStore;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let credentials_file = paths.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(credentials)
}

/// Paths and configuration shared by the commands that read config.toml
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    /// Data directory: `--data-dir` / `CINENOS_DATA_DIR`, then `storage.data_dir`, then the default
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        Self::load_from(PathManager::default(), data_dir)
    }

    pub fn load_from(paths: PathManager, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

        let paths = match data_dir.or_else(|| config.storage.data_dir.clone()) {
            Some(dir) => paths.with_data_dir(dir),
            None => paths,
        };
        debug!("Using data directory {}", paths.data_dir().display());

        Ok(Self { paths, config })
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        load_credentials(&self.paths)
    }

    /// Validated config, resolved API key, memoizing catalog
    pub fn catalog(&self) -> Result<CachedCatalog<HttpTransport>> {
        self.config
            .validate()
            .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

        let api_key = Config::resolve_api_key(&self.credentials()?).map_err(|e| eyre!("{}", e))?;
        let client = CatalogClient::from_config(&self.config, api_key)
            .map_err(|e| eyre!("Failed to create catalog client: {}", e))?;

        Ok(CachedCatalog::new(client, Duration::from_secs(self.config.cache.ttl_secs)))
    }

    pub fn store(&self) -> JsonStore {
        JsonStore::new(self.paths.data_dir())
    }

    pub fn region(&self) -> &str {
        &self.config.tmdb.region
    }
}
