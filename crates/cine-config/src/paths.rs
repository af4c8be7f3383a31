use anyhow::Result;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "cinenos";

/// Base path forced through `CINENOS_BASE_PATH` (containers, tests), if any
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("CINENOS_BASE_PATH")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_DIR);

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, data in a subdirectory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    /// Point the data directory somewhere else (config `storage.data_dir`, `--data-dir`)
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/cinenos on Linux), or ./ as a last resort
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base(PathBuf::from("/srv/cinenos"));
        assert_eq!(paths.config_file(), PathBuf::from("/srv/cinenos/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/srv/cinenos/credentials.toml"));
        assert_eq!(paths.data_dir(), Path::new("/srv/cinenos/data"));
    }

    #[test]
    fn test_data_dir_override_and_ensure() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().join("base"))
            .with_data_dir(dir.path().join("elsewhere"));
        paths.ensure_directories().unwrap();

        assert!(dir.path().join("base").is_dir());
        assert!(dir.path().join("elsewhere").is_dir());
        assert!(!dir.path().join("base").join("data").exists());
    }
}
