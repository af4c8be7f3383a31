use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const WATCHED_FILE: &str = "watched.json";
/// Reserved; nothing reads or writes it yet
pub const FAVORITE_GENRES_FILE: &str = "favorite_genres.json";
/// Reserved; nothing reads or writes it yet
pub const APP_STATE_FILE: &str = "app_state.json";

/// Load a JSON document.
///
/// A missing, unreadable or corrupt file is replaced by `default`, which is
/// written back to `path` and returned. A file that parses but doesn't fit
/// `T` is first copied to `<name>.bak`. Failing to write the default is
/// logged, never returned.
pub fn load_json<T>(path: &Path, default: T) -> T
where
    T: DeserializeOwned + Serialize,
{
    ensure_parent(path);

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(data) => {
                debug!("Loaded {}", path.display());
                return data;
            }
            Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
                warn!("Corrupt JSON in {}: {}. Resetting to default.", path.display(), e);
            }
            Err(e) => {
                let backup = backup_path(path);
                warn!(
                    "Unexpected data in {}: {}. Keeping a copy at {} and resetting to default.",
                    path.display(),
                    e,
                    backup.display()
                );
                if let Err(e) = std::fs::copy(path, &backup) {
                    warn!("Failed to back up {}: {}", path.display(), e);
                }
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("{} does not exist yet, creating it", path.display());
        }
        Err(e) => {
            warn!("Failed to read {}: {}. Resetting to default.", path.display(), e);
        }
    }

    if let Err(e) = save_json(path, &default) {
        warn!("Failed to write default data to {}: {}", path.display(), e);
    }
    default
}

/// Overwrite a JSON document (pretty-printed, 4-space indent).
///
/// Written to a sibling temp file first, then renamed over the target.
pub fn save_json<T>(path: &Path, data: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)
        .map_err(|e| anyhow!("Failed to serialize {}: {}", path.display(), e))?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, &buf)
        .map_err(|e| anyhow!("Failed to write {}: {}", temp_path.display(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| anyhow!("Failed to replace {}: {}", path.display(), e))?;

    debug!("Saved {} ({} bytes)", path.display(), buf.len());
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("Failed to create data directory {}: {}", parent.display(), e);
        }
    }
}

/// The data directory and the documents it holds
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn watched_file(&self) -> PathBuf {
        self.path(WATCHED_FILE)
    }

    pub fn favorite_genres_file(&self) -> PathBuf {
        self.path(FAVORITE_GENRES_FILE)
    }

    pub fn app_state_file(&self) -> PathBuf {
        self.path(APP_STATE_FILE)
    }

    pub fn load<T>(&self, file_name: &str, default: T) -> T
    where
        T: DeserializeOwned + Serialize,
    {
        load_json(&self.path(file_name), default)
    }

    pub fn save<T>(&self, file_name: &str, data: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        save_json(&self.path(file_name), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct AppState {
        last_tab: String,
        picks: u32,
    }

    #[test]
    fn test_load_missing_returns_and_persists_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("watched.json");

        let loaded: Vec<u64> = load_json(&path, vec![]);
        assert!(loaded.is_empty());
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        let state = AppState {
            last_tab: "Sorteio".to_string(),
            picks: 3,
        };

        store.save(APP_STATE_FILE, &state).unwrap();
        let loaded = store.load(
            APP_STATE_FILE,
            AppState {
                last_tab: String::new(),
                picks: 0,
            },
        );
        assert_eq!(loaded, state);
        assert!(!dir.path().join("app_state.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_replaced_by_default() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(store.favorite_genres_file(), "{not json").unwrap();

        let mut default = BTreeMap::new();
        default.insert("Ação".to_string(), 28u32);
        let loaded = store.load(FAVORITE_GENRES_FILE, default.clone());
        assert_eq!(loaded, default);

        let on_disk: BTreeMap<String, u32> =
            serde_json::from_str(&std::fs::read_to_string(store.favorite_genres_file()).unwrap()).unwrap();
        assert_eq!(on_disk, default);
    }

    #[test]
    fn test_wrong_shape_is_replaced_by_default() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(store.watched_file(), r#"{"id": 1}"#).unwrap();

        let loaded: Vec<u64> = store.load(WATCHED_FILE, Vec::new());
        assert!(loaded.is_empty());
        assert_eq!(std::fs::read_to_string(store.watched_file()).unwrap(), "[]");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("watched.json.bak")).unwrap(),
            r#"{"id": 1}"#
        );
    }

    #[test]
    fn test_syntax_error_leaves_no_backup() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(store.watched_file(), "[{\"id\": 1,").unwrap();

        let loaded: Vec<u64> = store.load(WATCHED_FILE, Vec::new());
        assert!(loaded.is_empty());
        assert!(!dir.path().join("watched.json.bak").exists());
    }

    #[test]
    fn test_pretty_output_keeps_non_ascii() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nested"));
        store.save("genres.json", &vec!["Ficção Científica"]).unwrap();

        let content = std::fs::read_to_string(store.path("genres.json")).unwrap();
        assert_eq!(content, "[\n    \"Ficção Científica\"\n]");
    }

    #[test]
    fn test_well_known_paths() {
        let store = JsonStore::new("/var/lib/cinenos");
        assert_eq!(store.watched_file(), PathBuf::from("/var/lib/cinenos/watched.json"));
        assert_eq!(store.favorite_genres_file(), PathBuf::from("/var/lib/cinenos/favorite_genres.json"));
        assert_eq!(store.app_state_file(), PathBuf::from("/var/lib/cinenos/app_state.json"));
    }
}
