use crate::store::{load_json, save_json, JsonStore};
use anyhow::Result;
use chrono::NaiveDateTime;
use cine_models::{MediaDetails, MediaType, WatchedEntry};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Added,
    AlreadyWatched,
}

/// Build the history row for a title the user just finished
pub fn entry_from_details(media_type: MediaType, details: &MediaDetails, watched_at: NaiveDateTime) -> WatchedEntry {
    WatchedEntry::new(
        details.item.id,
        media_type,
        details.item.display_title(),
        details.item.poster_path.clone(),
        watched_at,
    )
}

/// Append-only list of watched titles backed by `watched.json`.
///
/// Rows that don't decode as a [`WatchedEntry`] are skipped on load but kept
/// in `records`, so saving never drops them from the file.
#[derive(Debug)]
pub struct WatchedHistory {
    path: PathBuf,
    records: Vec<Value>,
    entries: Vec<WatchedEntry>,
}

impl WatchedHistory {
    pub fn load(store: &JsonStore) -> Self {
        let path = store.watched_file();
        let records: Vec<Value> = load_json(&path, Vec::new());
        let entries = records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| match WatchedEntry::deserialize(record) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping watched entry #{} in {}: {}", i, path.display(), e);
                    None
                }
            })
            .collect();
        Self { path, records, entries }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
            || self
                .records
                .iter()
                .any(|r| r.get("id").and_then(Value::as_u64) == Some(id))
    }

    /// Append `entry` and persist, unless an entry with the same id is already there
    pub fn mark_watched(&mut self, entry: WatchedEntry) -> Result<MarkOutcome> {
        if self.contains(entry.id) {
            return Ok(MarkOutcome::AlreadyWatched);
        }

        info!("Marking {} {} ('{}') as watched", entry.media_type, entry.id, entry.title);
        self.records.push(serde_json::to_value(&entry)?);
        if let Err(e) = save_json(&self.path, &self.records) {
            self.records.pop();
            return Err(e);
        }
        self.entries.push(entry);
        Ok(MarkOutcome::Added)
    }

    /// In insertion order
    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn entries_newest_first(&self) -> impl Iterator<Item = &WatchedEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cine_models::MediaItem;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap().and_hms_opt(20, 0, 0).unwrap()
    }

    fn entry(id: u64, title: &str, d: u32) -> WatchedEntry {
        WatchedEntry::new(id, MediaType::Movie, title, None, day(d))
    }

    #[test]
    fn test_new_history_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("data"));

        let history = WatchedHistory::load(&store);
        assert!(history.is_empty());
        assert!(store.watched_file().exists());
    }

    #[test]
    fn test_duplicate_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        let mut history = WatchedHistory::load(&store);

        assert_eq!(history.mark_watched(entry(603, "Matrix", 1)).unwrap(), MarkOutcome::Added);
        let before = std::fs::read_to_string(store.watched_file()).unwrap();

        // Same id, even with a different title and type, is not appended
        let mut again = entry(603, "Matrix Reloaded", 2);
        again.media_type = MediaType::Tv;
        assert_eq!(history.mark_watched(again).unwrap(), MarkOutcome::AlreadyWatched);

        assert_eq!(history.len(), 1);
        assert_eq!(std::fs::read_to_string(store.watched_file()).unwrap(), before);
    }

    #[test]
    fn test_history_persists_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());

        let mut history = WatchedHistory::load(&store);
        history.mark_watched(entry(1, "Primeiro", 1)).unwrap();
        history.mark_watched(entry(2, "Segundo", 2)).unwrap();
        history.mark_watched(entry(3, "Terceiro", 3)).unwrap();

        let reloaded = WatchedHistory::load(&store);
        assert_eq!(reloaded.entries(), history.entries());

        let newest: Vec<u64> = reloaded.entries_newest_first().map(|e| e.id).collect();
        assert_eq!(newest, vec![3, 2, 1]);
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(
            store.watched_file(),
            r#"[
    {
        "id": 1396,
        "type": "tv",
        "title": "Breaking Bad",
        "poster_path": "/bb.jpg",
        "watched_date": "2025-01-10T22:15:00.000001"
    }
]"#,
        )
        .unwrap();

        let history = WatchedHistory::load(&store);
        assert!(history.contains(1396));
        assert_eq!(history.entries()[0].watched_label(), "10/01/2025 às 22:15");
    }

    #[test]
    fn test_undecodable_rows_are_skipped_not_erased() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(
            store.watched_file(),
            r#"[
    {"id": 1, "type": "movie", "title": "Matrix", "poster_path": null, "watched_date": "2025-03-01T20:00:00"},
    {"id": 2, "type": "movie", "title": null, "poster_path": null, "watched_date": "2025-03-02T20:00:00"}
]"#,
        )
        .unwrap();

        let mut history = WatchedHistory::load(&store);
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].title, "Matrix");
        assert!(history.contains(2));
        assert!(!store.path("watched.json.bak").exists());

        let on_disk: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(store.watched_file()).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);

        // Appending keeps the row that didn't decode
        assert_eq!(history.mark_watched(entry(3, "Duna", 3)).unwrap(), MarkOutcome::Added);
        assert_eq!(history.mark_watched(entry(2, "Outro", 4)).unwrap(), MarkOutcome::AlreadyWatched);
        let on_disk: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(store.watched_file()).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 3);
        assert!(on_disk[1]["title"].is_null());
        assert_eq!(on_disk[2]["title"], "Duna");
    }

    #[test]
    fn test_entry_from_details() {
        let details = MediaDetails {
            item: MediaItem {
                id: 1399,
                name: Some("Game of Thrones".to_string()),
                poster_path: Some("/got.jpg".to_string()),
                ..MediaItem::default()
            },
            ..MediaDetails::default()
        };

        let entry = entry_from_details(MediaType::Tv, &details, day(4));
        assert_eq!(entry.id, 1399);
        assert_eq!(entry.title, "Game of Thrones");
        assert_eq!(entry.poster_path.as_deref(), Some("/got.jpg"));
        assert_eq!(entry.media_type, MediaType::Tv);
        assert_eq!(entry.watched_date, day(4));
    }
}
