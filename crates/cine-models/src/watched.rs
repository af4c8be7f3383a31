use crate::media::MediaType;
use chrono::{DateTime, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// One row of the local "already watched" history.
///
/// Entries are appended once and never edited. `watched_date` is a local
/// wall-clock time stored ISO-8601 style without an offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(with = "iso_local")]
    pub watched_date: NaiveDateTime,
}

impl WatchedEntry {
    pub fn new(
        id: u64,
        media_type: MediaType,
        title: impl Into<String>,
        poster_path: Option<String>,
        watched_date: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            media_type,
            title: title.into(),
            poster_path,
            // Stored with microsecond precision
            watched_date: watched_date.trunc_subsecs(6),
        }
    }

    /// e.g. "31/12/2024 às 21:30"
    pub fn watched_label(&self) -> String {
        self.watched_date.format("%d/%m/%Y às %H:%M").to_string()
    }
}

mod iso_local {
    use super::*;
    use serde::{Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>()
            .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.naive_local()))
            .map_err(|e| serde::de::Error::custom(format!("invalid watched_date '{}': {}", raw, e)))
    }
}
