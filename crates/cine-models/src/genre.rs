use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Genre id → localized name
pub type GenreMap = BTreeMap<u32, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Response body of `/genre/{type}/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl GenreList {
    pub fn into_map(self) -> GenreMap {
        self.genres.into_iter().map(|g| (g.id, g.name)).collect()
    }
}
