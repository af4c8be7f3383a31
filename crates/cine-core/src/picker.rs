use cine_catalog::{CachedCatalog, CatalogTransport, SortOrder};
use cine_models::{GenreMap, MediaItem, MediaType};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Movie genres offered for the by-genre pick, by their pt-BR names
pub const DEFAULT_GENRE_NAMES: [&str; 9] = [
    "Ação",
    "Comédia",
    "Romance",
    "Aventura",
    "Drama",
    "Ficção Científica",
    "Thriller",
    "Mistério",
    "Crime",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickMode {
    /// Random discover hit among titles matching the named (movie) genres
    ByGenre(Vec<String>),
    /// Random entry of the popular-on-streaming list
    Popular,
    /// Random entry of the top-rated-on-streaming list
    TopRated,
}

impl PickMode {
    pub fn default_genres() -> Self {
        PickMode::ByGenre(DEFAULT_GENRE_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    #[error("Select at least one genre")]
    NoGenresSelected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickedMedia {
    pub media_type: MediaType,
    pub item: MediaItem,
}

/// Name → id for the genres in `genres` whose name is one of `wanted`
/// (case-insensitive). Keys keep the catalog's spelling.
pub fn available_genres<S: AsRef<str>>(genres: &GenreMap, wanted: &[S]) -> BTreeMap<String, u32> {
    let wanted: Vec<String> = wanted.iter().map(|w| w.as_ref().trim().to_lowercase()).collect();
    genres
        .iter()
        .filter(|(_, name)| wanted.contains(&name.to_lowercase()))
        .map(|(id, name)| (name.clone(), *id))
        .collect()
}

/// Draw one title according to `mode`.
///
/// Genre names are resolved against the movie genre list; for shows the
/// same names are looked up in the tv genre list, and names the tv side
/// doesn't have are dropped.
pub async fn pick<T, R>(
    catalog: &mut CachedCatalog<T>,
    media_type: MediaType,
    mode: &PickMode,
    rng: &mut R,
) -> Result<Option<PickedMedia>, PickError>
where
    T: CatalogTransport,
    R: Rng,
{
    let item = match mode {
        PickMode::ByGenre(names) => {
            if names.is_empty() {
                return Err(PickError::NoGenresSelected);
            }

            let movie_genres = catalog.genres(MediaType::Movie).await;
            let selected = available_genres(&movie_genres, names.as_slice());
            let mut genre_ids: Vec<u32> = match media_type {
                MediaType::Movie => selected.values().copied().collect(),
                MediaType::Tv => {
                    let tv_genres = catalog.genres(MediaType::Tv).await;
                    let names: Vec<&str> = selected.keys().map(String::as_str).collect();
                    available_genres(&tv_genres, names.as_slice()).values().copied().collect()
                }
            };
            genre_ids.sort_unstable();
            genre_ids.dedup();
            debug!("Picking {} among genres {:?}", media_type, genre_ids);
            catalog.discover(media_type, &genre_ids, rng).await
        }
        PickMode::Popular => {
            let list = catalog.list_on_streaming(media_type, SortOrder::Popularity).await;
            list.choose(rng).cloned()
        }
        PickMode::TopRated => {
            let list = catalog.list_on_streaming(media_type, SortOrder::VoteAverage).await;
            list.choose(rng).cloned()
        }
    };

    Ok(item.map(|item| PickedMedia { media_type, item }))
}
