use crate::error::CatalogError;
use crate::transport::{CatalogTransport, HttpTransport};
use cine_config::{Config, TmdbConfig};
use cine_models::{GenreList, GenreMap, MediaDetails, MediaItem, MediaType, Paged};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// The catalog refuses to page past this point on discover queries
pub const MAX_DISCOVER_PAGE: u32 = 500;

/// Minimum vote count for "top rated" lists
const TOP_RATED_MIN_VOTES: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Popularity,
    VoteAverage,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Popularity => "popularity.desc",
            SortOrder::VoteAverage => "vote_average.desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Localization and availability filters applied to every query
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub language: String,
    pub region: String,
    pub provider_ids: Vec<u32>,
    pub excluded_genre_id: Option<u32>,
}

impl CatalogSettings {
    pub fn from_config(tmdb: &TmdbConfig) -> Self {
        Self {
            language: tmdb.language.clone(),
            region: tmdb.region.clone(),
            provider_ids: tmdb.provider_ids.clone(),
            excluded_genre_id: tmdb.excluded_genre_id,
        }
    }

    /// Providers in the `8|119|...` (any-of) form the discover endpoint expects
    pub fn provider_filter(&self) -> String {
        self.provider_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self::from_config(&TmdbConfig::default())
    }
}

type Params = Vec<(&'static str, String)>;

/// Client for the remote catalog.
///
/// Every operation swallows failures: transport errors, non-2xx answers and
/// bodies that don't decode are logged and turned into an empty result, so
/// callers only ever see "nothing found".
pub struct CatalogClient<T = HttpTransport> {
    transport: T,
    settings: CatalogSettings,
}

impl CatalogClient<HttpTransport> {
    pub fn from_config(config: &Config, api_key: String) -> Result<Self, CatalogError> {
        let transport = HttpTransport::new(
            config.tmdb.base_url.clone(),
            api_key,
            Duration::from_secs(config.tmdb.timeout_secs),
        )?;
        Ok(Self::new(transport, CatalogSettings::from_config(&config.tmdb)))
    }
}

impl<T: CatalogTransport> CatalogClient<T> {
    pub fn new(transport: T, settings: CatalogSettings) -> Self {
        Self { transport, settings }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Multi search over movies and shows; people and other kinds are dropped
    pub async fn search(&self, query: &str) -> Vec<MediaItem> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let params: Params = vec![("query", query.to_string()), ("page", "1".to_string())];
        match self.fetch::<Paged<MediaItem>>("search/multi", &params).await {
            Ok(page) => page
                .results
                .into_iter()
                .filter(|item| item.kind().is_some())
                .collect(),
            Err(e) => {
                warn!("Failed to search for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Pick one random title among those matching every genre in `genre_ids`.
    ///
    /// A first request learns how many pages exist; the page is then drawn
    /// uniformly from `1..=min(total_pages, 500)` and one result from it.
    /// An empty genre set returns `None` without touching the network.
    pub async fn discover<R: Rng>(&self, media_type: MediaType, genre_ids: &[u32], rng: &mut R) -> Option<MediaItem> {
        if genre_ids.is_empty() {
            debug!("No genres selected, skipping discover for {}", media_type);
            return None;
        }

        let path = format!("discover/{}", media_type);
        let mut params = self.streaming_params(SortOrder::Popularity);
        params.push((
            "with_genres",
            genre_ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(","),
        ));
        if media_type == MediaType::Movie {
            params.push(("include_video", "false".to_string()));
        }

        let first = match self.fetch::<Paged<MediaItem>>(&path, &with_page(&params, 1)).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to discover {}: {}", media_type, e);
                return None;
            }
        };

        let total_pages = first.total_pages.min(MAX_DISCOVER_PAGE);
        if total_pages == 0 {
            debug!("Discover {} returned no pages", media_type);
            return None;
        }

        let page_number = rng.random_range(1..=total_pages);
        let page = if page_number == 1 {
            first
        } else {
            match self.fetch::<Paged<MediaItem>>(&path, &with_page(&params, page_number)).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Failed to discover {} (page {}): {}", media_type, page_number, e);
                    return None;
                }
            }
        };

        debug!(
            "Discover {}: drew page {} of {} ({} results)",
            media_type,
            page_number,
            total_pages,
            page.results.len()
        );
        page.results
            .choose(rng)
            .cloned()
            .map(|item| tag(item, media_type))
    }

    /// First page of titles available on the configured providers in the configured region
    pub async fn list_on_streaming(&self, media_type: MediaType, sort: SortOrder) -> Vec<MediaItem> {
        let path = format!("discover/{}", media_type);
        let mut params = self.streaming_params(sort);
        if sort == SortOrder::VoteAverage {
            params.push(("vote_count.gte", TOP_RATED_MIN_VOTES.to_string()));
        }

        match self.fetch::<Paged<MediaItem>>(&path, &with_page(&params, 1)).await {
            Ok(page) => page
                .results
                .into_iter()
                .map(|item| tag(item, media_type))
                .collect(),
            Err(e) => {
                warn!("Failed to fetch {} list sorted by {}: {}", media_type, sort, e);
                Vec::new()
            }
        }
    }

    /// Detail card with watch provider availability for every region
    pub async fn details(&self, media_type: MediaType, id: u64) -> Option<MediaDetails> {
        let path = format!("{}/{}", media_type, id);
        let params: Params = vec![("append_to_response", "watch/providers".to_string())];

        match self.fetch::<MediaDetails>(&path, &params).await {
            Ok(mut details) => {
                details.item = tag(details.item, media_type);
                Some(details)
            }
            Err(e) => {
                warn!("Failed to fetch details for {} {}: {}", media_type, id, e);
                None
            }
        }
    }

    pub async fn similar(&self, media_type: MediaType, id: u64) -> Vec<MediaItem> {
        let path = format!("{}/{}/similar", media_type, id);
        let params: Params = vec![("page", "1".to_string())];

        match self.fetch::<Paged<MediaItem>>(&path, &params).await {
            Ok(page) => page
                .results
                .into_iter()
                .map(|item| tag(item, media_type))
                .collect(),
            Err(e) => {
                warn!("Failed to fetch titles similar to {} {}: {}", media_type, id, e);
                Vec::new()
            }
        }
    }

    /// Genre id → localized name
    pub async fn genres(&self, media_type: MediaType) -> GenreMap {
        let path = format!("genre/{}/list", media_type);

        match self.fetch::<GenreList>(&path, &[]).await {
            Ok(list) => list.into_map(),
            Err(e) => {
                warn!("Failed to fetch {} genres: {}", media_type, e);
                GenreMap::new()
            }
        }
    }

    fn streaming_params(&self, sort: SortOrder) -> Params {
        let mut params: Params = vec![
            ("sort_by", sort.as_param().to_string()),
            ("include_adult", "false".to_string()),
            ("watch_region", self.settings.region.clone()),
            ("with_watch_providers", self.settings.provider_filter()),
        ];
        if let Some(excluded) = self.settings.excluded_genre_id {
            params.push(("without_genres", excluded.to_string()));
        }
        params
    }

    async fn fetch<D: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<D, CatalogError> {
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push(("language", self.settings.language.clone()));
        all.extend_from_slice(params);

        let value = self.transport.get_json(path, &all).await?;
        serde_json::from_value(value).map_err(|source| CatalogError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

fn with_page(params: &Params, page: u32) -> Params {
    let mut paged = params.clone();
    paged.push(("page", page.to_string()));
    paged
}

/// List endpoints other than multi search omit `media_type`; fill it in from the request
fn tag(mut item: MediaItem, media_type: MediaType) -> MediaItem {
    if item.media_type.is_none() {
        item.media_type = Some(media_type.as_str().to_string());
    }
    item
}
