use crate::client::{CatalogClient, SortOrder};
use crate::transport::CatalogTransport;
use cine_models::{GenreMap, MediaDetails, MediaItem, MediaType};
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Time-bounded memoization keyed by call arguments.
///
/// Expired entries are ignored by `get` and dropped on the next `insert`.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.purge_expired();
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`CatalogClient`] whose genre, list, details and similar lookups are
/// memoized for one TTL window. Search and discover always go to the network.
pub struct CachedCatalog<T> {
    client: CatalogClient<T>,
    genres: TtlCache<MediaType, GenreMap>,
    lists: TtlCache<(MediaType, SortOrder), Vec<MediaItem>>,
    details: TtlCache<(MediaType, u64), Option<MediaDetails>>,
    similar: TtlCache<(MediaType, u64), Vec<MediaItem>>,
}

impl<T: CatalogTransport> CachedCatalog<T> {
    pub fn new(client: CatalogClient<T>, ttl: Duration) -> Self {
        Self {
            client,
            genres: TtlCache::new(ttl),
            lists: TtlCache::new(ttl),
            details: TtlCache::new(ttl),
            similar: TtlCache::new(ttl),
        }
    }

    pub fn client(&self) -> &CatalogClient<T> {
        &self.client
    }

    pub async fn search(&self, query: &str) -> Vec<MediaItem> {
        self.client.search(query).await
    }

    pub async fn discover<R: Rng>(&self, media_type: MediaType, genre_ids: &[u32], rng: &mut R) -> Option<MediaItem> {
        self.client.discover(media_type, genre_ids, rng).await
    }

    pub async fn genres(&mut self, media_type: MediaType) -> GenreMap {
        if let Some(hit) = self.genres.get(&media_type) {
            debug!("Cache hit: {} genres", media_type);
            return hit;
        }
        let fresh = self.client.genres(media_type).await;
        self.genres.insert(media_type, fresh.clone());
        fresh
    }

    pub async fn list_on_streaming(&mut self, media_type: MediaType, sort: SortOrder) -> Vec<MediaItem> {
        let key = (media_type, sort);
        if let Some(hit) = self.lists.get(&key) {
            debug!("Cache hit: {} list sorted by {}", media_type, sort);
            return hit;
        }
        let fresh = self.client.list_on_streaming(media_type, sort).await;
        self.lists.insert(key, fresh.clone());
        fresh
    }

    pub async fn details(&mut self, media_type: MediaType, id: u64) -> Option<MediaDetails> {
        let key = (media_type, id);
        if let Some(hit) = self.details.get(&key) {
            debug!("Cache hit: details for {} {}", media_type, id);
            return hit;
        }
        let fresh = self.client.details(media_type, id).await;
        self.details.insert(key, fresh.clone());
        fresh
    }

    pub async fn similar(&mut self, media_type: MediaType, id: u64) -> Vec<MediaItem> {
        let key = (media_type, id);
        if let Some(hit) = self.similar.get(&key) {
            debug!("Cache hit: similar to {} {}", media_type, id);
            return hit;
        }
        let fresh = self.client.similar(media_type, id).await;
        self.similar.insert(key, fresh.clone());
        fresh
    }
}
