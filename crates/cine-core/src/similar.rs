use cine_catalog::{CachedCatalog, CatalogTransport};
use cine_models::{MediaItem, MediaType};

/// How many search hits are offered as a starting point
pub const MAX_CANDIDATES: usize = 5;

/// A search hit the user can pick to see related titles
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub media_type: MediaType,
    pub item: MediaItem,
}

impl Candidate {
    /// e.g. "🍿 Cidade de Deus (2002)"
    pub fn label(&self) -> String {
        let title = self.item.display_title();
        match self.item.year() {
            Some(year) => format!("{} {} ({})", self.media_type.icon(), title, year),
            None => format!("{} {}", self.media_type.icon(), title),
        }
    }
}

pub async fn find_candidates<T: CatalogTransport>(catalog: &CachedCatalog<T>, query: &str) -> Vec<Candidate> {
    catalog
        .search(query)
        .await
        .into_iter()
        .filter_map(|item| item.kind().map(|media_type| Candidate { media_type, item }))
        .take(MAX_CANDIDATES)
        .collect()
}

pub async fn similar_to<T: CatalogTransport>(catalog: &mut CachedCatalog<T>, candidate: &Candidate) -> Vec<MediaItem> {
    catalog.similar(candidate.media_type, candidate.item.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cine_catalog::{CatalogClient, CatalogSettings, MemoryTransport, DEFAULT_TTL};
    use serde_json::json;

    fn catalog() -> CachedCatalog<MemoryTransport> {
        let results: Vec<_> = (1..=8)
            .map(|id| json!({"id": id, "media_type": "movie", "title": format!("Filme {}", id), "release_date": "2010-05-01"}))
            .chain(std::iter::once(json!({"id": 99, "media_type": "person", "name": "Alguém"})))
            .collect();
        let transport = MemoryTransport::new()
            .respond("search/multi", json!({"results": results}))
            .respond("movie/1/similar", json!({"results": [{"id": 40, "title": "Parecido"}]}));
        CachedCatalog::new(CatalogClient::new(transport, CatalogSettings::default()), DEFAULT_TTL)
    }

    #[tokio::test]
    async fn test_candidates_are_capped() {
        let catalog = catalog();
        let candidates = find_candidates(&catalog, "filme").await;
        assert_eq!(candidates.len(), MAX_CANDIDATES);
        assert_eq!(candidates[0].label(), "🍿 Filme 1 (2010)");
    }

    #[tokio::test]
    async fn test_similar_to_candidate() {
        let mut catalog = catalog();
        let candidates = find_candidates(&catalog, "filme").await;

        let similar = similar_to(&mut catalog, &candidates[0]).await;
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].display_title(), "Parecido");

        assert!(similar_to(&mut catalog, &candidates[1]).await.is_empty());
    }

    #[test]
    fn test_label_without_year() {
        let candidate = Candidate {
            media_type: MediaType::Tv,
            item: MediaItem {
                id: 1,
                name: Some("Sem Data".to_string()),
                ..MediaItem::default()
            },
        };
        assert_eq!(candidate.label(), "📺 Sem Data");
    }
}
