use crate::genre::Genre;
use crate::media::{image_url, MediaItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub provider_id: u32,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_priority: Option<u32>,
}

impl Provider {
    pub fn logo_url(&self) -> Option<String> {
        self.logo_path.as_deref().map(|p| image_url("w45", p))
    }
}

/// Availability of a title in one region, split by offer kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
}

/// The `watch/providers` block appended to a details response, keyed by region code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

/// Full detail card for a single title (`/{type}/{id}?append_to_response=watch/providers`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaDetails {
    #[serde(flatten)]
    pub item: MediaItem,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,
    #[serde(rename = "watch/providers", default)]
    pub watch_providers: WatchProviders,
}

impl MediaDetails {
    /// Subscription (flatrate) providers for a region; empty when the title
    /// is not streamed there
    pub fn streaming_providers(&self, region: &str) -> &[Provider] {
        self.watch_providers
            .results
            .get(region)
            .map(|r| r.flatrate.as_slice())
            .unwrap_or(&[])
    }
}
