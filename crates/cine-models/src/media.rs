use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL of the catalog's image CDN; a size segment and the image path are appended.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Build an image URL such as `https://image.tmdb.org/t/p/w200/abc.jpg`
pub fn image_url(size: &str, path: &str) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size, path)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the catalog API (`/discover/movie`, `/tv/{id}`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MediaType::Movie => "🍿",
            MediaType::Tv => "📺",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMediaTypeError(String);

impl fmt::Display for ParseMediaTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid media type: {}. Use 'movie' or 'tv'", self.0)
    }
}

impl std::error::Error for ParseMediaTypeError {}

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" | "filme" => Ok(MediaType::Movie),
            "tv" | "show" | "series" | "serie" => Ok(MediaType::Tv),
            _ => Err(ParseMediaTypeError(s.to_string())),
        }
    }
}

/// A title as returned by the catalog's list endpoints (search, discover, similar).
///
/// Movies carry `title`/`release_date` while shows carry `name`/`first_air_date`,
/// so both are kept optional and read through [`MediaItem::display_title`] and
/// [`MediaItem::year`]. `media_type` is only present on multi-search results and
/// may name kinds other than movie/tv (e.g. "person"), hence the raw string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaItem {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<u32>,
}

impl MediaItem {
    /// Movie or show kind, when the record says so and it is one we handle
    pub fn kind(&self) -> Option<MediaType> {
        self.media_type.as_deref().and_then(|s| match s {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        })
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Release (or first air) date as sent by the catalog, `YYYY-MM-DD`
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|d| !d.is_empty()))
    }

    pub fn year(&self) -> Option<&str> {
        self.date().and_then(|d| d.get(..4))
    }

    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path.as_deref().map(|p| image_url(size, p))
    }
}
