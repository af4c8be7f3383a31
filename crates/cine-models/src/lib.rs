pub mod details;
pub mod genre;
pub mod media;
pub mod paged;
pub mod watched;

pub use details::{MediaDetails, Provider, RegionProviders, WatchProviders};
pub use genre::{Genre, GenreList, GenreMap};
pub use media::{MediaItem, MediaType, ParseMediaTypeError};
pub use paged::Paged;
pub use watched::WatchedEntry;
