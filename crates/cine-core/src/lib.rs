pub mod picker;
pub mod similar;
pub mod store;
pub mod watched;

pub use picker::{available_genres, pick, PickError, PickMode, PickedMedia, DEFAULT_GENRE_NAMES};
pub use similar::{find_candidates, similar_to, Candidate, MAX_CANDIDATES};
pub use store::{load_json, save_json, JsonStore, APP_STATE_FILE, FAVORITE_GENRES_FILE, WATCHED_FILE};
pub use watched::{entry_from_details, MarkOutcome, WatchedHistory};
