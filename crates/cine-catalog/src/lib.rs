pub mod cache;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod transport;

pub use cache::{CachedCatalog, TtlCache, DEFAULT_TTL};
pub use client::{CatalogClient, CatalogSettings, SortOrder, MAX_DISCOVER_PAGE};
pub use error::CatalogError;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryTransport, RecordedRequest};
pub use transport::{CatalogTransport, HttpTransport};
