use serde::{Deserialize, Serialize};

/// Envelope shared by the catalog's paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paged<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            page: 0,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}
