use thiserror::Error;

/// Why a catalog request produced nothing. Never surfaces past the client:
/// every public operation logs it and returns an empty result instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{path} returned HTTP {status}: {body}")]
    Status { path: String, status: u16, body: String },

    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
