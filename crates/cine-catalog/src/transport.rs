use crate::error::CatalogError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fetches one JSON document from the catalog API.
///
/// `path` is relative to the API root (`search/multi`, `tv/1399/similar`);
/// `params` are appended as query parameters. Authentication is the
/// transport's concern.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, CatalogError>;
}

/// HTTPS transport backed by reqwest, authenticating with the `api_key` query parameter
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(concat!("cinenos/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, CatalogError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                path: path.to_string(),
                status,
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let transport = HttpTransport::new("https://api.themoviedb.org/3/", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.url("search/multi"), "https://api.themoviedb.org/3/search/multi");
        assert_eq!(transport.url("/tv/1399"), "https://api.themoviedb.org/3/tv/1399");
    }
}
