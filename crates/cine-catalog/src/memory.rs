use crate::error::CatalogError;
use crate::transport::CatalogTransport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A request seen by [`MemoryTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory transport serving canned JSON per path (and optionally per page),
/// recording every request. Unknown paths answer HTTP 404.
#[derive(Default)]
pub struct MemoryTransport {
    responses: Mutex<HashMap<(String, Option<String>), Value>>,
    failures: Mutex<HashMap<String, u16>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path` regardless of the requested page
    pub fn respond(self, path: &str, body: Value) -> Self {
        lock(&self.responses).insert((path.to_string(), None), body);
        self
    }

    /// Serve `body` for `path` only when `page=<page>` is requested
    pub fn respond_page(self, path: &str, page: u32, body: Value) -> Self {
        lock(&self.responses).insert((path.to_string(), Some(page.to_string())), body);
        self
    }

    /// Answer `path` with a non-2xx status
    pub fn fail(self, path: &str, status: u16) -> Self {
        lock(&self.failures).insert(path.to_string(), status);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // Poisoned by a panicking test thread; the data is still usable
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CatalogTransport for MemoryTransport {
    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, CatalogError> {
        lock(&self.requests).push(RecordedRequest {
            path: path.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        if let Some(status) = lock(&self.failures).get(path) {
            return Err(CatalogError::Status {
                path: path.to_string(),
                status: *status,
                body: String::new(),
            });
        }

        let page = params
            .iter()
            .find(|(k, _)| *k == "page")
            .map(|(_, v)| v.clone());
        let responses = lock(&self.responses);
        responses
            .get(&(path.to_string(), page))
            .or_else(|| responses.get(&(path.to_string(), None)))
            .cloned()
            .ok_or_else(|| CatalogError::Status {
                path: path.to_string(),
                status: 404,
                body: "not found".to_string(),
            })
    }
}
