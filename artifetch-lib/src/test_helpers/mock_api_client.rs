use crate::api_client::{ApiClient, RawPage};
use crate::download::copy_stream;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub const MOCK_API_URL: &str = "https://api.test";

/// Serves canned pages and payloads, and remembers every URL it was asked for.
#[derive(Default)]
pub struct MockApiClient {
    pages: HashMap<String, RawPage>,
    payloads: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
    downloaded: Mutex<Vec<String>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: Value, next: Option<&str>) -> Self {
        self.with_raw_page(url, &body.to_string(), next)
    }

    pub fn with_raw_page(mut self, url: &str, body: &str, next: Option<&str>) -> Self {
        self.pages.insert(
            url.to_string(),
            RawPage {
                body: body.to_string(),
                next: next.map(str::to_string),
            },
        );
        self
    }

    pub fn with_payload(mut self, url: &str, payload: &[u8]) -> Self {
        self.payloads.insert(url.to_string(), payload.to_vec());
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().expect("lock").clone()
    }

    pub fn downloaded_urls(&self) -> Vec<String> {
        self.downloaded.lock().expect("lock").clone()
    }
}

impl ApiClient for MockApiClient {
    fn api_url(&self) -> &str {
        MOCK_API_URL
    }

    async fn get_page(&self, url: &str) -> Result<RawPage> {
        self.requested.lock().expect("lock").push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Network(format!("request to {url} failed: 404 Not Found")))
    }

    async fn download(&self, url: &str, destination: &Path, _expected_size: u64) -> Result<u64> {
        self.downloaded.lock().expect("lock").push(url.to_string());
        let payload = self
            .payloads
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Network("download failed: 404 Not Found".to_string()))?;

        copy_stream(
            futures_util::stream::iter([Ok::<_, Error>(payload)]),
            destination,
            |_| {},
        )
        .await
    }
}
