use crate::error::Result;
use std::path::Path;

/// One undecoded page of a GitHub list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub body: String,
    /// URL of the following page, taken from the `link` header
    pub next: Option<String>,
}

pub trait ApiClient {
    /// Base URL list endpoints are built from, without a trailing slash.
    fn api_url(&self) -> &str;

    fn get_page(&self, url: &str) -> impl Future<Output = Result<RawPage>> + Send;

    /// Streams `url` into `destination` and returns the number of bytes written.
    fn download(
        &self,
        url: &str,
        destination: &Path,
        expected_size: u64,
    ) -> impl Future<Output = Result<u64>> + Send;
}
