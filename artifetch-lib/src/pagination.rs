use crate::api_client::ApiClient;
use crate::error::Result;
use crate::logging::spinner_style;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// A JSON list response that wraps its records in an envelope object.
pub trait Listing: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub next: Option<String>,
}

/// Walks a paginated endpoint one request at a time. Nothing is fetched until
/// [PageFetcher::next_page] is called, so a consumer that stops early never
/// pays for the pages it did not look at.
pub struct PageFetcher<'a, C, L> {
    client: &'a C,
    next_url: Option<String>,
    pages_fetched: u64,
    _listing: PhantomData<L>,
}

impl<'a, C: ApiClient, L: Listing> PageFetcher<'a, C, L> {
    pub fn new(client: &'a C, url: String) -> Self {
        Self {
            client,
            next_url: Some(url),
            pages_fetched: 0,
            _listing: PhantomData,
        }
    }

    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    pub async fn next_page(&mut self) -> Result<Option<Page<L::Item>>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        tracing::trace!("GET {}", url);
        let raw = self.client.get_page(&url).await?;
        let listing: L = serde_json::from_str(&raw.body)?;

        self.pages_fetched += 1;
        self.next_url = raw.next.clone();

        Ok(Some(Page {
            records: listing.into_items(),
            next: raw.next,
        }))
    }
}

/// Returns the first record across all pages accepted by `predicate`.
#[instrument(level = "debug", skip_all)]
pub async fn find_first<C, L, F>(
    mut pages: PageFetcher<'_, C, L>,
    description: &str,
    mut predicate: F,
) -> Result<Option<L::Item>>
where
    C: ApiClient,
    L: Listing,
    F: FnMut(&L::Item) -> bool,
{
    let current_span = tracing::Span::current();
    if let Ok(style) = spinner_style("{msg} [Fetched pages: {pos}]") {
        current_span.pb_set_style(&style);
    }
    current_span.pb_set_message(&format!("Searching {description}..."));
    current_span.pb_set_finish_message(&format!("Searching {description}... Done"));

    while let Some(page) = pages.next_page().await? {
        current_span.pb_set_position(pages.pages_fetched());

        if let Some(found) = page.records.into_iter().find(|record| predicate(record)) {
            return Ok(Some(found));
        }
    }

    Ok(None)
}
