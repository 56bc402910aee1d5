//! libcurl-backed [`ListingsApi`].

use std::time::Duration;
use url::Url;

use super::{BulkFilters, FetchOutcome, Listing, ListingsApi, ListingsPage, UpstreamError};
use crate::account::ApiKey;
use crate::config::PricedashConfig;

/// Blocking client for the upstream listings API.
///
/// One curl `Easy` handle per request; no connection reuse, no retries and no
/// redirects (a 3xx is reported as a status error).
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlListingsClient {
    base_url: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlListingsClient {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::BaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(300),
        })
    }

    pub fn from_config(cfg: &PricedashConfig) -> Result<Self, UpstreamError> {
        Ok(Self::new(&cfg.base_url)?.with_timeouts(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.request_timeout_secs),
        ))
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn listing_url(&self, listing_id: &str) -> Url {
        self.endpoint(&["v1", "listing", listing_id])
    }

    pub(crate) fn listings_url(&self, filters: BulkFilters) -> Url {
        let mut url = self.endpoint(&["v1", "listings"]);
        if filters.skip_hidden || filters.only_syncing {
            let mut query = url.query_pairs_mut();
            if filters.skip_hidden {
                query.append_pair("skip_hidden", "true");
            }
            if filters.only_syncing {
                query.append_pair("only_syncing", "true");
            }
        }
        url
    }

    /// Perform an authenticated GET and return `(status, body)`.
    fn get(&self, url: &Url, key: &ApiKey) -> Result<(u32, Vec<u8>), UpstreamError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        // The API key is a custom header; libcurl would resend it to any redirect target.
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("X-API-Key: {}", key.expose()))?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

impl ListingsApi for CurlListingsClient {
    fn fetch_one(&self, listing_id: &str, key: &ApiKey) -> Result<FetchOutcome, UpstreamError> {
        let url = self.listing_url(listing_id);
        let (status, body) = self.get(&url, key)?;
        tracing::debug!(listing_id, status, "GET {}", url.path());
        match status {
            200..=299 => {
                let listing: Listing = serde_json::from_slice(&body)?;
                Ok(FetchOutcome::Found(listing))
            }
            404 => Ok(FetchOutcome::NotFound),
            _ => Err(UpstreamError::from_status(status, &body)),
        }
    }

    fn fetch_bulk(&self, key: &ApiKey, filters: BulkFilters) -> Result<ListingsPage, UpstreamError> {
        let url = self.listings_url(filters);
        let (status, body) = self.get(&url, key)?;
        tracing::debug!(status, bytes = body.len(), "GET {}", url.path());
        if !(200..300).contains(&status) {
            return Err(UpstreamError::from_status(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
