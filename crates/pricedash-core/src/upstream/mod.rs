//! Upstream listings API client.
//!
//! Two endpoints are consumed, both authenticated with an `X-API-Key` header:
//! - `GET /v1/listing/{id}`: one listing, may answer 404 when the key does not own it.
//! - `GET /v1/listings`: the account's whole collection (`{"listings": [...]}`).
//!
//! [`ListingsApi`] is the seam used by resolution, aggregation and routing;
//! [`CurlListingsClient`] is the libcurl-backed implementation.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod listing;

pub use client::CurlListingsClient;
pub use error::UpstreamError;
pub use listing::{Listing, ListingsPage};

use crate::account::ApiKey;
use crate::error::ApiError;

/// Outcome of a direct single-listing fetch. A 404 is an ordinary answer, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(Listing),
    NotFound,
}

/// Optional query flags for the collection endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkFilters {
    /// Adds `skip_hidden=true`.
    pub skip_hidden: bool,
    /// Adds `only_syncing=true`.
    pub only_syncing: bool,
}

/// Authenticated access to the upstream listings API.
///
/// Calls block until the response (or the client's timeout) arrives.
pub trait ListingsApi {
    /// Fetch one listing by id under `key`.
    fn fetch_one(&self, listing_id: &str, key: &ApiKey) -> Result<FetchOutcome, UpstreamError>;

    /// Fetch every listing visible to `key`.
    fn fetch_bulk(&self, key: &ApiKey, filters: BulkFilters) -> Result<ListingsPage, UpstreamError>;
}

impl<T: ListingsApi + ?Sized> ListingsApi for std::sync::Arc<T> {
    fn fetch_one(&self, listing_id: &str, key: &ApiKey) -> Result<FetchOutcome, UpstreamError> {
        (**self).fetch_one(listing_id, key)
    }

    fn fetch_bulk(&self, key: &ApiKey, filters: BulkFilters) -> Result<ListingsPage, UpstreamError> {
        (**self).fetch_bulk(key, filters)
    }
}

/// Fetch one listing, falling back to a scan of the bulk collection when the
/// direct endpoint answers 404.
///
/// Fails with [`ApiError::NotFound`] only when both paths come up empty.
pub fn fetch_listing_strict<A: ListingsApi + ?Sized>(
    api: &A,
    listing_id: &str,
    key: &ApiKey,
) -> Result<Listing, ApiError> {
    match api.fetch_one(listing_id, key)? {
        FetchOutcome::Found(listing) => Ok(listing),
        FetchOutcome::NotFound => {
            tracing::debug!(
                listing_id,
                "direct endpoint returned 404, trying bulk endpoint"
            );
            let page = api.fetch_bulk(key, BulkFilters::default())?;
            page.into_listing(listing_id)
                .ok_or_else(|| ApiError::NotFound {
                    listing_id: listing_id.to_string(),
                })
        }
    }
}
