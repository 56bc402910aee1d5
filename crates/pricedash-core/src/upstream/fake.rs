//! In-memory [`ListingsApi`] for unit tests. Records every call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use super::{BulkFilters, FetchOutcome, Listing, ListingsApi, ListingsPage, UpstreamError};
use crate::account::ApiKey;

/// Build a listing from a JSON object literal.
pub(crate) fn listing(value: Value) -> Listing {
    match value {
        Value::Object(map) => Listing::from_map(map),
        other => panic!("listing must be a JSON object, got {other}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    One { listing_id: String, key: String },
    Bulk { key: String, filters: BulkFilters },
}

impl Call {
    pub(crate) fn one(listing_id: &str, key: &str) -> Self {
        Call::One {
            listing_id: listing_id.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn bulk(key: &str, filters: BulkFilters) -> Self {
        Call::Bulk {
            key: key.to_string(),
            filters,
        }
    }
}

/// What one API key can see.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeAccount {
    direct: Vec<Listing>,
    bulk: Vec<Listing>,
    direct_status: Option<u32>,
    bulk_status: Option<u32>,
}

impl FakeAccount {
    /// Listings served by the direct endpoint (others answer 404).
    pub(crate) fn direct(mut self, listings: Vec<Listing>) -> Self {
        self.direct = listings;
        self
    }

    /// Listings served by the collection endpoint.
    pub(crate) fn bulk(mut self, listings: Vec<Listing>) -> Self {
        self.bulk = listings;
        self
    }

    /// Make every direct fetch fail with this status.
    pub(crate) fn direct_status(mut self, status: u32) -> Self {
        self.direct_status = Some(status);
        self
    }

    /// Make every collection fetch fail with this status.
    pub(crate) fn bulk_status(mut self, status: u32) -> Self {
        self.bulk_status = Some(status);
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    accounts: HashMap<String, FakeAccount>,
    calls: Mutex<Vec<Call>>,
    delay: Duration,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_account(mut self, key: &str, account: FakeAccount) -> Self {
        self.accounts.insert(key.to_string(), account);
        self
    }

    /// Sleep this long inside every call, after recording it.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn account(&self, key: &ApiKey) -> Result<&FakeAccount, UpstreamError> {
        self.accounts
            .get(key.expose())
            .ok_or_else(|| UpstreamError::from_status(401, b"{\"error\":\"invalid api key\"}"))
    }
}

impl ListingsApi for FakeApi {
    fn fetch_one(&self, listing_id: &str, key: &ApiKey) -> Result<FetchOutcome, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::one(listing_id, key.expose()));
        thread::sleep(self.delay);
        let account = self.account(key)?;
        if let Some(status) = account.direct_status {
            return Err(UpstreamError::from_status(status, b"direct failure"));
        }
        Ok(account
            .direct
            .iter()
            .find(|l| l.has_id(listing_id))
            .cloned()
            .map(FetchOutcome::Found)
            .unwrap_or(FetchOutcome::NotFound))
    }

    fn fetch_bulk(&self, key: &ApiKey, filters: BulkFilters) -> Result<ListingsPage, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::bulk(key.expose(), filters));
        thread::sleep(self.delay);
        let account = self.account(key)?;
        if let Some(status) = account.bulk_status {
            return Err(UpstreamError::from_status(status, b"bulk failure"));
        }
        Ok(ListingsPage::new(account.bulk.clone()))
    }
}
