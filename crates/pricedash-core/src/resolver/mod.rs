//! Account resolution: which configured account owns a listing id.
//!
//! Lookup order for an uncached id, per account in configuration order:
//! 1. direct fetch (`GET /v1/listing/{id}`), cheapest when the endpoint works;
//! 2. scan of the account's bulk collection, for deployments where the direct
//!    endpoint 404s on listings the key does own.
//!
//! An account whose calls fail is logged and skipped so one broken key does
//! not hide listings owned by the others.
//!
//! Concurrent lookups of one uncached id probe once; lookups of different ids
//! probe independently.

mod cache;
mod in_flight;

pub use cache::CredentialCache;

use std::sync::PoisonError;

use in_flight::InFlight;

use crate::account::Account;
use crate::error::ApiError;
use crate::upstream::{BulkFilters, FetchOutcome, ListingsApi, UpstreamError};

/// Which probe step found the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeHit {
    Direct,
    Bulk,
}

/// Result of [`AccountResolver::warm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmSummary {
    /// New cache entries written.
    pub cached: usize,
    /// Accounts whose collection could not be fetched.
    pub failed_accounts: Vec<String>,
}

/// Resolves listing ids to accounts, caching every successful resolution.
pub struct AccountResolver<A> {
    api: A,
    accounts: Vec<Account>,
    cache: CredentialCache,
    in_flight: InFlight,
}

impl<A: ListingsApi> AccountResolver<A> {
    /// `accounts` order is the probe order.
    pub fn new(api: A, accounts: Vec<Account>) -> Self {
        Self {
            api,
            accounts,
            cache: CredentialCache::new(),
            in_flight: InFlight::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn cache(&self) -> &CredentialCache {
        &self.cache
    }

    fn cached(&self, listing_id: &str) -> Option<&Account> {
        let name = self.cache.get(listing_id)?;
        self.account(&name)
    }

    /// Find the account that owns `listing_id`.
    ///
    /// A cached id returns without any upstream call. Otherwise every account
    /// is probed in order until one owns the id; failing that, the result is
    /// [`ApiError::Resolution`].
    pub fn resolve(&self, listing_id: &str) -> Result<&Account, ApiError> {
        if let Some(account) = self.cached(listing_id) {
            tracing::debug!(listing_id, account = %account.name, "resolver cache hit");
            return Ok(account);
        }

        let slot = self.in_flight.acquire(listing_id);
        let resolved = {
            let _probe = slot.lock().unwrap_or_else(PoisonError::into_inner);
            // Another request may have resolved the id while we waited.
            match self.cached(listing_id) {
                Some(account) => Ok(account),
                None => self.probe_accounts(listing_id),
            }
        };
        self.in_flight.release(listing_id, slot);
        resolved
    }

    fn probe_accounts(&self, listing_id: &str) -> Result<&Account, ApiError> {
        tracing::debug!(listing_id, "looking up owning account");
        for account in &self.accounts {
            match self.probe(listing_id, account) {
                Ok(Some(hit)) => {
                    tracing::info!(listing_id, account = %account.name, via = ?hit, "resolved listing");
                    self.cache.insert_if_absent(listing_id, &account.name);
                    return Ok(account);
                }
                Ok(None) => {
                    tracing::debug!(listing_id, account = %account.name, "listing not in account");
                }
                Err(err) => {
                    tracing::warn!(listing_id, account = %account.name, "error checking account: {}", err);
                }
            }
        }

        Err(ApiError::Resolution {
            listing_id: listing_id.to_string(),
        })
    }

    fn probe(&self, listing_id: &str, account: &Account) -> Result<Option<ProbeHit>, UpstreamError> {
        if let FetchOutcome::Found(_) = self.api.fetch_one(listing_id, &account.api_key)? {
            return Ok(Some(ProbeHit::Direct));
        }
        let page = self.api.fetch_bulk(&account.api_key, BulkFilters::default())?;
        Ok(page.find(listing_id).map(|_| ProbeHit::Bulk))
    }

    /// Pre-populate the cache from every account's bulk collection.
    ///
    /// Existing entries are kept; an id listed by several accounts maps to
    /// the first one in configuration order. Runs alongside `resolve`: both
    /// only ever add absent entries.
    pub fn warm(&self) -> WarmSummary {
        let mut summary = WarmSummary::default();
        for account in &self.accounts {
            match self.api.fetch_bulk(&account.api_key, BulkFilters::default()) {
                Ok(page) => {
                    let before = summary.cached;
                    for id in page.listings.iter().filter_map(|l| l.id()) {
                        if self.cache.insert_if_absent(&id, &account.name) {
                            summary.cached += 1;
                        }
                    }
                    tracing::debug!(account = %account.name, cached = summary.cached - before, "warmed resolver cache");
                }
                Err(err) => {
                    tracing::warn!(account = %account.name, "cache warm-up failed: {}", err);
                    summary.failed_accounts.push(account.name.clone());
                }
            }
        }
        summary
    }
}
