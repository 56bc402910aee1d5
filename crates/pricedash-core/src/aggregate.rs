//! Cross-account aggregation of active listings.
//!
//! Every configured account's collection is fetched in configuration order,
//! filtered down to listings with `push_enabled: true`, and labeled with the
//! portfolio it came from. Listings without the flag are dropped even if they
//! are otherwise active upstream; the per-account summary reports fetched vs.
//! kept counts so that loss stays visible.

use serde::Serialize;
use serde_json::Value;

use crate::account::{Account, ApiKey};
use crate::upstream::{BulkFilters, Listing, ListingsApi};

/// Fields attached to each aggregated listing.
#[derive(Debug, Clone, Copy)]
pub struct AccountLabel<'a> {
    pub portfolio: &'a str,
    pub portfolio_key: &'a str,
    pub api_key: Option<&'a ApiKey>,
}

impl<'a> AccountLabel<'a> {
    pub fn for_account(account: &'a Account, include_api_key: bool) -> Self {
        Self {
            portfolio: account.portfolio.as_str(),
            portfolio_key: account.name.as_str(),
            api_key: include_api_key.then_some(&account.api_key),
        }
    }

    /// Attach the label, overwriting same-named upstream fields.
    pub fn apply(&self, mut listing: Listing) -> Listing {
        listing.insert("portfolio", Value::from(self.portfolio));
        listing.insert("portfolioKey", Value::from(self.portfolio_key));
        if let Some(key) = self.api_key {
            listing.insert("apiKey", Value::from(key.expose()));
        }
        listing
    }
}

/// Per-account outcome of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub account: String,
    pub portfolio: String,
    /// Listings returned by the collection endpoint.
    pub fetched: usize,
    /// Listings kept after the `push_enabled` filter.
    pub active: usize,
    /// Failure message when the account could not be fetched.
    pub error: Option<String>,
}

/// Merged active listings plus what happened per account.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub listings: Vec<Listing>,
    pub accounts: Vec<AccountSummary>,
}

/// Response body of `fetchAllListingsFromAllAccounts`.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedListings {
    pub listings: Vec<Listing>,
}

impl Aggregation {
    pub fn into_response(self) -> CombinedListings {
        CombinedListings {
            listings: self.listings,
        }
    }
}

/// True only when `push_enabled` is the JSON boolean `true`.
pub fn is_active(listing: &Listing) -> bool {
    matches!(listing.get("push_enabled"), Some(Value::Bool(true)))
}

/// Fetch, filter and label listings from every account. Never fails as a
/// whole: an account that errors contributes nothing and is logged.
pub fn fetch_all_across_accounts<A: ListingsApi + ?Sized>(
    api: &A,
    accounts: &[Account],
    include_api_key: bool,
) -> Aggregation {
    let mut out = Aggregation::default();
    for account in accounts {
        tracing::debug!(account = %account.name, "fetching listings");
        let label = AccountLabel::for_account(account, include_api_key);
        match api.fetch_bulk(&account.api_key, BulkFilters::default()) {
            Ok(page) => {
                let fetched = page.listings.len();
                let before = out.listings.len();
                out.listings.extend(
                    page.listings
                        .into_iter()
                        .filter(is_active)
                        .map(|l| label.apply(l)),
                );
                let active = out.listings.len() - before;
                tracing::info!(account = %account.name, fetched, active, "added listings");
                out.accounts.push(AccountSummary {
                    account: account.name.clone(),
                    portfolio: account.portfolio.clone(),
                    fetched,
                    active,
                    error: None,
                });
            }
            Err(err) => {
                tracing::error!(account = %account.name, "failed to fetch listings: {}", err);
                out.accounts.push(AccountSummary {
                    account: account.name.clone(),
                    portfolio: account.portfolio.clone(),
                    fetched: 0,
                    active: 0,
                    error: Some(err.to_string()),
                });
            }
        }
    }
    tracing::info!(total = out.listings.len(), "combined listings");
    out
}

/// Listings whose `name` or id contains `term`, case-insensitively.
pub fn search<'a>(listings: &'a [Listing], term: &str) -> Vec<&'a Listing> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    listings
        .iter()
        .filter(|l| {
            let name_hit = l
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            let id_hit = l.id().is_some_and(|id| id.to_lowercase().contains(&needle));
            name_hit || id_hit
        })
        .collect()
}
