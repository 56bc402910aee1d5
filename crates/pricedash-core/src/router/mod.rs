//! Request router: action name + query parameters -> JSON body.
//!
//! Every outcome is a JSON value. Failures become the error envelope
//! `{"error": true, "message": ..., "timestamp": ...}` rather than a
//! transport-level error; callers must inspect the `error` field.

mod action;

pub use action::Action;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::account::ApiKey;
use crate::aggregate;
use crate::error::ApiError;
use crate::resolver::AccountResolver;
use crate::upstream::{fetch_listing_strict, BulkFilters, Listing, ListingsApi};
use crate::views;

/// Query parameters of one inbound request.
pub type Params = HashMap<String, String>;

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: bool,
    pub message: String,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            error: true,
            message: message.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn now(message: impl Into<String>) -> Self {
        Self::new(message, Utc::now())
    }
}

/// Router settings taken from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Account whose key serves `fetchAllListings` when no `apiKey` is given.
    pub default_account: String,
    /// Emit `apiKey` on aggregated listings.
    pub label_with_api_key: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            default_account: "default".to_string(),
            label_with_api_key: true,
        }
    }
}

/// Maps actions onto resolution, aggregation and view formatting.
pub struct RequestRouter<A> {
    resolver: AccountResolver<A>,
    options: RouterOptions,
}

impl<A: ListingsApi> RequestRouter<A> {
    pub fn new(resolver: AccountResolver<A>, options: RouterOptions) -> Self {
        Self { resolver, options }
    }

    pub fn resolver(&self) -> &AccountResolver<A> {
        &self.resolver
    }

    /// Run `action` and always produce a JSON body: the result, or the error envelope.
    pub fn handle(&self, action: Option<&str>, params: &Params) -> Value {
        match self.dispatch(action, params) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(
                    action = action.unwrap_or(""),
                    kind = err.kind(),
                    "request failed: {}",
                    err
                );
                let envelope = ErrorEnvelope::now(err.to_string());
                serde_json::to_value(envelope).unwrap_or_else(|_| {
                    serde_json::json!({"error": true, "message": err.to_string()})
                })
            }
        }
    }

    /// Run `action`, returning typed failures instead of the envelope.
    pub fn dispatch(&self, action: Option<&str>, params: &Params) -> Result<Value, ApiError> {
        let action: Action = action.unwrap_or_default().parse()?;
        tracing::debug!(action = action.as_str(), "dispatching");

        match action {
            Action::FetchListing => {
                let listing_id = required(params, "listingId")?;
                let account = self.resolver.resolve(listing_id)?;
                let listing =
                    fetch_listing_strict(self.resolver.api(), listing_id, &account.api_key)?;
                encode(&listing)
            }
            Action::FetchAllListings => {
                let key = match optional(params, "apiKey") {
                    Some(key) => ApiKey::new(key),
                    None => self.default_key(),
                };
                let filters = BulkFilters {
                    skip_hidden: flag(params, "skipHidden"),
                    only_syncing: flag(params, "onlySyncing"),
                };
                let page = self.resolver.api().fetch_bulk(&key, filters)?;
                encode(&page)
            }
            Action::FetchAllListingsFromAllAccounts => {
                let aggregation = aggregate::fetch_all_across_accounts(
                    self.resolver.api(),
                    self.resolver.accounts(),
                    self.options.label_with_api_key,
                );
                encode(&aggregation.into_response())
            }
            Action::FetchPrices => {
                let listing = self.owned_listing(required(params, "listingId")?)?;
                encode(&views::pricing_view(&listing, Utc::now().date_naive()))
            }
            Action::FetchReservations => {
                let listing = self.owned_listing(required(params, "listingId")?)?;
                encode(&views::reservation_view(&listing, optional(params, "pms")))
            }
            Action::FetchNeighborhood => {
                let listing = self.owned_listing(required(params, "listingId")?)?;
                encode(&views::neighborhood_view(&listing))
            }
        }
    }

    /// Resolve the owner, then pick the listing out of the owner's collection.
    fn owned_listing(&self, listing_id: &str) -> Result<Listing, ApiError> {
        let account = self.resolver.resolve(listing_id)?;
        let page = self
            .resolver
            .api()
            .fetch_bulk(&account.api_key, BulkFilters::default())?;
        page.into_listing(listing_id)
            .ok_or_else(|| ApiError::NotFound {
                listing_id: listing_id.to_string(),
            })
    }

    fn default_key(&self) -> ApiKey {
        self.resolver
            .account(&self.options.default_account)
            .or_else(|| self.resolver.accounts().first())
            .map(|a| a.api_key.clone())
            .unwrap_or_default()
    }
}

fn optional<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn required<'a>(params: &'a Params, name: &'static str) -> Result<&'a str, ApiError> {
    optional(params, name).ok_or(ApiError::MissingParameter(name))
}

/// Query flags are on only for the literal string `true`.
fn flag(params: &Params, name: &str) -> bool {
    params.get(name).is_some_and(|v| v == "true")
}

fn encode<T: Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(ApiError::Encode)
}
