//! Listing id -> owning account cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Process-local map from listing id to the name of the account that owns it.
///
/// Entries are written once and never replaced or expired; a listing that
/// moves between accounts upstream keeps its first mapping until restart.
#[derive(Debug, Default)]
pub struct CredentialCache {
    entries: RwLock<HashMap<String, String>>,
}

impl CredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account name cached for `listing_id`, if any.
    pub fn get(&self, listing_id: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(listing_id)
            .cloned()
    }

    /// Record `listing_id -> account` unless the id is already mapped.
    /// Returns true when a new entry was written.
    pub fn insert_if_absent(&self, listing_id: &str, account: &str) -> bool {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(listing_id) {
            return false;
        }
        entries.insert(listing_id.to_string(), account.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries sorted by listing id.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        out.sort();
        out
    }
}
