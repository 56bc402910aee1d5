//! Named upstream accounts and their API keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Secret API key for one upstream account.
///
/// `Debug` and `Display` never print the secret; use [`ApiKey::expose`] at the
/// single point where the key goes into a request header.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// First four characters followed by an ellipsis, or `<unset>`.
    pub fn masked(&self) -> String {
        if self.is_empty() {
            return "<unset>".to_string();
        }
        let prefix: String = self.0.chars().take(4).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// One configured upstream account (`[[accounts]]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Logical account name, e.g. `utah`. Used as the portfolio key.
    pub name: String,
    /// Display name shown on the dashboard, e.g. `Utah Portfolio`.
    pub portfolio: String,
    #[serde(default)]
    pub api_key: ApiKey,
}

impl Account {
    pub fn new(name: &str, portfolio: &str, api_key: &str) -> Self {
        Self {
            name: name.to_string(),
            portfolio: portfolio.to_string(),
            api_key: ApiKey::new(api_key),
        }
    }
}
