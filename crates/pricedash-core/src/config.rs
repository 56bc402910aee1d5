use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::account::Account;

/// Global configuration loaded from `~/.config/pricedash/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedashConfig {
    /// Base URL of the upstream listings API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Address the HTTP endpoint binds to in `pricedash serve`.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Account used by the legacy `fetchAllListings` action when no `apiKey` is given.
    #[serde(default = "default_account_name")]
    pub default_account: String,
    /// Connect timeout for upstream requests, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total timeout for one upstream request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Attach the account's API key (`apiKey`) to aggregated listings for the frontend.
    #[serde(default = "default_true")]
    pub label_with_api_key: bool,
    /// Accounts in probe order. Resolution and aggregation follow this order.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

fn default_base_url() -> String {
    "https://api.pricelabs.co".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_account_name() -> String {
    "default".to_string()
}

fn default_connect_timeout() -> u64 {
    15
}

fn default_request_timeout() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for PricedashConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bind_addr: default_bind_addr(),
            default_account: default_account_name(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            label_with_api_key: true,
            accounts: vec![
                Account::new("utah", "Utah Portfolio", ""),
                Account::new("california", "California Portfolio", ""),
                Account::new("default", "Main Portfolio", ""),
                Account::new("special", "Special Account", ""),
            ],
        }
    }
}

impl PricedashConfig {
    /// Check that the configuration can drive resolution.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;

        if self.accounts.is_empty() {
            anyhow::bail!("no accounts configured; add at least one [[accounts]] entry");
        }

        let mut seen = HashSet::new();
        for account in &self.accounts {
            let name = account.name.trim();
            if name.is_empty() {
                anyhow::bail!("account with empty name in config");
            }
            if !seen.insert(name) {
                anyhow::bail!("duplicate account name: {}", name);
            }
            if account.api_key.is_empty() {
                anyhow::bail!("account {} has no api_key configured", name);
            }
        }

        if self.account(&self.default_account).is_none() {
            anyhow::bail!(
                "default_account {} does not name a configured account",
                self.default_account
            );
        }
        Ok(())
    }

    /// Look up a configured account by name.
    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pricedash")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PricedashConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PricedashConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from_path(path: &Path) -> Result<PricedashConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: PricedashConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
