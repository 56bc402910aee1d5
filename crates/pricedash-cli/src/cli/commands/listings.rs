//! `pricedash listings` – one account's raw collection.

use anyhow::{Context, Result};
use pricedash_core::config::PricedashConfig;
use pricedash_core::upstream::{BulkFilters, ListingsApi};

use crate::cli::build_client;

pub async fn run_listings(
    cfg: &PricedashConfig,
    account: Option<&str>,
    skip_hidden: bool,
    only_syncing: bool,
) -> Result<()> {
    let name = account.unwrap_or(&cfg.default_account);
    let account = cfg
        .account(name)
        .with_context(|| format!("unknown account: {name}"))?
        .clone();
    let client = build_client(cfg)?;
    let filters = BulkFilters {
        skip_hidden,
        only_syncing,
    };
    let page = tokio::task::spawn_blocking(move || client.fetch_bulk(&account.api_key, filters))
        .await
        .context("listings task join")?
        .with_context(|| format!("fetch listings for {name}"))?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
