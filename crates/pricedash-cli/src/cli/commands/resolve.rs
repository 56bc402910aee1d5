//! `pricedash resolve <listing-id>` – which account owns a listing.

use anyhow::{Context, Result};
use pricedash_core::config::PricedashConfig;

use crate::cli::build_resolver;

pub async fn run_resolve(cfg: &PricedashConfig, listing_id: &str) -> Result<()> {
    let resolver = build_resolver(cfg)?;
    let id = listing_id.to_string();
    let (name, portfolio) = tokio::task::spawn_blocking(move || {
        resolver
            .resolve(&id)
            .map(|a| (a.name.clone(), a.portfolio.clone()))
    })
    .await
    .context("resolve task join")??;
    println!("{listing_id}\t{name}\t{portfolio}");
    Ok(())
}
