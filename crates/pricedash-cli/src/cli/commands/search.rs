//! `pricedash search <term>` – active listings matching a name or id.

use anyhow::{Context, Result};
use pricedash_core::aggregate;
use pricedash_core::config::PricedashConfig;
use serde_json::Value;

use crate::cli::build_client;

pub async fn run_search(cfg: &PricedashConfig, term: &str) -> Result<()> {
    let client = build_client(cfg)?;
    let accounts = cfg.accounts.clone();
    let aggregation = tokio::task::spawn_blocking(move || {
        aggregate::fetch_all_across_accounts(&client, &accounts, false)
    })
    .await
    .context("search task join")?;

    let hits = aggregate::search(&aggregation.listings, term);
    if hits.is_empty() {
        println!("No active listings match {term:?}.");
        return Ok(());
    }
    println!("{:<16} {:<24} {}", "ID", "PORTFOLIO", "NAME");
    for listing in hits {
        let text = |field: &str| {
            listing
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string()
        };
        println!(
            "{:<16} {:<24} {}",
            listing.id().unwrap_or_default(),
            text("portfolio"),
            text("name")
        );
    }
    Ok(())
}
