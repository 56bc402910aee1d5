//! `pricedash portfolios` – per-account fetched/active counts.

use anyhow::{Context, Result};
use pricedash_core::aggregate::{self, AccountSummary};
use pricedash_core::config::PricedashConfig;

use crate::cli::build_client;

fn print_summaries(summaries: &[AccountSummary]) {
    println!(
        "{:<12} {:<24} {:>8} {:>8}  {}",
        "ACCOUNT", "PORTFOLIO", "FETCHED", "ACTIVE", "ERROR"
    );
    for s in summaries {
        println!(
            "{:<12} {:<24} {:>8} {:>8}  {}",
            s.account,
            s.portfolio,
            s.fetched,
            s.active,
            s.error.as_deref().unwrap_or("-")
        );
    }
}

pub async fn run_portfolios(cfg: &PricedashConfig) -> Result<()> {
    let client = build_client(cfg)?;
    let accounts = cfg.accounts.clone();
    let aggregation = tokio::task::spawn_blocking(move || {
        aggregate::fetch_all_across_accounts(&client, &accounts, false)
    })
    .await
    .context("portfolios task join")?;
    print_summaries(&aggregation.accounts);
    println!("Total active listings: {}", aggregation.listings.len());
    Ok(())
}
