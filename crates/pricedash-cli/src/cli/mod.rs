//! CLI for the pricedash listings bridge.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use pricedash_core::config::{self, PricedashConfig};
use pricedash_core::resolver::AccountResolver;
use pricedash_core::router::{RequestRouter, RouterOptions};
use pricedash_core::upstream::CurlListingsClient;
use std::path::{Path, PathBuf};

use commands::{
    run_accounts, run_call, run_completions, run_listings, run_portfolios, run_resolve,
    run_search, run_serve,
};

/// Top-level CLI for pricedash.
#[derive(Debug, Parser)]
#[command(name = "pricedash")]
#[command(about = "pricedash: resolve and reshape listings across upstream accounts", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config dir.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve the JSON endpoint (GET / and /exec with ?action=...).
    Serve {
        /// Listen address; defaults to bind_addr from the config.
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
        /// Fill the listing-to-account cache from every account before serving.
        #[arg(long)]
        warm: bool,
    },

    /// Run one action and print the JSON body the endpoint would return.
    Call {
        /// Action name, e.g. fetchListing.
        action: String,
        /// Query parameters as KEY=VALUE.
        #[arg(value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Print the account that owns a listing.
    Resolve {
        /// Listing identifier.
        listing_id: String,
    },

    /// Print one account's raw listing collection.
    Listings {
        /// Account name; defaults to default_account from the config.
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        skip_hidden: bool,
        #[arg(long)]
        only_syncing: bool,
    },

    /// Fetch every account and show fetched/active counts per portfolio.
    Portfolios,

    /// Search active listings across all accounts by name or id.
    Search {
        /// Case-insensitive substring.
        term: String,
    },

    /// List configured accounts (keys masked).
    Accounts,

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need no config.
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!(
            base_url = %cfg.base_url,
            accounts = cfg.accounts.len(),
            "loaded config"
        );

        match cli.command {
            CliCommand::Serve { bind, warm } => run_serve(&cfg, bind.as_deref(), warm).await?,
            CliCommand::Call { action, params } => run_call(&cfg, &action, &params).await?,
            CliCommand::Resolve { listing_id } => run_resolve(&cfg, &listing_id).await?,
            CliCommand::Listings {
                account,
                skip_hidden,
                only_syncing,
            } => run_listings(&cfg, account.as_deref(), skip_hidden, only_syncing).await?,
            CliCommand::Portfolios => run_portfolios(&cfg).await?,
            CliCommand::Search { term } => run_search(&cfg, &term).await?,
            CliCommand::Accounts => run_accounts(&cfg),
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

/// Explicit `--config` path, or the XDG default (created on first run). Always validated.
fn load_config(path: Option<&Path>) -> Result<PricedashConfig> {
    let cfg = match path {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

pub(crate) fn build_client(cfg: &PricedashConfig) -> Result<CurlListingsClient> {
    CurlListingsClient::from_config(cfg)
        .with_context(|| format!("upstream client for {}", cfg.base_url))
}

pub(crate) fn build_resolver(cfg: &PricedashConfig) -> Result<AccountResolver<CurlListingsClient>> {
    Ok(AccountResolver::new(build_client(cfg)?, cfg.accounts.clone()))
}

/// Wire the curl client, resolver and router from configuration.
pub(crate) fn build_router(cfg: &PricedashConfig) -> Result<RequestRouter<CurlListingsClient>> {
    Ok(RequestRouter::new(
        build_resolver(cfg)?,
        RouterOptions {
            default_account: cfg.default_account.clone(),
            label_with_api_key: cfg.label_with_api_key,
        },
    ))
}

#[cfg(test)]
mod tests;
