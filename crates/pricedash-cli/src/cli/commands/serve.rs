//! `pricedash serve` – run the JSON endpoint until Ctrl-C.

use anyhow::{Context, Result};
use pricedash_core::config::PricedashConfig;
use std::sync::Arc;

use crate::cli::build_router;
use crate::server;

pub async fn run_serve(cfg: &PricedashConfig, bind: Option<&str>, warm: bool) -> Result<()> {
    let router = Arc::new(build_router(cfg)?);

    if warm {
        let summary = tokio::task::spawn_blocking({
            let router = Arc::clone(&router);
            move || router.resolver().warm()
        })
        .await
        .context("warm task join")?;
        tracing::info!(
            cached = summary.cached,
            failed = ?summary.failed_accounts,
            "resolver cache warmed"
        );
        println!(
            "Warmed cache: {} listings ({} accounts failed)",
            summary.cached,
            summary.failed_accounts.len()
        );
    }

    let addr = bind.unwrap_or(&cfg.bind_addr);
    server::serve(addr, router).await
}
