//! `pricedash call <action> [KEY=VALUE...]` – run one action locally.

use anyhow::{Context, Result};
use pricedash_core::config::PricedashConfig;
use pricedash_core::router::Params;

use crate::cli::build_router;

/// Parse `KEY=VALUE` arguments. The value may itself contain `=`.
pub(crate) fn parse_params(raw: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for arg in raw {
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got {arg:?}"))?;
        if key.is_empty() {
            anyhow::bail!("empty parameter name in {arg:?}");
        }
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

pub async fn run_call(cfg: &PricedashConfig, action: &str, raw_params: &[String]) -> Result<()> {
    let params = parse_params(raw_params)?;
    let router = build_router(cfg)?;
    let action = action.to_string();
    let body = tokio::task::spawn_blocking(move || router.handle(Some(&action), &params))
        .await
        .context("call task join")?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
