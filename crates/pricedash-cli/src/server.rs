//! HTTP endpoint: `GET /` and `GET /exec` take `?action=...&...` and always
//! answer 200 with a JSON body (result or error envelope).

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pricedash_core::router::{ErrorEnvelope, Params, RequestRouter};
use pricedash_core::upstream::CurlListingsClient;
use serde_json::json;
use std::sync::Arc;

pub type SharedRouter = Arc<RequestRouter<CurlListingsClient>>;

pub fn app(router: SharedRouter) -> Router {
    Router::new()
        .route("/", get(exec))
        .route("/exec", get(exec))
        .route("/healthz", get(healthz))
        .with_state(router)
}

async fn exec(State(router): State<SharedRouter>, Query(mut params): Query<Params>) -> Response {
    let action = params.remove("action");
    let handled =
        tokio::task::spawn_blocking(move || router.handle(action.as_deref(), &params)).await;
    match handled {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            tracing::error!("request task failed: {}", err);
            Json(ErrorEnvelope::now(format!("internal error: {err}"))).into_response()
        }
    }
}

async fn healthz(State(router): State<SharedRouter>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "accounts": router.resolver().accounts().len(),
    }))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, router: SharedRouter) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("listening on {}", addr);
    println!("pricedash listening on http://{addr}");
    axum::serve(listener, app(router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
}
