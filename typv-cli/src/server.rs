//! HTTP front desk for the variable data cache (made by FontLab https://www.fontlab.com/)
//!
//! Every request is answered from one resolver that lives as long as the
//! server does, so a font read for one caller is already warm for the next.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task;
use typv_core::listing::ListOptions;
use typv_core::output::FontVariableReport;
use typv_core::{CacheKey, VariableDataError, VariableDataFetcher, VariableDataResolver};

use crate::{build_query_from_parts, resolve_reports};

/// Which fonts to look up and how to narrow them down.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct VariableDataRequest {
    /// Font files or directories to scan
    pub paths: Vec<PathBuf>,
    /// Regex patterns matched against family, full and PostScript names
    pub names: Vec<String>,
    /// Axis tags every returned font must define
    pub axes: Vec<String>,
    /// Only monospaced fonts
    pub monospace: bool,
    /// Follow symbolic links while scanning
    pub follow_symlinks: bool,
    /// Worker threads for listing fonts
    pub jobs: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VariableDataResponse {
    pub fonts: Vec<FontVariableReport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub entries: usize,
    pub keys: Vec<CacheKey>,
}

type SharedResolver<F> = Arc<VariableDataResolver<F>>;

/// Bind `bind` and serve until the process is stopped.
pub async fn serve<F>(bind: &str, fetcher: F) -> Result<()>
where
    F: VariableDataFetcher + 'static,
{
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;
    log::info!("serving variable font data on {bind}");

    axum::serve(listener, router(Arc::new(VariableDataResolver::new(fetcher))))
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router<F>(resolver: SharedResolver<F>) -> Router
where
    F: VariableDataFetcher + 'static,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/variable-data", post(variable_data_handler::<F>))
        .route("/cache", get(cache_stats_handler::<F>))
        .route("/cache/reset", post(cache_reset_handler::<F>))
        .with_state(resolver)
}

async fn variable_data_handler<F>(
    State(resolver): State<SharedResolver<F>>,
    Json(req): Json<VariableDataRequest>,
) -> Result<Json<VariableDataResponse>, (StatusCode, String)>
where
    F: VariableDataFetcher + 'static,
{
    if req.paths.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "at least one font path is required".to_string(),
        ));
    }

    if matches!(req.jobs, Some(0)) {
        return Err((
            StatusCode::BAD_REQUEST,
            "jobs must be at least 1 when provided".to_string(),
        ));
    }

    let query = build_query_from_parts(&req.axes, &req.names, req.monospace)
        .map_err(to_bad_request)?;
    let opts = ListOptions {
        follow_symlinks: req.follow_symlinks,
        jobs: req.jobs,
    };

    // Listing and fetching block on file I/O.
    let fonts = task::spawn_blocking(move || resolve_reports(&resolver, &req.paths, &query, &opts))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("task join error: {e}"),
            )
        })?
        .map_err(to_error_response)?;

    Ok(Json(VariableDataResponse { fonts }))
}

async fn cache_stats_handler<F>(
    State(resolver): State<SharedResolver<F>>,
) -> Json<CacheStatsResponse>
where
    F: VariableDataFetcher + 'static,
{
    Json(cache_stats(&resolver))
}

async fn cache_reset_handler<F>(
    State(resolver): State<SharedResolver<F>>,
) -> Json<CacheStatsResponse>
where
    F: VariableDataFetcher + 'static,
{
    resolver.reset();
    Json(cache_stats(&resolver))
}

fn cache_stats<F: VariableDataFetcher>(resolver: &VariableDataResolver<F>) -> CacheStatsResponse {
    let keys = resolver.store().keys();
    CacheStatsResponse {
        entries: keys.len(),
        keys,
    }
}

fn to_bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, format!("{err:#}"))
}

/// Bad input is a 400; a failed fetch, a short answer from the fetcher or a
/// reset racing the request is a 500.
fn error_status(err: &anyhow::Error) -> StatusCode {
    match err
        .chain()
        .find_map(|cause| cause.downcast_ref::<VariableDataError>())
    {
        None | Some(VariableDataError::MissingIdentity { .. }) => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn to_error_response(err: anyhow::Error) -> (StatusCode, String) {
    (error_status(&err), format!("{err:#}"))
}
