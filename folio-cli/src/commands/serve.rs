//! Search API server.

use super::load_config;
use anyhow::{Context, Result};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use folio_core::{
    search, tag_catalog, Config, IndexCache, MatchedFields, SearchIndex, SearchMode,
    SnapshotRecord, Strategy,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

#[derive(Clone)]
struct AppState {
    cache: Arc<IndexCache>,
    config: Arc<Config>,
}

/// Serve the search API until interrupted
pub async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    let config = load_config(config_path)?;
    let port = port.unwrap_or(config.server.port);
    let timeout = Duration::from_secs(config.server.timeout_secs);

    let state = AppState {
        cache: Arc::new(IndexCache::new(config.snapshot_path())),
        config: Arc::new(config),
    };

    // Warm the cache so the first request does not pay for the read.
    let loaded = current_index(&state.cache).await;
    tracing::info!(
        "Serving {} articles from {:?}",
        loaded.len(),
        state.cache.path()
    );

    let app = router(state, timeout);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Serving search API at http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState, timeout: Duration) -> Router {
    Router::new()
        .route("/api/search", get(api_search))
        .route("/api/posts/{*slug}", get(api_post))
        .route("/api/tags", get(api_tags))
        .route("/health", get(health))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The cached index, loading it off the async runtime if needed.
async fn current_index(cache: &Arc<IndexCache>) -> Arc<SearchIndex> {
    if cache.is_loaded() {
        return cache.get();
    }
    let cache = cache.clone();
    match tokio::task::spawn_blocking(move || cache.get()).await {
        Ok(index) => index,
        Err(err) => {
            tracing::error!("Index load task failed: {}", err);
            Arc::default()
        }
    }
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
    #[serde(rename = "type")]
    mode: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    posts: Vec<SnapshotRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    matches: Vec<MatchEntry>,
}

#[derive(Serialize)]
struct MatchEntry {
    slug: String,
    #[serde(flatten)]
    fields: MatchedFields,
}

async fn api_search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Json(SearchResponse {
            posts: Vec::new(),
            strategy: None,
            matches: Vec::new(),
        })
        .into_response();
    }

    let mode = SearchMode::from_param(params.mode.as_deref());
    let index = current_index(&state.cache).await;
    let results = search(&index, &query, mode);

    tracing::debug!(
        "Search '{}' ({}) matched {} articles via {:?}",
        query,
        mode,
        results.len(),
        results.strategy
    );

    let response = SearchResponse {
        posts: results.articles().map(SnapshotRecord::from).collect(),
        strategy: Some(results.strategy),
        matches: results
            .hits
            .iter()
            .map(|hit| MatchEntry {
                slug: hit.article.slug.clone(),
                fields: hit.matched,
            })
            .collect(),
    };

    Json(response).into_response()
}

async fn api_post(AxumPath(slug): AxumPath<String>, State(state): State<AppState>) -> Response {
    let index = current_index(&state.cache).await;
    match index.find_by_slug(slug.trim_matches('/')) {
        Some(article) => Json(SnapshotRecord::from(article)).into_response(),
        None => (StatusCode::NOT_FOUND, "Post not found").into_response(),
    }
}

async fn api_tags(State(state): State<AppState>) -> Response {
    let index = current_index(&state.cache).await;
    Json(tag_catalog(&index, &state.config)).into_response()
}

async fn health() -> &'static str {
    "ok"
}
