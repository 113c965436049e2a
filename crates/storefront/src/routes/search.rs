//! Search route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tomtech_core::Product;
use tomtech_core::catalog::{MAX_RESULTS, search as search_catalog};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Upper bound on `limit`.
const LIMIT_CAP: usize = 50;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

/// Search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Product>,
}

/// Search the catalog by name, description, category and tags.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let products = state.products().await?;
    let limit = query.limit.unwrap_or(MAX_RESULTS).min(LIMIT_CAP);
    let results = search_catalog(&products, &query.q, limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(SearchResponse {
        query: query.q.trim().to_string(),
        results,
    }))
}
