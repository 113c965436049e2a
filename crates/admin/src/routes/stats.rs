//! Dashboard counts.

use axum::{Json, extract::State};
use serde::Serialize;
use tomtech_core::CatalogStats;
use tomtech_storefront::catalog::CatalogSource;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub source: CatalogSource,
    /// Unix millis of the last local write.
    pub last_update: Option<i64>,
}

/// GET /api/stats
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let report = state.catalog().load().await?;
    Ok(Json(StatsResponse {
        stats: CatalogStats::from_products(&report.products),
        source: report.source,
        last_update: state.catalog().last_update()?,
    }))
}
