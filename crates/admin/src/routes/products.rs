//! Catalog editor route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tomtech_core::{Product, ProductDraft, ProductId};
use tomtech_storefront::catalog::{LoadReport, RemoteSync, SaveReport};

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// A product write and whether the remote mirror took it.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
    pub synced: bool,
    pub remote: RemoteSync,
}

impl ProductResponse {
    fn new(product: Product, report: SaveReport) -> Self {
        Self {
            product,
            synced: report.synced(),
            remote: report.remote,
        }
    }
}

/// Deletion result.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub synced: bool,
    pub remote: RemoteSync,
}

/// Reload and list the catalog.
///
/// GET /api/products
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<LoadReport>> {
    Ok(Json(state.catalog().load().await?))
}

/// Create a product from an editor draft.
///
/// POST /api/products
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let (product, report) = state.catalog().create_product(draft).await?;
    tracing::info!(admin = %admin.username, id = %product.id, "catalog edit: create");
    Ok((StatusCode::CREATED, Json(ProductResponse::new(product, report))))
}

/// Overwrite a product's editor fields.
///
/// PUT /api/products/{id}
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<ProductResponse>> {
    let (product, report) = state.catalog().update_product(id, draft).await?;
    tracing::info!(admin = %admin.username, %id, "catalog edit: update");
    Ok(Json(ProductResponse::new(product, report)))
}

/// Remove a product.
///
/// DELETE /api/products/{id}
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<DeleteResponse>> {
    let (_removed, report) = state.catalog().delete_product(id).await?;
    tracing::info!(admin = %admin.username, %id, "catalog edit: delete");
    Ok(Json(DeleteResponse {
        synced: report.synced(),
        remote: report.remote,
    }))
}
