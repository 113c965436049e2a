//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use tomtech_core::ProductId;
use tracing::instrument;

use crate::catalog::LoadReport;
use crate::checkout::whatsapp_link;
use crate::error::Result;
use crate::state::AppState;

/// List the catalog, reloading it from the persistence layer.
///
/// The report says which source served the list and which fallbacks were hit.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<LoadReport>> {
    let report = state.reload_catalog().await?;
    Ok(Json(report))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<tomtech_core::Product>> {
    Ok(Json(state.find_product(id).await?))
}

/// Redirect to a WhatsApp chat ordering this product.
#[instrument(skip(state))]
pub async fn order(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Redirect> {
    let product = state.find_product(id).await?;
    let message = state.messages().product_inquiry_message(&product);
    let link = whatsapp_link(&state.whatsapp_number()?, &message);
    Ok(Redirect::to(&link))
}
