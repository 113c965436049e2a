//! Order number settings.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tomtech_core::WhatsAppNumber;
use tomtech_storefront::settings;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WhatsAppSettings {
    /// Number in effect.
    pub number: WhatsAppNumber,
    /// Configured fallback.
    pub default_number: WhatsAppNumber,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWhatsAppRequest {
    pub number: String,
}

fn current(state: &AppState) -> Result<WhatsAppSettings> {
    Ok(WhatsAppSettings {
        number: state.whatsapp_number()?,
        default_number: state.config().catalog.default_whatsapp_number.clone(),
    })
}

/// GET /api/settings/whatsapp
pub async fn show_whatsapp(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<WhatsAppSettings>> {
    Ok(Json(current(&state)?))
}

/// PUT /api/settings/whatsapp
pub async fn update_whatsapp(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(req): Json<UpdateWhatsAppRequest>,
) -> Result<Json<WhatsAppSettings>> {
    let number =
        WhatsAppNumber::parse(&req.number).map_err(|e| AppError::BadRequest(e.to_string()))?;
    settings::set_whatsapp_number(state.catalog().cache(), &number)?;
    tracing::info!(admin = %admin.username, %number, "whatsapp number updated");
    Ok(Json(current(&state)?))
}
