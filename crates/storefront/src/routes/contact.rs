//! Contact and booking handlers. Both end in a WhatsApp chat.

use axum::{Json, extract::State, response::Redirect};
use serde::Serialize;
use tracing::instrument;

use crate::checkout::{BookingRequest, ContactInquiry, general_inquiry_message, whatsapp_link};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// A prepared WhatsApp link.
#[derive(Debug, Serialize)]
pub struct WhatsAppLinkResponse {
    pub whatsapp_url: String,
}

/// Redirect to a general enquiry chat.
#[instrument(skip(state))]
pub async fn contact(State(state): State<AppState>) -> Result<Redirect> {
    let link = whatsapp_link(&state.whatsapp_number()?, general_inquiry_message());
    Ok(Redirect::to(&link))
}

/// Turn a contact form submission into a WhatsApp link.
#[instrument(skip(state, inquiry))]
pub async fn inquiry(
    State(state): State<AppState>,
    Json(inquiry): Json<ContactInquiry>,
) -> Result<Json<WhatsAppLinkResponse>> {
    if inquiry.name.trim().is_empty() || inquiry.phone.trim().is_empty() {
        return Err(AppError::BadRequest("name and phone are required".to_string()));
    }
    let whatsapp_url = whatsapp_link(&state.whatsapp_number()?, &inquiry.to_message());
    Ok(Json(WhatsAppLinkResponse { whatsapp_url }))
}

/// Turn a service booking into a WhatsApp link.
#[instrument(skip(state, booking))]
pub async fn booking(
    State(state): State<AppState>,
    Json(booking): Json<BookingRequest>,
) -> Result<Json<WhatsAppLinkResponse>> {
    if booking.service.trim().is_empty() || booking.name.trim().is_empty() {
        return Err(AppError::BadRequest("service and name are required".to_string()));
    }
    let whatsapp_url = whatsapp_link(&state.whatsapp_number()?, &booking.to_message());
    Ok(Json(WhatsAppLinkResponse { whatsapp_url }))
}
