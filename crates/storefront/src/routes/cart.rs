//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation returns the
//! updated cart.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tomtech_core::{Cart, ProductId};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::checkout::{CheckoutError, whatsapp_link};
use crate::error::{AppError, Result};
use crate::models::{CartView, session_keys};
use crate::saved_cart;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session (empty if none).
async fn get_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart in the session.
async fn set_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

fn view(state: &AppState, cart: &Cart) -> Json<CartView> {
    Json(CartView::new(cart, &state.config().currency_label))
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Change quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub delta: i32,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Restore request; without a token the session's last saved cart is used.
#[derive(Debug, Default, Deserialize)]
pub struct RestoreCartRequest {
    #[serde(default)]
    pub token: Option<Uuid>,
}

/// Saved cart token.
#[derive(Debug, Serialize)]
pub struct SavedCartResponse {
    pub token: Uuid,
}

/// Show the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = get_cart(&session).await?;
    Ok(view(&state, &cart))
}

/// Add one unit of a product.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state.find_product(request.product_id).await?;
    let mut cart = get_cart(&session).await?;
    cart.add(product);
    set_cart(&session, &cart).await?;
    Ok(view(&state, &cart))
}

/// Change a line's quantity by `delta`; zero or less removes it.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    if !cart.change_quantity(request.product_id, request.delta) {
        return Err(AppError::NotFound(format!(
            "product {} in cart",
            request.product_id
        )));
    }
    set_cart(&session, &cart).await?;
    Ok(view(&state, &cart))
}

/// Remove a line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.remove(request.product_id);
    set_cart(&session, &cart).await?;
    Ok(view(&state, &cart))
}

/// Save the cart for later and return its token.
#[instrument(skip(state, session))]
pub async fn save(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<SavedCartResponse>> {
    let cart = get_cart(&session).await?;
    let token = saved_cart::save_cart(state.catalog().cache(), &cart)?;
    session.insert(session_keys::SAVED_CART_TOKEN, token).await?;
    Ok(Json(SavedCartResponse { token }))
}

/// Replace the session cart with a saved one.
#[instrument(skip(state, session, request))]
pub async fn restore(
    State(state): State<AppState>,
    session: Session,
    request: Option<Json<RestoreCartRequest>>,
) -> Result<Json<CartView>> {
    let requested = request.and_then(|Json(body)| body.token);
    let token = match requested {
        Some(token) => token,
        None => session
            .get::<Uuid>(session_keys::SAVED_CART_TOKEN)
            .await?
            .ok_or_else(|| AppError::NotFound("saved cart".to_string()))?,
    };

    let cart = saved_cart::load_cart(state.catalog().cache(), &token)?;
    set_cart(&session, &cart).await?;
    tracing::debug!(%token, "cart restored");
    Ok(view(&state, &cart))
}

/// Redirect to WhatsApp with the order summary, or back to the cart when it
/// is empty.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = get_cart(&session).await?;
    let message = match state.messages().order_message(&cart) {
        Ok(message) => message,
        Err(CheckoutError::EmptyCart) => return Ok(Redirect::to("/cart").into_response()),
    };

    let link = whatsapp_link(&state.whatsapp_number()?, &message);
    tracing::info!(
        items = cart.item_count(),
        total = %cart.total(),
        "checkout handed off to whatsapp"
    );
    Ok(Redirect::to(&link).into_response())
}
