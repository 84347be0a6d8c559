//! Cart route handlers.
//!
//! Mutations run through the cart session, which persists each new cart
//! before it becomes visible. The handlers only translate between HTTP and
//! the session's contract.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use jaan_core::cart::Cart;
use jaan_core::types::ProductId;

use crate::error::Result;
use crate::state::AppState;

/// The cart and its visibility flag, as consumed by the UI.
#[derive(Debug, Serialize)]
pub struct CartEnvelope {
    pub cart: Cart,
    pub is_cart_open: bool,
}

impl CartEnvelope {
    fn from_state(state: &AppState) -> Self {
        Self {
            cart: state.cart().cart(),
            is_cart_open: state.cart().is_open(),
        }
    }
}

/// Item count badge payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Visibility payload for open/close/toggle.
#[derive(Debug, Serialize)]
pub struct CartVisibility {
    pub is_cart_open: bool,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Current cart and visibility.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartEnvelope> {
    Json(CartEnvelope::from_state(&state))
}

/// Item count badge value.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().cart().item_count,
    })
}

/// Add a product to the cart.
///
/// The product snapshot embedded in the cart line is fetched fresh from the
/// catalog, so a repeated add refreshes a stale cached price.
#[instrument(skip(state), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartEnvelope>> {
    let quantity = request.quantity.unwrap_or(1);
    let product = state.odoo().get_product(request.product_id).await?;
    state.cart().add_to_cart(&product, quantity)?;
    Ok(Json(CartEnvelope::from_state(&state)))
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(state), fields(product_id = %request.product_id, quantity = request.quantity))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Json<CartEnvelope> {
    state
        .cart()
        .update_quantity(request.product_id, request.quantity);
    Json(CartEnvelope::from_state(&state))
}

/// Remove a line from the cart.
#[instrument(skip(state), fields(product_id = %request.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartEnvelope> {
    state.cart().remove_from_cart(request.product_id);
    Json(CartEnvelope::from_state(&state))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartEnvelope> {
    state.cart().clear_cart();
    Json(CartEnvelope::from_state(&state))
}

/// Open the cart drawer.
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> Json<CartVisibility> {
    Json(CartVisibility {
        is_cart_open: state.cart().open_cart(),
    })
}

/// Close the cart drawer.
#[instrument(skip(state))]
pub async fn close(State(state): State<AppState>) -> Json<CartVisibility> {
    Json(CartVisibility {
        is_cart_open: state.cart().close_cart(),
    })
}

/// Toggle the cart drawer.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Json<CartVisibility> {
    Json(CartVisibility {
        is_cart_open: state.cart().toggle_cart(),
    })
}

/// Reconcile the cart against the order service.
///
/// On failure the local cart is preserved and the service's message is
/// surfaced; callers decide whether to block checkout.
#[instrument(skip(state))]
pub async fn sync(State(state): State<AppState>) -> Result<Json<CartEnvelope>> {
    state.cart().sync(state.odoo()).await?;
    Ok(Json(CartEnvelope::from_state(&state)))
}
