//! Order and checkout route handlers.
//!
//! Checkout syncs the cart first: the order service is authoritative for
//! stock and pricing, and a failed sync blocks the order with the service's
//! message surfaced verbatim.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use jaan_core::order::{Address, CreateOrderRequest, Order};
use jaan_core::types::OrderId;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Checkout request body. The cart itself comes from the session.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment_method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Order history.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = state.odoo().get_orders().await?;
    Ok(Json(orders))
}

/// Order detail by ID.
#[instrument(skip(state), fields(id = %id))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Order>> {
    let order = state.odoo().get_order(OrderId::new(id)).await?;
    Ok(Json(order))
}

/// Create an order from the current cart.
///
/// The cart is synced first; stock or price corrections from the service
/// land in the order, and a failed sync aborts checkout with the cart left
/// untouched. The cart is cleared only after the order exists.
#[instrument(skip(state, request))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<Order>> {
    if state.cart().cart().is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let cart = state.cart().sync(state.odoo()).await?;
    if cart.is_empty() {
        // Everything in the cart was out of stock after reconciliation.
        return Err(AppError::BadRequest(
            "No items in the cart are available".to_string(),
        ));
    }

    let order = state
        .odoo()
        .create_order(&CreateOrderRequest {
            cart,
            shipping_address: request.shipping_address,
            billing_address: request.billing_address,
            payment_method: request.payment_method,
            notes: request.notes,
        })
        .await?;

    state.cart().clear_cart();

    Ok(Json(order))
}
