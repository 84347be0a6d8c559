//! Product route handlers.
//!
//! Thin pass-through over the Odoo catalog; responses are served from the
//! client's cache when fresh.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use jaan_core::api::Paginated;
use jaan_core::catalog::{Product, ProductFilters};
use jaan_core::types::ProductId;

use crate::error::Result;
use crate::state::AppState;

/// Filtered, paginated product listing.
#[instrument(skip(state, filters))]
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> Result<Json<Paginated<Product>>> {
    let products = state.odoo().get_products(&filters).await?;
    Ok(Json(products))
}

/// Products flagged for the home page.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.odoo().get_featured_products().await?;
    Ok(Json(products))
}

/// Product detail by slug.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = state.odoo().get_product_by_slug(&slug).await?;
    Ok(Json(product))
}

/// Product detail by ID.
#[instrument(skip(state), fields(id = %id))]
pub async fn show_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = state.odoo().get_product(ProductId::new(id)).await?;
    Ok(Json(product))
}
