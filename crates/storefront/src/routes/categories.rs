//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use jaan_core::catalog::Category;

use crate::error::Result;
use crate::state::AppState;

/// Category listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.odoo().get_categories().await?;
    Ok(Json(categories))
}

/// Category detail by slug.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>> {
    let category = state.odoo().get_category_by_slug(&slug).await?;
    Ok(Json(category))
}
