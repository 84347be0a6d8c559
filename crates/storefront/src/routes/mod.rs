//! HTTP route handlers for the storefront.
//!
//! Every handler returns JSON; the UI consumer derives all subtotal, total
//! and count display directly from the cart value it receives and treats it
//! as read-only.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (Odoo reachability)
//!
//! # Catalog
//! GET  /products               - Product listing (filters as query params)
//! GET  /products/featured      - Featured products
//! GET  /products/{slug}        - Product detail
//! GET  /products/id/{id}       - Product detail by ID
//! GET  /categories             - Category listing
//! GET  /categories/{slug}      - Category detail
//!
//! # Cart
//! GET  /cart                   - Current cart and visibility
//! GET  /cart/count             - Item count badge value
//! POST /cart/add               - Add a product (quantity defaults to 1)
//! POST /cart/update            - Set a line's quantity (0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! POST /cart/open              - Open the cart drawer
//! POST /cart/close             - Close the cart drawer
//! POST /cart/toggle            - Toggle the cart drawer
//! POST /cart/sync              - Reconcile against the order service
//!
//! # Orders
//! POST /checkout               - Sync, then create an order
//! GET  /orders                 - Order history
//! GET  /orders/{id}            - Order detail
//! ```

pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/{slug}", get(products::show))
        .route("/id/{id}", get(products::show_by_id))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/toggle", post(cart::toggle))
        .route("/sync", post(cart::sync))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog routes
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(orders::checkout))
        // Order history
        .nest("/orders", order_routes())
}
