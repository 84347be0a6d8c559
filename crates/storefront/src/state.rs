//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartSession, CartStorage};
use crate::config::StorefrontConfig;
use crate::odoo::OdooClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Odoo client and the cart session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    odoo: OdooClient,
    cart: CartSession,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cart session is initialized from the configured storage slot:
    /// a file path when `cart_storage_path` is set, otherwise a disabled
    /// slot (non-interactive deployments start every session empty).
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let odoo = OdooClient::new(&config.odoo);
        let storage = config
            .cart_storage_path
            .clone()
            .map_or_else(CartStorage::disabled, CartStorage::file);
        let cart = CartSession::new(storage);
        cart.init();

        Self {
            inner: Arc::new(AppStateInner { config, odoo, cart }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Odoo API client.
    #[must_use]
    pub fn odoo(&self) -> &OdooClient {
        &self.inner.odoo
    }

    /// Get a reference to the cart session.
    #[must_use]
    pub fn cart(&self) -> &CartSession {
        &self.inner.cart
    }
}
