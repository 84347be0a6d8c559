//! Odoo REST API client.
//!
//! # Architecture
//!
//! - Plain JSON REST over `reqwest`; every endpoint wraps its payload in the
//!   `{success, data, error}` envelope defined in `jaan_core::api`
//! - Odoo is the source of truth for stock and pricing - the storefront
//!   never recomputes either, it only caches catalog reads
//! - In-memory caching via `moka` for catalog responses (5 minute TTL);
//!   cart and order operations are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use jaan_storefront::odoo::OdooClient;
//!
//! let client = OdooClient::new(&config.odoo);
//!
//! // Look up a product and reconcile the cart before checkout
//! let product = client.get_product_by_slug("organic-bananas").await?;
//! let corrected = client.sync_cart(&cart).await?;
//! ```

mod cache;
mod client;

pub use client::OdooClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Odoo API.
#[derive(Debug, Error)]
pub enum OdooError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The service reported a failure (`success: false` or a non-success
    /// HTTP status). Carries the server's error message verbatim.
    #[error("{0}")]
    Service(String),
}
