//! Integration tests for Jaan Storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront against a reachable Odoo backend
//! cargo run -p jaan-storefront
//!
//! # Run integration tests
//! cargo test -p jaan-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart lifecycle over the HTTP API
//! - `storefront_catalog` - Catalog pass-through endpoints
//!
//! Tests are `#[ignore]`d by default because they require a running
//! storefront (`STOREFRONT_BASE_URL`, default `http://localhost:3000`)
//! and a reachable Odoo backend behind it.

#![cfg_attr(not(test), forbid(unsafe_code))]
