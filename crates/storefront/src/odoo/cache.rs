//! Cache types for Odoo catalog responses.

use jaan_core::api::Paginated;
use jaan_core::catalog::{Category, Product};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Paginated<Product>),
    Featured(Vec<Product>),
    Category(Box<Category>),
    Categories(Vec<Category>),
}
