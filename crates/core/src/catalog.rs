//! Catalog records as supplied by the Odoo backend.
//!
//! Products are read-only from the storefront's point of view: the catalog
//! service owns them, and the cart embeds a denormalized snapshot captured at
//! add-time. Prices are decimal amounts (serialized as strings to preserve
//! precision).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId, StockStatus};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Odoo category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Parent category, if nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Number of products in this category.
    pub product_count: u32,
}

/// A sellable product.
///
/// The cart holds a full copy of this record per line, so a later add can
/// refresh a stale cached snapshot (price included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Odoo product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Long description.
    pub description: String,
    /// Short description for listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Unit price. Non-negative.
    pub price: Decimal,
    /// Strike-through comparison price, if discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Decimal>,
    /// Stock keeping unit.
    pub sku: String,
    /// Barcode, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Owning category.
    pub category_id: CategoryId,
    /// Denormalized category name for display.
    pub category_name: String,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units currently on hand.
    pub stock_quantity: u32,
    /// Stock availability bucket.
    pub stock_status: StockStatus,
    /// Unit of measure (e.g., "lb", "dozen").
    pub unit: String,
    /// Shipping weight in pounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    /// Shown on the home page.
    #[serde(default)]
    pub is_featured: bool,
    /// Recently added to the catalog.
    #[serde(default)]
    pub is_new: bool,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last record update time.
    pub updated_at: DateTime<Utc>,
}

/// Sort orders accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Name,
    PriceAsc,
    PriceDesc,
    Newest,
}

/// Filters for the product listing endpoint.
///
/// Serializes to query parameters; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ProductFilters {
    /// Whether this filter set performs a text search.
    ///
    /// Search results are not cached by the client.
    #[must_use]
    pub const fn is_search(&self) -> bool {
        self.search.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Organic Bananas".to_string(),
            slug: "organic-bananas".to_string(),
            description: "Premium organic bananas.".to_string(),
            short_description: Some("Fresh organic bananas".to_string()),
            price: Decimal::new(299, 2),
            compare_price: Some(Decimal::new(349, 2)),
            sku: "FP-001".to_string(),
            barcode: None,
            category_id: CategoryId::new(1),
            category_name: "Fresh Produce".to_string(),
            images: vec!["/placeholder.svg".to_string()],
            stock_quantity: 150,
            stock_status: StockStatus::InStock,
            unit: "bunch".to_string(),
            weight: None,
            is_featured: true,
            is_new: false,
            created_at: "2024-01-15T00:00:00Z".parse().expect("timestamp"),
            updated_at: "2024-01-20T00:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn test_product_serde_roundtrip() {
        let product = sample_product();
        let json = serde_json::to_string(&product).expect("serialize");
        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, product);
    }

    #[test]
    fn test_product_optional_fields_default() {
        // A minimal payload without optional fields still deserializes.
        let json = r#"{
            "id": 2,
            "name": "Farm Fresh Eggs",
            "slug": "farm-fresh-eggs",
            "description": "Free-range eggs from local farms.",
            "price": "5.99",
            "sku": "DE-001",
            "category_id": 2,
            "category_name": "Dairy & Eggs",
            "stock_quantity": 80,
            "stock_status": "in_stock",
            "unit": "dozen",
            "created_at": "2024-01-10T00:00:00Z",
            "updated_at": "2024-01-20T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.price, Decimal::new(599, 2));
        assert!(product.images.is_empty());
        assert!(!product.is_featured);
        assert_eq!(product.compare_price, None);
    }

    #[test]
    fn test_filters_serialize_skips_unset() {
        let filters = ProductFilters {
            search: Some("salmon".to_string()),
            in_stock_only: Some(true),
            ..ProductFilters::default()
        };
        let json = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(json["search"], "salmon");
        assert!(json.get("category_id").is_none());
        assert!(json.get("sort_by").is_none());
        assert!(filters.is_search());
    }
}
