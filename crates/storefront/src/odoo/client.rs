//! Odoo REST API client implementation.
//!
//! Wraps `reqwest` with the `{success, data, error}` envelope handling and
//! caches catalog reads using `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use jaan_core::api::{ApiResponse, Paginated};
use jaan_core::cart::Cart;
use jaan_core::catalog::{Category, Product, ProductFilters};
use jaan_core::order::{CreateOrderRequest, Order};
use jaan_core::types::{OrderId, ProductId};

use crate::config::OdooConfig;
use crate::odoo::OdooError;

use super::cache::CacheValue;

// =============================================================================
// OdooClient
// =============================================================================

/// Client for the Odoo REST API.
///
/// Provides typed access to the catalog, cart sync, and order endpoints.
/// Products and categories are cached for 5 minutes.
#[derive(Clone)]
pub struct OdooClient {
    inner: Arc<OdooClientInner>,
}

struct OdooClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl OdooClient {
    /// Create a new Odoo API client.
    #[must_use]
    pub fn new(config: &OdooConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(OdooClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Issue a GET request and unwrap the response envelope.
    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, OdooError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self
            .inner
            .client
            .get(format!("{}{path}", self.inner.base_url));
        if let Some(query) = query {
            request = request.query(query);
        }
        self.execute::<T>(request).await
    }

    /// Issue a POST request with a JSON body and unwrap the response envelope.
    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, OdooError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self
            .inner
            .client
            .post(format!("{}{path}", self.inner.base_url))
            .json(body);
        self.execute::<T>(request).await
    }

    /// Send a prepared request and decode the `{success, data, error}` envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, OdooError> {
        let response = request
            .bearer_auth(&self.inner.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(OdooError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OdooError::NotFound(
                extract_error(&response_text)
                    .unwrap_or_else(|| "Resource not found".to_string()),
            ));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Odoo API returned non-success status"
            );
            return Err(OdooError::Service(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            )));
        }

        let envelope: ApiResponse<T> = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Odoo response"
                );
                return Err(OdooError::Parse(e));
            }
        };

        if !envelope.success {
            return Err(OdooError::Service(
                envelope
                    .error
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }

        envelope.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Odoo response reported success but carried no data"
            );
            OdooError::Service("No data in response".to_string())
        })
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, OdooError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get("/categories", None::<&()>).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Category, OdooError> {
        let cache_key = format!("category:{slug}");

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(*category);
        }

        let category: Category = self.get(&format!("/categories/{slug}"), None::<&()>).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a filtered, paginated product listing.
    ///
    /// Search queries bypass the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, filters))]
    pub async fn get_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Paginated<Product>, OdooError> {
        let cache_key = format!("products:{filters:?}");

        if !filters.is_search()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Paginated<Product> = self.get("/products", Some(filters)).await?;

        if !filters.is_search() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get the products flagged for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_products(&self) -> Result<Vec<Product>, OdooError> {
        let cache_key = "products:featured".to_string();

        if let Some(CacheValue::Featured(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for featured products");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .get("/products", Some(&[("featured", "true")]))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Featured(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, OdooError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get(&format!("/products/{slug}"), None::<&()>).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a product by its ID.
    ///
    /// Used by the cart's add operation to capture a fresh product snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, OdooError> {
        let cache_key = format!("product:id:{product_id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .get(&format!("/products/id/{product_id}"), None::<&()>)
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Reconcile a cart against current stock and pricing.
    ///
    /// The server returns a corrected cart; the caller decides whether to
    /// adopt it (see `CartSession::sync`). Exactly one exchange is attempted
    /// per call - retrying is a caller concern.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails; the input cart is untouched.
    #[instrument(skip(self, cart), fields(item_count = cart.item_count))]
    pub async fn sync_cart(&self, cart: &Cart) -> Result<Cart, OdooError> {
        self.post("/cart", cart).await
    }

    // =========================================================================
    // Order Methods (not cached - mutable state)
    // =========================================================================

    /// Create a sale order from a checkout request.
    ///
    /// # Errors
    ///
    /// Returns an error if order creation fails; no order exists in that case.
    #[instrument(skip(self, request), fields(item_count = request.cart.item_count))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, OdooError> {
        self.post("/orders", request).await
    }

    /// Get the current user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, OdooError> {
        self.get("/orders", None::<&()>).await
    }

    /// Get a single order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, OdooError> {
        self.get(&format!("/orders/{order_id}"), None::<&()>).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, slug: &str) {
        self.inner.cache.invalidate(&format!("product:{slug}")).await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Pull the `error` field out of an envelope body without committing to a
/// payload type.
fn extract_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_cheaply_cloneable() {
        let config = OdooConfig {
            base_url: "https://erp.example.com/api".to_string(),
            api_key: secrecy::SecretString::from("k9$Qz2!mXv7@Lp4#"),
        };
        let client = OdooClient::new(&config);
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.inner, &clone.inner));
    }
}
