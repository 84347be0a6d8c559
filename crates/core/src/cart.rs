//! The cart value type and its pure mutation operations.
//!
//! A [`Cart`] is an immutable value: every operation takes a cart by
//! reference and returns a new one. `total`, `item_count` and each line's
//! `subtotal` are derived caches of the underlying quantities and prices.
//! They are recomputed wholesale by [`Cart::from_lines`] on every mutation,
//! never patched incrementally, so they cannot drift.
//!
//! Invariants, after every operation:
//! - `total == Σ line.subtotal`
//! - `item_count == Σ line.quantity`
//! - `line.subtotal == line.quantity × line.product.price` for every line

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::ProductId;

/// Errors raised by cart operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A mutation was given a quantity outside its contract.
    ///
    /// `add` requires a quantity of at least 1; passing zero is a caller
    /// bug, not a request to remove (that is `update`'s domain), so it is
    /// rejected rather than clamped.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
}

/// One product entry within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to. Unique within a cart.
    pub product_id: ProductId,
    /// Denormalized product snapshot captured at add-time.
    ///
    /// A later `add` for the same product replaces this snapshot, so the
    /// cached price can be refreshed without a server round-trip.
    pub product: Product,
    /// Units of the product. Always at least 1.
    pub quantity: u32,
    /// Derived: `quantity × product.price`. A cache, never a source of truth.
    pub subtotal: Decimal,
}

impl CartLine {
    fn new(product: Product, quantity: u32) -> Self {
        let subtotal = line_subtotal(quantity, &product);
        Self {
            product_id: product.id,
            product,
            quantity,
            subtotal,
        }
    }
}

/// The client-side representation of items the user intends to purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cart {
    /// Lines in insertion order (first added first).
    pub items: Vec<CartLine>,
    /// Derived: sum of all line subtotals.
    pub total: Decimal,
    /// Derived: sum of all line quantities.
    pub item_count: u32,
}

impl Cart {
    /// The canonical empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild a cart from lines, recomputing every derived value.
    ///
    /// This is the single place subtotals and totals are derived; all
    /// mutation operations funnel through it.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let items: Vec<CartLine> = items
            .into_iter()
            .map(|line| CartLine::new(line.product, line.quantity))
            .collect();
        let total = items.iter().map(|line| line.subtotal).sum();
        let item_count = items.iter().map(|line| line.quantity).sum();
        Self {
            items,
            total,
            item_count,
        }
    }

    /// Validate and repair a cart deserialized from an untrusted payload.
    ///
    /// Lines with a zero quantity or a negative price are dropped; every
    /// surviving subtotal and the totals are recomputed. The stored blob is
    /// treated as a hint, not as ground truth.
    #[must_use]
    pub fn sanitize(self) -> Self {
        let items = self
            .items
            .into_iter()
            .filter(|line| line.quantity >= 1 && line.product.price >= Decimal::ZERO)
            .collect();
        Self::from_lines(items)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id == product_id)
    }
}

fn line_subtotal(quantity: u32, product: &Product) -> Decimal {
    Decimal::from(quantity) * product.price
}

/// Add `quantity` units of `product` to the cart.
///
/// If a line for the product already exists, its quantity is incremented and
/// its product snapshot replaced with the newly supplied one (refreshing a
/// stale cached price). Otherwise a new line is appended.
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
pub fn add(cart: &Cart, product: &Product, quantity: u32) -> Result<Cart, CartError> {
    if quantity == 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }

    let mut items = cart.items.clone();
    if let Some(line) = items.iter_mut().find(|line| line.product_id == product.id) {
        line.quantity += quantity;
        line.product = product.clone();
    } else {
        items.push(CartLine::new(product.clone(), quantity));
    }

    Ok(Cart::from_lines(items))
}

/// Remove the line for `product_id`, if present.
///
/// Removing an absent product is a no-op, not an error.
#[must_use]
pub fn remove(cart: &Cart, product_id: ProductId) -> Cart {
    let items = cart
        .items
        .iter()
        .filter(|line| line.product_id != product_id)
        .cloned()
        .collect();
    Cart::from_lines(items)
}

/// Set the quantity of the line for `product_id` to exactly `quantity`.
///
/// A quantity of zero is equivalent to [`remove`]. Updating an absent
/// product is a no-op.
#[must_use]
pub fn update(cart: &Cart, product_id: ProductId, quantity: u32) -> Cart {
    if quantity == 0 {
        return remove(cart, product_id);
    }

    let items = cart
        .items
        .iter()
        .cloned()
        .map(|mut line| {
            if line.product_id == product_id {
                line.quantity = quantity;
            }
            line
        })
        .collect();
    Cart::from_lines(items)
}

/// The empty cart, regardless of input.
#[must_use]
pub fn clear(_cart: &Cart) -> Cart {
    Cart::empty()
}
