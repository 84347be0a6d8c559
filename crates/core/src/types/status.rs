//! Status enums for catalog and order entities.

use serde::{Deserialize, Serialize};

/// Stock availability of a product.
///
/// Maps to the `stock_status` field on Odoo product records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Whether the product can currently be purchased.
    #[must_use]
    pub const fn is_available(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }
}

/// Sale order lifecycle state.
///
/// Maps to Odoo's `sale.order` state values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    #[default]
    Draft,
    Sent,
    Sale,
    Done,
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_serde() {
        assert_eq!(
            serde_json::to_string(&StockStatus::LowStock).expect("serialize"),
            "\"low_stock\""
        );
        let status: StockStatus = serde_json::from_str("\"out_of_stock\"").expect("deserialize");
        assert_eq!(status, StockStatus::OutOfStock);
    }

    #[test]
    fn test_stock_status_availability() {
        assert!(StockStatus::InStock.is_available());
        assert!(StockStatus::LowStock.is_available());
        assert!(!StockStatus::OutOfStock.is_available());
    }

    #[test]
    fn test_order_state_serde() {
        assert_eq!(
            serde_json::to_string(&OrderState::Sale).expect("serialize"),
            "\"sale\""
        );
    }
}
