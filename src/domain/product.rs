use crate::domain::receipt::serialize_millis;
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

/// A line on a customer's cart.
///
/// Validated on construction and immutable afterwards: the unit price is
/// never negative, the quantity is at least one, and price times quantity
/// fits in a `Decimal` (magnitude below roughly 7.9e28).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    name: String,
    unit_price: Decimal,
    quantity: u32,
    #[serde(rename = "unit_ms", serialize_with = "serialize_millis")]
    unit_duration: Duration,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        unit_duration: Duration,
    ) -> Result<Self> {
        if unit_price < Decimal::ZERO {
            return Err(CheckoutError::ValidationError(
                "Unit price must not be negative".to_string(),
            ));
        }
        if quantity == 0 {
            return Err(CheckoutError::ValidationError(
                "Quantity must be positive".to_string(),
            ));
        }
        if unit_price.checked_mul(Decimal::from(quantity)).is_none() {
            return Err(CheckoutError::ValidationError(format!(
                "Line total of {quantity} x {unit_price} overflows"
            )));
        }
        Ok(Self {
            name: name.into(),
            unit_price,
            quantity,
            unit_duration,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_duration(&self) -> Duration {
        self.unit_duration
    }

    /// Price times quantity. Cannot overflow, `new` rejects such lines.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Nominal time a cashier spends scanning the whole line.
    pub fn processing_time(&self) -> Duration {
        self.unit_duration.saturating_mul(self.quantity)
    }
}

/// A shopper and the ordered contents of their cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    name: String,
    products: Vec<Product>,
}

impl Customer {
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}
