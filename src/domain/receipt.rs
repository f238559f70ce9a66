use super::cashier::Cashier;
use super::product::Product;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// A product together with the wall time actually spent scanning it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedItem {
    pub product: Product,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl ProcessedItem {
    pub fn subtotal(&self) -> Decimal {
        self.product.line_total()
    }
}

/// The finished record of one customer's checkout.
///
/// Produced exactly once by the unit of work that served the customer and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    customer_name: String,
    cashier_id: u32,
    cashier_name: String,
    items: Vec<ProcessedItem>,
    total: Decimal,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    elapsed: Duration,
}

impl Receipt {
    pub fn new(
        customer_name: impl Into<String>,
        cashier: &Cashier,
        items: Vec<ProcessedItem>,
        total: Decimal,
        elapsed: Duration,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            cashier_id: cashier.id,
            cashier_name: cashier.name.clone(),
            items,
            total,
            elapsed,
        }
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn cashier_id(&self) -> u32 {
        self.cashier_id
    }

    pub fn cashier_name(&self) -> &str {
        &self.cashier_name
    }

    pub fn items(&self) -> &[ProcessedItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

pub(crate) fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
