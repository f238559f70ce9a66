use super::cashier::Cashier;
use super::product::Customer;
use super::receipt::Receipt;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Receives progress lines from every unit of work.
///
/// Implementations are called concurrently; each `emit` must write its line
/// as a single, uninterrupted unit.
pub trait LogSink: Send + Sync {
    fn emit(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}

/// One cashier serving one customer from the first product to the receipt.
#[async_trait]
pub trait Checkout: Send + Sync {
    async fn checkout(
        &self,
        cashier: &Cashier,
        customer: &Customer,
        sink: &dyn LogSink,
        cancel: &CancellationToken,
    ) -> Result<Receipt>;
}

pub type LogSinkRef = Arc<dyn LogSink>;
pub type CheckoutRef = Arc<dyn Checkout>;
