use crate::domain::cashier::Cashier;
use crate::domain::ports::{Checkout, LogSink};
use crate::domain::product::Customer;
use crate::domain::receipt::{ProcessedItem, Receipt};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Scans a cart one product at a time, sleeping `unit_duration * quantity`
/// per product to model service time.
///
/// Products are handled strictly in cart order. The measured time, not the
/// nominal one, ends up on the receipt. Cancellation while sleeping drops
/// everything scanned so far.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedCheckout;

#[async_trait]
impl Checkout for SimulatedCheckout {
    async fn checkout(
        &self,
        cashier: &Cashier,
        customer: &Customer,
        sink: &dyn LogSink,
        cancel: &CancellationToken,
    ) -> Result<Receipt> {
        let started = Instant::now();
        sink.emit(&format!(
            "[{}] Starting checkout for customer: {}",
            cashier.name,
            customer.name()
        ));

        let mut items = Vec::with_capacity(customer.products().len());
        let mut total = Decimal::ZERO;

        for product in customer.products() {
            let product_started = Instant::now();
            sink.emit(&format!(
                "[{}] Processing product: {} (x{}) for customer: {}",
                cashier.name,
                product.name(),
                product.quantity(),
                customer.name()
            ));

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    sink.emit(&format!(
                        "[{}] Checkout interrupted for customer: {}",
                        cashier.name,
                        customer.name()
                    ));
                    debug!(customer = customer.name(), cashier = cashier.id, "checkout cancelled");
                    return Err(CheckoutError::Cancelled);
                }
                _ = sleep(product.processing_time()) => {}
            }

            let elapsed = product_started.elapsed();
            let subtotal = product.line_total();
            total = total.checked_add(subtotal).ok_or_else(|| {
                CheckoutError::UnitFailed(format!(
                    "Total for customer {} overflows at product {}",
                    customer.name(),
                    product.name()
                ))
            })?;
            sink.emit(&format!(
                "[{}] Processed product: {} | Quantity: {} | Unit price: {:.2} | Subtotal: {:.2} | Time: {} ms",
                cashier.name,
                product.name(),
                product.quantity(),
                product.unit_price(),
                subtotal,
                elapsed.as_millis()
            ));
            items.push(ProcessedItem {
                product: product.clone(),
                elapsed,
            });
        }

        let elapsed = started.elapsed();
        sink.emit(&format!(
            "[{}] Checkout completed for customer: {} | Total: {:.2} | Total time: {} ms",
            cashier.name,
            customer.name(),
            total,
            elapsed.as_millis()
        ));

        Ok(Receipt::new(customer.name(), cashier, items, total, elapsed))
    }
}
