use crate::domain::ports::LogSink;
use crate::domain::receipt::Receipt;
use rust_decimal::Decimal;
use std::time::Duration;

/// Receipts in reporting order plus the run's totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    receipts: Vec<Receipt>,
    /// `None` when the receipt totals together exceed `Decimal`'s range.
    pub total: Option<Decimal>,
    /// Sum of per-receipt durations. Overlapping checkouts are counted once
    /// each, so this is cashier time, not elapsed time.
    pub accumulated: Duration,
    pub wall_clock: Duration,
}

impl Summary {
    /// Sorts by customer name (byte order, stable) and computes the totals.
    pub fn new(mut receipts: Vec<Receipt>, wall_clock: Duration) -> Self {
        receipts.sort_by(|a, b| a.customer_name().cmp(b.customer_name()));
        let total = receipts
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.total()));
        let accumulated = receipts
            .iter()
            .fold(Duration::ZERO, |acc, r| acc.saturating_add(r.elapsed()));
        Self {
            receipts,
            total,
            accumulated,
            wall_clock,
        }
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn into_receipts(self) -> Vec<Receipt> {
        self.receipts
    }

    /// One line per receipt, one per processed item under it, then the
    /// three totals lines.
    pub fn lines(&self) -> Vec<String> {
        let item_count: usize = self.receipts.iter().map(|r| r.items().len()).sum();
        let mut lines = Vec::with_capacity(self.receipts.len() + item_count + 3);

        for receipt in &self.receipts {
            lines.push(format!(
                "Customer: {} | Cashier: {} (ID: {}) | Items: {} | Total: ${:.2} | Time: {} ms",
                receipt.customer_name(),
                receipt.cashier_name(),
                receipt.cashier_id(),
                receipt.items().len(),
                receipt.total(),
                receipt.elapsed().as_millis()
            ));
            for item in receipt.items() {
                let product = &item.product;
                lines.push(format!(
                    "  - {} | Quantity: {} | Unit price: ${:.2} | Subtotal: ${:.2} | Time: {} ms",
                    product.name(),
                    product.quantity(),
                    product.unit_price(),
                    item.subtotal(),
                    item.elapsed.as_millis()
                ));
            }
        }

        lines.push(match self.total {
            Some(total) => format!("GRAND TOTAL (all checkouts): ${total:.2}"),
            None => "GRAND TOTAL (all checkouts): overflow".to_string(),
        });
        lines.push(format!(
            "Accumulated time (sum of all checkouts): {} ms",
            self.accumulated.as_millis()
        ));
        lines.push(format!(
            "Real simulation time (wall-clock): {} ms",
            self.wall_clock.as_millis()
        ));
        lines
    }

    pub fn emit(&self, sink: &dyn LogSink) {
        sink.emit("========== FINAL CHECKOUT SUMMARY ==========");
        for line in self.lines() {
            sink.emit(&line);
        }
    }
}
