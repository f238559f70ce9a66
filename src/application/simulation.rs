use super::checkout::SimulatedCheckout;
use super::dispatcher::Dispatcher;
use super::report::Summary;
use crate::config::SimulationConfig;
use crate::domain::assignment::AssignmentMode;
use crate::domain::cashier::CashierPool;
use crate::domain::ports::{CheckoutRef, LogSinkRef};
use crate::domain::product::Customer;
use crate::domain::receipt::Receipt;
use crate::error::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The result of a full run: the sorted summary plus how the run ended.
#[derive(Debug)]
pub struct SimulationReport {
    pub summary: Summary,
    pub failed: Vec<String>,
    pub interrupted: bool,
}

/// Wires a cashier pool, a checkout implementation and a log sink together.
pub struct Simulation {
    pool: CashierPool,
    checkout: CheckoutRef,
    sink: LogSinkRef,
}

impl Simulation {
    /// Creates a new `Simulation` instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - The fixed set of cashiers, read-only for the whole run.
    /// * `checkout` - The unit of work run once per customer.
    /// * `sink` - Receives every progress and summary line.
    pub fn new(pool: CashierPool, checkout: CheckoutRef, sink: LogSinkRef) -> Self {
        Self {
            pool,
            checkout,
            sink,
        }
    }

    /// The default pool and the simulated checkout, logging to `sink`.
    pub fn with_sink(sink: LogSinkRef) -> Self {
        Self::new(CashierPool::default(), Arc::new(SimulatedCheckout), sink)
    }

    /// Dispatches all customers, then sorts and reports the receipts.
    ///
    /// An empty customer list is not an error and produces no summary.
    pub async fn run(
        &self,
        customers: Vec<Customer>,
        config: &SimulationConfig,
        cancel: &CancellationToken,
    ) -> Result<SimulationReport> {
        let dispatcher = Dispatcher::new(&self.pool, self.checkout.clone(), self.sink.clone());
        let is_empty = customers.is_empty();
        let outcome = dispatcher.dispatch(customers, config, cancel).await?;

        let summary = Summary::new(outcome.receipts, outcome.wall_clock);
        if !is_empty {
            summary.emit(&*self.sink);
        }
        info!(
            receipts = summary.receipts().len(),
            failed = outcome.failed.len(),
            aborted = outcome.aborted,
            interrupted = outcome.interrupted,
            wall_clock_ms = summary.wall_clock.as_millis() as u64,
            "simulation finished"
        );

        Ok(SimulationReport {
            summary,
            failed: outcome.failed,
            interrupted: outcome.interrupted,
        })
    }
}

/// Runs a checkout simulation with the default cashier pool.
///
/// Returns the receipts sorted by customer name. Fails before any work
/// starts when `requested_concurrency` is below one.
pub async fn run(
    customers: Vec<Customer>,
    requested_concurrency: i64,
    mode: AssignmentMode,
    sink: LogSinkRef,
) -> Result<Vec<Receipt>> {
    let config = SimulationConfig::new(requested_concurrency, mode);
    let report = Simulation::with_sink(sink)
        .run(customers, &config, &CancellationToken::new())
        .await?;
    Ok(report.summary.into_receipts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;
    use crate::error::CheckoutError;
    use crate::infrastructure::memory_sink::MemorySink;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn customer(name: &str) -> Customer {
        Customer::new(
            name,
            vec![Product::new("Item", dec!(1000.0), 1, Duration::from_millis(200)).unwrap()],
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_sorted_receipts() {
        let sink = MemorySink::new();
        let receipts = run(
            vec![customer("Zoe"), customer("Ana"), customer("Luis")],
            3,
            AssignmentMode::RoundRobin,
            Arc::new(sink.clone()),
        )
        .await
        .unwrap();

        let names: Vec<&str> = receipts.iter().map(Receipt::customer_name).collect();
        assert_eq!(names, ["Ana", "Luis", "Zoe"]);
        // Input order decides the cashier, not the sorted position.
        let ids: Vec<u32> = receipts.iter().map(Receipt::cashier_id).collect();
        assert_eq!(ids, [2, 3, 1]);
        assert!(sink.contains("FINAL CHECKOUT SUMMARY"));
        assert!(sink.contains("GRAND TOTAL (all checkouts): $3000.00"));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_concurrency() {
        let sink = MemorySink::new();
        let result = run(
            vec![customer("Ana")],
            -2,
            AssignmentMode::Random,
            Arc::new(sink.clone()),
        )
        .await;
        assert!(matches!(result, Err(CheckoutError::ValidationError(_))));
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_run_empty() {
        let sink = MemorySink::new();
        let receipts = run(Vec::new(), 3, AssignmentMode::RoundRobin, Arc::new(sink.clone()))
            .await
            .unwrap();
        assert!(receipts.is_empty());
        assert_eq!(sink.lines(), ["No customers to process."]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_flags_interruption() {
        let sink = MemorySink::new();
        let simulation = Simulation::with_sink(Arc::new(sink.clone()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = simulation
            .run(vec![customer("Ana")], &SimulationConfig::default(), &cancel)
            .await
            .unwrap();

        assert!(report.interrupted);
        assert!(report.summary.receipts().is_empty());
        assert!(sink.contains("Simulation interrupted."));
    }
}
