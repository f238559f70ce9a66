use crate::config::SimulationConfig;
use crate::domain::assignment::assign;
use crate::domain::cashier::CashierPool;
use crate::domain::ports::{CheckoutRef, LogSinkRef};
use crate::domain::product::Customer;
use crate::domain::receipt::Receipt;
use crate::error::{CheckoutError, Result};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, error, warn};

type UnitOutput = (String, Result<Receipt>);

/// What came back from one dispatch.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Receipts in completion order.
    pub receipts: Vec<Receipt>,
    /// Customers whose checkout failed.
    pub failed: Vec<String>,
    /// Units aborted after the shutdown grace period ran out.
    pub aborted: usize,
    pub interrupted: bool,
    pub wall_clock: Duration,
}

/// Runs one checkout per customer with at most `k` of them live at once.
///
/// A checkout only gets spawned once it holds a permit from a semaphore of
/// size `k`; the remaining customers wait in submission order. All results
/// flow back through a single `JoinSet`, which is the only place receipts
/// are collected.
pub struct Dispatcher<'a> {
    pool: &'a CashierPool,
    checkout: CheckoutRef,
    sink: LogSinkRef,
}

impl<'a> Dispatcher<'a> {
    pub fn new(pool: &'a CashierPool, checkout: CheckoutRef, sink: LogSinkRef) -> Self {
        Self {
            pool,
            checkout,
            sink,
        }
    }

    /// Validates the config, assigns cashiers and runs every checkout.
    ///
    /// Fails only on validation, before anything is spawned. Unit failures
    /// and interruptions are logged and reflected in the outcome instead.
    pub async fn dispatch(
        &self,
        customers: Vec<Customer>,
        config: &SimulationConfig,
        cancel: &CancellationToken,
    ) -> Result<DispatchOutcome> {
        let k = config.effective_concurrency(self.pool.len())?;

        if customers.is_empty() {
            self.sink.emit("No customers to process.");
            return Ok(DispatchOutcome::default());
        }

        self.sink.emit("========== STARTING SIMULATION ==========");
        self.sink.emit(&format!("Total customers: {}", customers.len()));
        self.sink.emit(&format!("Available cashiers: {}", self.pool.len()));
        self.sink.emit(&format!("Simultaneous cashiers: {k}"));
        self.sink.emit(&format!("Assignment: {}", config.mode));
        self.sink.emit("==========================================");

        let started = Instant::now();
        let plan = assign(customers.len(), self.pool.active(k), config.mode);
        let semaphore = Arc::new(Semaphore::new(k));
        let mut units: JoinSet<UnitOutput> = JoinSet::new();
        let mut outcome = DispatchOutcome::default();

        for (customer, cashier) in customers.into_iter().zip(plan) {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    outcome.interrupted = true;
                    break;
                }
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            debug!(customer = customer.name(), cashier = cashier.id, "spawning checkout");
            let checkout = self.checkout.clone();
            let sink = self.sink.clone();
            let cancel = cancel.clone();
            let cashier = cashier.clone();
            units.spawn(async move {
                let _permit = permit;
                let name = customer.name().to_string();
                // Run the checkout in its own task so a panic stays contained
                // and still reports which customer it belonged to.
                let unit = AbortOnDropHandle::new(tokio::spawn(async move {
                    checkout
                        .checkout(&cashier, &customer, &*sink, &cancel)
                        .await
                }));
                let result = match unit.await {
                    Ok(result) => result,
                    Err(e) => Err(CheckoutError::UnitFailed(join_error_detail(e))),
                };
                (name, result)
            });
        }

        if !outcome.interrupted {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        outcome.interrupted = true;
                        break;
                    }
                    joined = units.join_next() => match joined {
                        Some(joined) => self.record(joined, &mut outcome),
                        None => break,
                    },
                }
            }
        }

        if outcome.interrupted {
            self.shutdown(&mut units, config.shutdown_grace, &mut outcome)
                .await;
        }

        outcome.wall_clock = started.elapsed();
        Ok(outcome)
    }

    /// Lets in-flight checkouts observe the cancellation for up to `grace`,
    /// then aborts whatever is left.
    async fn shutdown(
        &self,
        units: &mut JoinSet<UnitOutput>,
        grace: Duration,
        outcome: &mut DispatchOutcome,
    ) {
        self.sink.emit("Simulation interrupted.");
        warn!(in_flight = units.len(), "simulation interrupted, draining checkouts");

        let drain = async {
            while let Some(joined) = units.join_next().await {
                self.record(joined, outcome);
            }
        };
        if timeout(grace, drain).await.is_ok() {
            return;
        }

        self.sink.emit(&format!(
            "Shutdown grace period of {} ms exceeded; aborting {} checkouts.",
            grace.as_millis(),
            units.len()
        ));
        warn!(remaining = units.len(), "grace period exceeded, aborting checkouts");
        units.abort_all();
        while let Some(joined) = units.join_next().await {
            self.record(joined, outcome);
        }
    }

    fn record(
        &self,
        joined: std::result::Result<UnitOutput, JoinError>,
        outcome: &mut DispatchOutcome,
    ) {
        match joined {
            Ok((_, Ok(receipt))) => outcome.receipts.push(receipt),
            Ok((name, Err(CheckoutError::Cancelled))) => {
                debug!(customer = %name, "checkout discarded after cancellation");
            }
            Ok((name, Err(e))) => {
                error!(customer = %name, error = %e, "checkout failed");
                self.sink.emit(&format!("Error processing checkout for customer {name}: {e}"));
                outcome.failed.push(name);
            }
            Err(e) if e.is_cancelled() => {
                outcome.aborted += 1;
            }
            Err(e) => {
                error!(error = %e, "checkout task failed");
                self.sink.emit(&format!("Error processing checkout: {e}"));
            }
        }
    }
}

fn join_error_detail(e: JoinError) -> String {
    if e.is_panic() {
        panic_message(e.into_panic())
    } else {
        e.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}
