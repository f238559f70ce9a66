//! Application layer: running a checkout simulation end to end.
//!
//! `Simulation` is the entry point. It hands customers to the `Dispatcher`,
//! which runs one `Checkout` per customer on a bounded set of tokio tasks,
//! and then turns the collected receipts into a sorted `Summary`.

pub mod checkout;
pub mod dispatcher;
pub mod report;
pub mod simulation;
