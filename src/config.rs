use crate::domain::assignment::AssignmentMode;
use crate::error::{CheckoutError, Result};
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: i64 = 3;
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(60);

/// Knobs for a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Cashiers the caller wants working at once. Kept signed so that
    /// non-positive requests reach validation instead of being coerced.
    pub requested_concurrency: i64,
    pub mode: AssignmentMode,
    /// How long in-flight checkouts get to stop after an interruption
    /// before they are aborted.
    pub shutdown_grace: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            requested_concurrency: DEFAULT_CONCURRENCY,
            mode: AssignmentMode::default(),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl SimulationConfig {
    pub fn new(requested_concurrency: i64, mode: AssignmentMode) -> Self {
        Self {
            requested_concurrency,
            mode,
            ..Self::default()
        }
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Number of cashiers that actually work: `min(requested, pool_size)`.
    pub fn effective_concurrency(&self, pool_size: usize) -> Result<usize> {
        if self.requested_concurrency < 1 {
            return Err(CheckoutError::ValidationError(format!(
                "Requested concurrency must be at least 1, got {}",
                self.requested_concurrency
            )));
        }
        let requested = usize::try_from(self.requested_concurrency).unwrap_or(usize::MAX);
        Ok(requested.min(pool_size))
    }
}
