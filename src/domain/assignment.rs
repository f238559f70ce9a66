use super::cashier::Cashier;
use rand::Rng;
use std::fmt;

/// How customers are distributed over the active cashiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentMode {
    /// Customer `i` goes to active cashier `i mod k`.
    #[default]
    RoundRobin,
    /// Each customer draws an active cashier uniformly at random.
    Random,
}

impl fmt::Display for AssignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentMode::RoundRobin => write!(f, "round-robin"),
            AssignmentMode::Random => write!(f, "random"),
        }
    }
}

/// Picks a cashier index in `0..active.len()` for each of `count` customers.
///
/// Random draws are intentionally unseeded. Returns an empty plan when there
/// are no customers or no active cashiers.
pub fn assign_indices(count: usize, k: usize, mode: AssignmentMode) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    match mode {
        AssignmentMode::RoundRobin => (0..count).map(|i| i % k).collect(),
        AssignmentMode::Random => {
            let mut rng = rand::thread_rng();
            (0..count).map(|_| rng.gen_range(0..k)).collect()
        }
    }
}

/// Resolves the assignment plan to the cashiers themselves.
pub fn assign<'a>(count: usize, active: &'a [Cashier], mode: AssignmentMode) -> Vec<&'a Cashier> {
    assign_indices(count, active.len(), mode)
        .into_iter()
        .map(|i| &active[i])
        .collect()
}
