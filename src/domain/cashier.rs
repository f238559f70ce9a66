use crate::error::{CheckoutError, Result};
use std::collections::HashSet;

/// Smallest pool the simulation is willing to run with.
pub const MIN_POOL_SIZE: usize = 5;

/// A named processing identity that serves customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cashier {
    pub id: u32,
    pub name: String,
}

impl Cashier {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The fixed, ordered set of cashiers available to a run.
///
/// Built once at startup and only ever read afterwards, so it is shared by
/// reference without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashierPool {
    cashiers: Vec<Cashier>,
}

impl CashierPool {
    pub fn new(cashiers: Vec<Cashier>) -> Result<Self> {
        if cashiers.len() < MIN_POOL_SIZE {
            return Err(CheckoutError::ValidationError(format!(
                "Cashier pool needs at least {MIN_POOL_SIZE} cashiers, got {}",
                cashiers.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = cashiers.iter().find(|c| !seen.insert(c.id)) {
            return Err(CheckoutError::ValidationError(format!(
                "Duplicate cashier id {}",
                dup.id
            )));
        }
        Ok(Self { cashiers })
    }

    pub fn len(&self) -> usize {
        self.cashiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cashiers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cashier> {
        self.cashiers.get(index)
    }

    /// The first `k` cashiers in pool order.
    pub fn active(&self, k: usize) -> &[Cashier] {
        &self.cashiers[..k.min(self.cashiers.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cashier> {
        self.cashiers.iter()
    }
}

impl Default for CashierPool {
    fn default() -> Self {
        Self {
            cashiers: vec![
                Cashier::new(1, "María"),
                Cashier::new(2, "Ana"),
                Cashier::new(3, "Laura"),
                Cashier::new(4, "Carmen"),
                Cashier::new(5, "Sofía"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool() {
        let pool = CashierPool::default();
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.get(0).unwrap().name, "María");
        let ids: Vec<u32> = pool.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_active_is_clamped() {
        let pool = CashierPool::default();
        assert_eq!(pool.active(2).len(), 2);
        assert_eq!(pool.active(50).len(), 5);
    }

    #[test]
    fn test_pool_too_small() {
        let result = CashierPool::new(vec![Cashier::new(1, "Solo")]);
        assert!(matches!(result, Err(CheckoutError::ValidationError(_))));
    }

    #[test]
    fn test_pool_duplicate_ids() {
        let cashiers = (1..=5).map(|i| Cashier::new(i.min(4), format!("C{i}"))).collect();
        assert!(matches!(
            CashierPool::new(cashiers),
            Err(CheckoutError::ValidationError(_))
        ));
    }
}
