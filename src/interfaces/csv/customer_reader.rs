use crate::domain::product::{Customer, Product};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

/// One CSV row: a single product line on a customer's cart.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartRow {
    pub customer: String,
    pub product: String,
    pub price: Decimal,
    pub quantity: u32,
    pub unit_ms: u64,
}

impl CartRow {
    fn into_product(self) -> Result<(String, Product)> {
        let product = Product::new(
            self.product,
            self.price,
            self.quantity,
            Duration::from_millis(self.unit_ms),
        )?;
        Ok((self.customer, product))
    }
}

/// Reads customers from a CSV source with the header
/// `customer,product,price,quantity,unit_ms`.
pub struct CustomerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CustomerReader<R> {
    /// Creates a new `CustomerReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows.
    pub fn rows(self) -> impl Iterator<Item = Result<CartRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }

    /// Groups rows into customers.
    ///
    /// Customers appear in the order their name is first seen and keep their
    /// products in row order. Rows that fail to parse or validate are passed
    /// to `on_error` and skipped.
    pub fn customers(self, mut on_error: impl FnMut(CheckoutError)) -> Vec<Customer> {
        let mut order: Vec<(String, Vec<Product>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in self.rows() {
            match row.and_then(CartRow::into_product) {
                Ok((name, product)) => match index.get(&name) {
                    Some(&i) => order[i].1.push(product),
                    None => {
                        index.insert(name.clone(), order.len());
                        order.push((name, vec![product]));
                    }
                },
                Err(e) => on_error(e),
            }
        }

        order
            .into_iter()
            .map(|(name, products)| Customer::new(name, products))
            .collect()
    }
}
