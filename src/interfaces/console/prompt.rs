use crate::domain::product::{Customer, Product};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PRICE: Decimal = dec!(1000.0);
pub const DEFAULT_UNIT_DURATION: Duration = Duration::from_millis(200);
/// Larger product counts are treated as invalid answers.
pub const MAX_PRODUCTS_PER_CUSTOMER: usize = 1000;

/// Interactive data entry for a simulation run.
///
/// Blank or unparsable answers fall back to defaults instead of failing:
/// a blank name becomes "Customer i" or "Product j", counts and quantities
/// become 1 (so does a product count above `MAX_PRODUCTS_PER_CUSTOMER`), and a non-positive or invalid price becomes 1000.0. Every
/// product scans at 200 ms per unit. End of input is treated as a blank
/// answer.
pub struct ConsolePrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks how many customers are served at once. Negative answers are
    /// returned as-is so the caller can reject them.
    pub fn ask_concurrency(&mut self, default: i64) -> io::Result<i64> {
        let answer = self.ask(&format!(
            "How many customers will be processed simultaneously? (default: {default}): "
        ))?;
        Ok(parse_or(&answer, default))
    }

    pub fn ask_random(&mut self) -> io::Result<bool> {
        let answer = self.ask("Assign cashiers randomly? (y/n, default: n): ")?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    /// Registers `count` customers, one after another.
    pub fn collect_customers(&mut self, count: usize) -> io::Result<Vec<Customer>> {
        let mut customers = Vec::new();
        for i in 1..=count {
            writeln!(self.output, "--- Customer {i} of {count} ---")?;
            let name = self.ask(&format!("Name of customer {i}: "))?;
            let name = if name.is_empty() {
                format!("Customer {i}")
            } else {
                name
            };

            let answer = self.ask(&format!("How many products will {name} buy? "))?;
            let product_count = match parse_or::<usize>(&answer, 1) {
                n @ 1..=MAX_PRODUCTS_PER_CUSTOMER => n,
                _ => 1,
            };

            let mut products = Vec::with_capacity(product_count);
            for j in 1..=product_count {
                products.push(self.collect_product(j, product_count)?);
            }

            writeln!(
                self.output,
                "Customer {name} registered with {product_count} products."
            )?;
            customers.push(Customer::new(name, products));
        }
        Ok(customers)
    }

    fn collect_product(&mut self, j: usize, count: usize) -> io::Result<Product> {
        writeln!(self.output, "  --- Product {j} of {count} ---")?;
        let name = self.ask("  Product name: ")?;
        let name = if name.is_empty() {
            format!("Product {j}")
        } else {
            name
        };

        let answer = self.ask("  Unit price: ")?;
        let price = match Decimal::from_str(&answer) {
            Ok(price) if price > Decimal::ZERO => price,
            _ => DEFAULT_PRICE,
        };

        let answer = self.ask("  Quantity: ")?;
        let quantity = match parse_or::<u32>(&answer, 1) {
            0 => 1,
            q => q,
        };

        Product::new(name, price, quantity, DEFAULT_UNIT_DURATION)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

fn parse_or<T: FromStr>(answer: &str, default: T) -> T {
    answer.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prompt(script: &str) -> ConsolePrompt<&[u8], Vec<u8>> {
        ConsolePrompt::new(script.as_bytes(), Vec::new())
    }

    #[test]
    fn test_collects_answers() {
        let mut p = prompt("Ana\n2\nRice\n3500.5\n2\nBeans\n2800\n1\n");
        let customers = p.collect_customers(1).unwrap();

        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name(), "Ana");
        let products = customers[0].products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].unit_price(), dec!(3500.5));
        assert_eq!(products[0].quantity(), 2);
        assert_eq!(products[1].name(), "Beans");
        assert_eq!(products[1].unit_duration(), Duration::from_millis(200));
    }

    #[test]
    fn test_blank_and_invalid_answers_use_defaults() {
        let mut p = prompt("\n\n\nabc\n-3\n");
        let customers = p.collect_customers(1).unwrap();

        let customer = &customers[0];
        assert_eq!(customer.name(), "Customer 1");
        assert_eq!(customer.products().len(), 1);
        let product = &customer.products()[0];
        assert_eq!(product.name(), "Product 1");
        assert_eq!(product.unit_price(), dec!(1000.0));
        assert_eq!(product.quantity(), 1);
    }

    #[test]
    fn test_out_of_range_product_count_uses_default() {
        let mut p = prompt("Ana\n99999999999999999\n");
        let customers = p.collect_customers(1).unwrap();
        assert_eq!(customers[0].name(), "Ana");
        assert_eq!(customers[0].products().len(), 1);
        assert_eq!(customers[0].products()[0].name(), "Product 1");

        let mut p = prompt("Luis\n0\n");
        let customers = p.collect_customers(1).unwrap();
        assert_eq!(customers[0].products().len(), 1);
    }

    #[test]
    fn test_end_of_input_uses_defaults() {
        let mut p = prompt("");
        let customers = p.collect_customers(2).unwrap();
        let names: Vec<&str> = customers.iter().map(Customer::name).collect();
        assert_eq!(names, ["Customer 1", "Customer 2"]);
    }

    #[test]
    fn test_ask_concurrency_and_mode() {
        let mut p = prompt("\ny\n");
        assert_eq!(p.ask_concurrency(3).unwrap(), 3);
        assert!(p.ask_random().unwrap());

        let mut p = prompt("-1\nno\n");
        assert_eq!(p.ask_concurrency(3).unwrap(), -1);
        assert!(!p.ask_random().unwrap());
    }
}
