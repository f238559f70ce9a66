#![allow(dead_code)]

use checkout_sim::domain::product::{Customer, Product};
use rust_decimal::Decimal;
use std::path::Path;
use std::time::Duration;

pub fn customer(name: &str, lines: &[(Decimal, u32, u64)]) -> Customer {
    let products = lines
        .iter()
        .enumerate()
        .map(|(i, (price, quantity, unit_ms))| {
            Product::new(
                format!("Product {}", i + 1),
                *price,
                *quantity,
                Duration::from_millis(*unit_ms),
            )
            .expect("valid product")
        })
        .collect();
    Customer::new(name, products)
}

pub fn write_csv(path: &Path, rows: &[[&str; 5]]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["customer", "product", "price", "quantity", "unit_ms"])?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
