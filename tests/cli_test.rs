use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("checkout-sim"));
    cmd.arg("tests/fixtures/customers.csv").arg("--cashiers").arg("2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total customers: 3"))
        .stdout(predicate::str::contains("Simultaneous cashiers: 2"))
        .stdout(predicate::str::contains(
            "Customer: Ana | Cashier: Ana (ID: 2) | Items: 1 | Total: $7001.00",
        ))
        .stdout(predicate::str::contains(
            "Customer: Luis | Cashier: María (ID: 1) | Items: 2 | Total: $11400.00",
        ))
        .stdout(predicate::str::contains(
            "GRAND TOTAL (all checkouts): $30401.00",
        ))
        .stdout(predicate::str::contains("Simulation completed successfully."));

    Ok(())
}

#[test]
fn test_summary_is_sorted_by_customer() {
    let output = Command::new(cargo_bin!("checkout-sim"))
        .arg("tests/fixtures/customers.csv")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let customers: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.strip_prefix("Customer: "))
        .map(|l| l.split(" |").next().unwrap())
        .collect();
    assert_eq!(customers, ["Ana", "Carmen", "Luis"]);
}

#[test]
fn test_demo_basket_without_input() {
    let mut cmd = Command::new(cargo_bin!("checkout-sim"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total customers: 3"))
        .stdout(predicate::str::contains("GRAND TOTAL (all checkouts): $3000.00"));
}

#[test]
fn test_non_positive_cashiers_rejected() {
    for value in ["0", "-2"] {
        let mut cmd = Command::new(cargo_bin!("checkout-sim"));
        cmd.arg("tests/fixtures/customers.csv").arg("--cashiers").arg(value);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Requested concurrency"))
            .stdout(predicate::str::contains("STARTING SIMULATION").not());
    }
}

#[test]
fn test_malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.csv");
    common::write_csv(
        &path,
        &[
            ["Ana", "Rice", "1.5", "2", "1"],
            ["Ana", "Broken", "not_a_number", "1", "1"],
            ["Beto", "Zero", "3.0", "0", "1"],
            ["Beto", "Beans", "2.0", "1", "1"],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("checkout-sim"));
    cmd.arg(&path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading customer row"))
        .stdout(predicate::str::contains("GRAND TOTAL (all checkouts): $5.00"));
}

#[test]
fn test_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("receipts.json");

    let mut cmd = Command::new(cargo_bin!("checkout-sim"));
    cmd.arg("tests/fixtures/customers.csv")
        .arg("--random")
        .arg("--json")
        .arg(&json_path);
    cmd.assert().success();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["customer_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ana", "Carmen", "Luis"]);
}

#[test]
fn test_interactive_defaults() {
    let mut cmd = assert_cmd::Command::new(cargo_bin!("checkout-sim"));
    cmd.arg("--interactive")
        // concurrency 2, round-robin, then two customers of all-default answers
        .write_stdin("2\nn\n\n\n\n\n\nBeto\n1\nBread\n2500\n2\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Customer: Customer 1 | Cashier: María (ID: 1)",
        ))
        .stdout(predicate::str::contains(
            "Customer: Beto | Cashier: Ana (ID: 2) | Items: 1 | Total: $5000.00",
        ))
        .stdout(predicate::str::contains("GRAND TOTAL (all checkouts): $6000.00"));
}
