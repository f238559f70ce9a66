use checkout_sim::application::checkout::SimulatedCheckout;
use checkout_sim::application::simulation::Simulation;
use checkout_sim::config::{DEFAULT_CONCURRENCY, SimulationConfig};
use checkout_sim::domain::assignment::AssignmentMode;
use checkout_sim::domain::cashier::CashierPool;
use checkout_sim::domain::ports::LogSinkRef;
use checkout_sim::domain::product::{Customer, Product};
use checkout_sim::infrastructure::console_sink::{StdoutSink, TracingSink};
use checkout_sim::interfaces::console::prompt::{
    ConsolePrompt, DEFAULT_PRICE, DEFAULT_UNIT_DURATION,
};
use checkout_sim::interfaces::csv::customer_reader::CustomerReader;
use checkout_sim::interfaces::json::receipt_writer::ReceiptWriter;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Plain progress lines on stdout
    Text,
    /// Progress lines as tracing events on stderr
    Tracing,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Customers CSV file (customer,product,price,quantity,unit_ms).
    /// Without it a small demo basket is used.
    input: Option<PathBuf>,

    /// Number of cashiers working simultaneously
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY, allow_negative_numbers = true)]
    cashiers: i64,

    /// Assign cashiers at random instead of round-robin
    #[arg(long)]
    random: bool,

    /// Register customers interactively on the console
    #[arg(long, conflicts_with = "input")]
    interactive: bool,

    /// Also write the sorted receipts as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Seconds in-flight checkouts get to stop after Ctrl-C
    #[arg(long, default_value_t = 60)]
    grace_secs: u64,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let sink: LogSinkRef = match cli.log_format {
        LogFormat::Text => Arc::new(StdoutSink),
        LogFormat::Tracing => Arc::new(TracingSink),
    };
    let pool = CashierPool::default();

    let mut config = SimulationConfig::new(cli.cashiers, mode(cli.random))
        .with_shutdown_grace(Duration::from_secs(cli.grace_secs));

    let customers = if cli.interactive {
        let stdin = io::stdin();
        let mut prompt = ConsolePrompt::new(stdin.lock(), io::stdout());
        config.requested_concurrency = prompt.ask_concurrency(cli.cashiers).into_diagnostic()?;
        if !cli.random {
            config.mode = mode(prompt.ask_random().into_diagnostic()?);
        }
        config.effective_concurrency(pool.len()).into_diagnostic()?;
        let count = usize::try_from(config.requested_concurrency).into_diagnostic()?;
        prompt.collect_customers(count).into_diagnostic()?
    } else {
        config.effective_concurrency(pool.len()).into_diagnostic()?;
        match &cli.input {
            Some(path) => {
                let file = File::open(path).into_diagnostic()?;
                CustomerReader::new(file)
                    .customers(|e| eprintln!("Error reading customer row: {}", e))
            }
            None => demo_customers().into_diagnostic()?,
        }
    };

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let simulation = Simulation::new(pool, Arc::new(SimulatedCheckout), sink.clone());
    let report = simulation
        .run(customers, &config, &cancel)
        .await
        .into_diagnostic()?;

    if let Some(path) = cli.json {
        let file = File::create(path).into_diagnostic()?;
        ReceiptWriter::new(file)
            .write_receipts(report.summary.receipts())
            .into_diagnostic()?;
    }

    if report.interrupted {
        sink.emit("Simulation interrupted before all checkouts finished.");
    } else if report.failed.is_empty() {
        sink.emit("Simulation completed successfully.");
    } else {
        sink.emit(&format!(
            "Simulation completed with {} failed checkouts.",
            report.failed.len()
        ));
    }

    Ok(())
}

fn mode(random: bool) -> AssignmentMode {
    if random {
        AssignmentMode::Random
    } else {
        AssignmentMode::RoundRobin
    }
}

fn demo_customers() -> checkout_sim::error::Result<Vec<Customer>> {
    ["Ana", "Luis", "Marta"]
        .into_iter()
        .map(|name| {
            let product = Product::new("Groceries", DEFAULT_PRICE, 1, DEFAULT_UNIT_DURATION)?;
            Ok(Customer::new(name, vec![product]))
        })
        .collect()
}
