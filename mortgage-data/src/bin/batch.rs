use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mortgage_data::{BreakdownWriter, ScenarioLoader};
use tracing_subscriber::EnvFilter;

/// Compute monthly payment breakdowns for every scenario in a CSV file.
///
/// The CSV file should have the following columns:
/// - name: Optional scenario label
/// - home_price: Purchase price of the home
/// - down_payment: Amount paid up front
/// - interest_rate: Annual interest rate in percent (e.g., 6.5)
/// - loan_term: Loan term in years
/// - property_tax, insurance: Optional annual amounts
/// - hoa: Optional monthly HOA fee
#[derive(Parser, Debug)]
#[command(name = "mortgage-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing loan scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write the breakdown CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let scenarios = ScenarioLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    tracing::info!(count = scenarios.len(), "computing breakdowns");

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = BreakdownWriter::new(out);
    let written = writer
        .write_scenarios(&scenarios)
        .context("Failed to write breakdowns")?;

    if let Some(path) = &args.output {
        eprintln!("Wrote {} breakdowns to {}", written, path.display());
    }

    Ok(())
}
