use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mortgage_core::LoanField;
use mortgage_ui::{Settings, StdoutIntake, WizardOutcome, app, logging};
use tracing::{debug, warn};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Mortgage payment calculator and loan application.
#[derive(Debug, Parser)]
#[command(name = "mortgage", version, about, long_about = None)]
struct Cli {
    /// TOML settings file with calculator defaults and logging options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `mortgage_core=debug`). Overrides the
    /// settings file; `RUST_LOG` overrides both.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the monthly payment for a loan.
    Calc(CalcArgs),

    /// Fill in a loan application step by step.
    Apply,
}

/// Calculator inputs. Anything left out comes from the settings file.
#[derive(Debug, Args)]
struct CalcArgs {
    /// Purchase price of the home.
    #[arg(long)]
    home_price: Option<String>,

    /// Amount paid up front.
    #[arg(long)]
    down_payment: Option<String>,

    /// Annual interest rate in percent, e.g. 6.5.
    #[arg(long)]
    rate: Option<String>,

    /// Loan term in years.
    #[arg(long)]
    term: Option<String>,

    /// Annual property tax.
    #[arg(long)]
    property_tax: Option<String>,

    /// Annual home insurance.
    #[arg(long)]
    insurance: Option<String>,

    /// Monthly HOA fees.
    #[arg(long)]
    hoa: Option<String>,

    /// Print the breakdown as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl CalcArgs {
    fn overrides(&self) -> [(LoanField, Option<&str>); 7] {
        [
            (LoanField::HomePrice, self.home_price.as_deref()),
            (LoanField::DownPayment, self.down_payment.as_deref()),
            (LoanField::InterestRate, self.rate.as_deref()),
            (LoanField::LoanTerm, self.term.as_deref()),
            (LoanField::PropertyTax, self.property_tax.as_deref()),
            (LoanField::Insurance, self.insurance.as_deref()),
            (LoanField::Hoa, self.hoa.as_deref()),
        ]
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    logging::init_logging(level);
    if !settings.logging.console {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(settings.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    debug!(command = ?cli.command, "starting");

    match cli.command {
        Command::Calc(args) => {
            let calculator = app::build_calculator(settings.calculator, args.overrides());
            let coerced = calculator.coerced_fields();
            if !coerced.is_empty() {
                warn!(count = coerced.len(), "some inputs were treated as zero");
            }
            println!("{}", app::render_calc(&calculator, args.json)?);
        }
        Command::Apply => {
            let intake = StdoutIntake::stdout();
            let outcome = app::run_wizard(io::stdin().lock(), io::stdout(), &intake)
                .await
                .context("Loan application failed")?;
            match outcome {
                WizardOutcome::Submitted(_) => {}
                WizardOutcome::Quit => println!("Application cancelled."),
                WizardOutcome::Abandoned => println!("\nInput ended; application not submitted."),
            }
        }
    }

    Ok(())
}
