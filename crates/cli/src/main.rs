//! Roofquote CLI - Proposal pricing and data tools.
//!
//! # Usage
//!
//! ```bash
//! # Quote a stored proposal
//! rq-cli quote QmT9xWv2 --snapshot store.json
//!
//! # Price a job size against the configured tiers
//! rq-cli price --squares 18.5
//!
//! # Monthly payment for a loan, with the full schedule
//! rq-cli payment --principal 12500 --rate 5.99 --years 10 --schedule
//!
//! # Check stored data for integrity issues
//! rq-cli check
//! ```
//!
//! # Commands
//!
//! - `quote` - Quote a stored proposal across all tiers and loan products
//! - `price` - Quote a job size without a proposal
//! - `payment` - Loan payment calculator
//! - `check` - Report integrity issues in stored data (non-zero exit if any)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "rq-cli")]
#[command(author, version, about = "Roofing proposal pricing tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a stored proposal
    Quote {
        /// Proposal document id
        id: String,

        /// Document snapshot (JSON or YAML); overrides `ROOFQUOTE_SNAPSHOT`
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Price a job size against the configured tiers
    Price {
        /// Job size in squares (1 square = 100 sq ft)
        #[arg(short = 'q', long)]
        squares: String,

        /// Document snapshot (JSON or YAML); overrides `ROOFQUOTE_SNAPSHOT`
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Calculate a fixed monthly loan payment
    Payment {
        /// Amount financed in dollars
        #[arg(short, long)]
        principal: f64,

        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,

        /// Loan term in years
        #[arg(short, long)]
        years: u32,

        /// Include the payment-by-payment schedule
        #[arg(long)]
        schedule: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check stored data for integrity issues
    Check {
        /// Document snapshot (JSON or YAML); overrides `ROOFQUOTE_SNAPSHOT`
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roofquote_core=info,rq_cli=info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote { id, snapshot, json } => {
            commands::quote::run(&id, &config.snapshot(snapshot), json).await?;
        }
        Commands::Price {
            squares,
            snapshot,
            json,
        } => {
            commands::price::run(&squares, &config.snapshot(snapshot), json).await?;
        }
        Commands::Payment {
            principal,
            rate,
            years,
            schedule,
            json,
        } => commands::payment::run(principal, rate, years, schedule, json)?,
        Commands::Check { snapshot } => {
            commands::check::run(&config.snapshot(snapshot)).await?;
        }
    }
    Ok(())
}
