//! Ventas CLI binary.
//!
//! Analyzes tickers against a growth schedule, keeps the results in a JSON
//! store and lists them ranked by undervaluation.

mod cmd;
mod config;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use std::{path::PathBuf, process};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "ventas")]
#[command(about = "Target prices from revenue growth and historical price-to-sales", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON store path (overrides VENTAS_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze tickers and store the results
    Analyze {
        /// Ticker symbols
        #[arg(required = true, value_delimiter = ',')]
        tickers: Vec<String>,

        /// Yearly revenue growth in percent, e.g. "12,10,8"
        ///
        /// With --estimates an empty entry keeps the estimate for that year,
        /// e.g. ",,5" only overrides year three.
        #[arg(short, long, allow_hyphen_values = true)]
        growth: Option<String>,

        /// Derive growth from analyst revenue estimates
        #[arg(short, long)]
        estimates: bool,
    },

    /// List stored valuations, most undervalued first
    List {
        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Records per page
        #[arg(long, default_value = "20")]
        page_size: usize,

        /// Jump to the page containing this ticker
        #[arg(short, long, conflicts_with = "page")]
        ticker: Option<String>,
    },

    /// Re-analyze every stored ticker with its stored growth rates
    Refresh,

    /// Delete a stored valuation
    Delete {
        /// Ticker symbol
        ticker: String,
    },

    /// Delete all stored valuations
    Clear,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_store(cli.store);
    init_tracing(&config)?;

    match cli.command {
        Commands::Analyze {
            tickers,
            growth,
            estimates,
        } => {
            cmd::analyze::run_analyze(&config, &tickers, growth.as_deref(), estimates).await?;
        }
        Commands::List {
            page,
            page_size,
            ticker,
        } => {
            cmd::list::list_records(&config, page, page_size, ticker.as_deref())?;
        }
        Commands::Refresh => {
            cmd::refresh::refresh_records(&config).await?;
        }
        Commands::Delete { ticker } => {
            cmd::remove::delete_record(&config, &ticker)?;
        }
        Commands::Clear => {
            cmd::remove::clear_records(&config)?;
        }
    }

    Ok(())
}

/// Log to stderr so tables on stdout stay clean.
fn init_tracing(config: &Config) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
