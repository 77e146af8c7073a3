//! huangpu CLI - A-share market data acquisition toolkit.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use huangpu_lib::DataRoot;

mod commands;

use commands::pull::PullDataset;

#[derive(Parser)]
#[command(name = "huangpu")]
#[command(about = "A-share market data acquisition toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Data directory holding the snapshot and per-day CSV files
    #[arg(long, default_value = "Database", global = true)]
    data_root: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the trading calendar
    Calendar {
        #[command(subcommand)]
        query: CalendarQuery,
    },

    /// Regenerate the trading-day snapshot from the provider
    Refresh {
        /// Exchange whose calendar to fetch
        #[arg(long, default_value = "SSE")]
        exchange: String,

        /// First calendar date to cover (YYYY-MM-DD)
        #[arg(long, default_value = "1990-12-19")]
        start: String,

        /// Last calendar date to cover (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Provider access token. Defaults to $TUSHARE_TOKEN.
        #[arg(long)]
        token: Option<String>,
    },

    /// Pull per-day dataset files over a trading-date range
    Pull {
        /// Dataset to pull
        dataset: PullDataset,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// End date (YYYY-MM-DD). Defaults to the latest trading day.
        #[arg(short, long)]
        end: Option<String>,

        /// Re-fetch dates whose file already exists
        #[arg(long)]
        overwrite: bool,

        /// Provider access token. Defaults to $TUSHARE_TOKEN.
        #[arg(long)]
        token: Option<String>,
    },
}

/// Trading-calendar queries.
#[derive(Subcommand)]
enum CalendarQuery {
    /// List trading dates from a start date
    Range {
        /// Start date (YYYY-MM-DD), inclusive
        start: String,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(short, long)]
        end: Option<String>,

        /// Maximum number of dates, earliest first
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Show the latest trading date as of a date (default today)
    Latest {
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show the trading date N sessions before an anchor
    Prev {
        /// Anchor date (YYYY-MM-DD); rolls back if not a session
        anchor: String,

        /// Sessions to step back from the anchor
        #[arg(short, long, default_value = "1")]
        steps: usize,
    },

    /// Show the trading date N sessions after an anchor
    Next {
        /// Anchor date (YYYY-MM-DD); rolls forward if not a session
        anchor: String,

        /// Sessions to step forward from the anchor
        #[arg(short, long, default_value = "1")]
        steps: usize,
    },

    /// Check whether a date is a trading day
    Check {
        /// Date to check (YYYY-MM-DD)
        date: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let root = DataRoot::new(&cli.data_root);

    match command {
        Commands::Calendar { query } => commands::calendar::run(&root, query),
        Commands::Refresh {
            exchange,
            start,
            end,
            token,
        } => commands::refresh::refresh(&root, &exchange, &start, end.as_deref(), token).await,
        Commands::Pull {
            dataset,
            start,
            end,
            overwrite,
            token,
        } => {
            commands::pull::pull(
                &root,
                dataset,
                &start,
                end.as_deref(),
                overwrite,
                token,
                cli.quiet,
            )
            .await
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
