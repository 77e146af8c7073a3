//! Per-date dataset pull command.
//!
//! Resolves the trading dates in the requested window via the calendar
//! core, then fetches one table per date and writes one CSV file per date.
//! A failed date is logged and skipped so a multi-day backfill keeps going.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use huangpu_lib::prelude::*;

/// Dataset selector for the pull command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PullDataset {
    /// Daily OHLCV price bars
    Price,
    /// Daily valuation metrics
    Valuation,
    /// Daily money-flow breakdown
    Moneyflow,
}

impl PullDataset {
    const fn dataset(self) -> Dataset {
        match self {
            Self::Price => Dataset::StockPrice,
            Self::Valuation => Dataset::StockValuation,
            Self::Moneyflow => Dataset::MoneyFlow,
        }
    }
}

/// Pull one dataset across a trading-date window.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn pull(
    root: &DataRoot,
    dataset: PullDataset,
    start: &str,
    end: Option<&str>,
    overwrite: bool,
    token: Option<String>,
    quiet: bool,
) -> Result<()> {
    let token = super::resolve_token(token)?;

    let calendar = CalendarService::open(root.snapshot_path());
    if let Some(error) = calendar.load_error() {
        bail!("{error}; run `huangpu refresh` before pulling data");
    }

    let end = match end {
        Some(end) => end.to_string(),
        None => calendar
            .latest_trading_date()
            .context("snapshot has no session on or before today")?,
    };
    let dates = calendar.trading_dates(start, Some(&end), None);
    if dates.is_empty() {
        println!("No trading dates between {start} and {end}.");
        return Ok(());
    }

    let client = ProviderClient::with_token(token)?;
    let target = dataset.dataset();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(dates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} dates ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} {} -> {}", target, dates[0], end));
        pb
    };

    let mut written = 0usize;
    let mut kept = 0usize;
    let mut empty = 0usize;
    let mut failed = 0usize;

    for date_str in &dates {
        let date: NaiveDate = parse_date(date_str)
            .with_context(|| format!("calendar returned an unparseable date: {date_str}"))?;
        let path = root.daily_file(target, date);

        if !overwrite && path.exists() {
            kept += 1;
            progress.inc(1);
            continue;
        }

        match fetch(&client, dataset, date).await {
            Ok(table) if table.is_empty() => {
                warn!(date = %date_str, "provider returned no rows; skipping date");
                empty += 1;
            }
            Ok(table) => {
                write_table(&path, &table)
                    .with_context(|| format!("writing {}", path.display()))?;
                written += 1;
            }
            Err(error) => {
                // One bad day must not abort the whole backfill.
                warn!(date = %date_str, %error, "fetch failed; skipping date");
                failed += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    println!(
        "Wrote {written} files to {} ({kept} existing kept, {empty} empty, {failed} failed)",
        root.dataset_dir(target).display()
    );
    Ok(())
}

async fn fetch(
    client: &ProviderClient,
    dataset: PullDataset,
    date: NaiveDate,
) -> huangpu_lib::Result<DataTable> {
    match dataset {
        PullDataset::Price => daily_bars(client, date).await,
        PullDataset::Valuation => daily_valuation(client, date).await,
        PullDataset::Moneyflow => money_flow(client, date).await,
    }
}
