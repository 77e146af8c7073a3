//! Snapshot refresh command.
//!
//! The out-of-band regeneration job: fetch the authoritative trading-day
//! list from the provider and atomically replace the snapshot file. Run
//! roughly once a year, or whenever the exchange publishes next year's
//! calendar.

use anyhow::{Context, Result, ensure};
use huangpu_lib::prelude::*;
use huangpu_lib::store_snapshot;

/// Fetch the exchange calendar and rewrite the snapshot.
pub(crate) async fn refresh(
    root: &DataRoot,
    exchange: &str,
    start_str: &str,
    end_str: Option<&str>,
    token: Option<String>,
) -> Result<()> {
    let token = super::resolve_token(token)?;

    let start =
        parse_date(start_str).with_context(|| format!("invalid start date: {start_str}"))?;
    let end = match end_str {
        Some(s) => parse_date(s).with_context(|| format!("invalid end date: {s}"))?,
        None => chrono::Local::now().date_naive(),
    };
    ensure!(start <= end, "start {start} is after end {end}");

    let client = ProviderClient::with_token(token)?;
    let days = trading_days(&client, exchange, start, end)
        .await
        .with_context(|| format!("fetching the {exchange} trading calendar"))?;
    ensure!(
        !days.is_empty(),
        "provider returned no trading days for {exchange} in {start} to {end}"
    );

    let calendar = TradingCalendar::from_dates(days);
    let path = root.snapshot_path();
    store_snapshot(&path, &calendar)?;

    println!(
        "Wrote {} trading days ({} to {}) to {}",
        calendar.len(),
        format_date(calendar.first().unwrap_or(start)),
        format_date(calendar.last().unwrap_or(end)),
        path.display()
    );
    Ok(())
}
