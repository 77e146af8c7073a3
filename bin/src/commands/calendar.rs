//! Calendar query commands.
//!
//! The service degrades silently by design so batch pullers keep running;
//! the CLI is an interactive surface, so a missing snapshot is reported as
//! an error with a hint instead.

use anyhow::{Result, bail};
use huangpu_lib::prelude::*;

use crate::CalendarQuery;

/// Run one calendar query against the snapshot under the data root.
pub(crate) fn run(root: &DataRoot, query: CalendarQuery) -> Result<()> {
    let service = CalendarService::open(root.snapshot_path());
    if let Some(error) = service.load_error() {
        bail!("{error}; run `huangpu refresh` to generate the snapshot");
    }

    match query {
        CalendarQuery::Range { start, end, count } => {
            let dates = service.trading_dates(&start, end.as_deref(), count);
            for date in &dates {
                println!("{date}");
            }
            println!("\nTotal: {} trading dates", dates.len());
        }
        CalendarQuery::Latest { as_of } => {
            let latest = match as_of {
                Some(as_of) => service.latest_trading_date_as_of(&as_of),
                None => service.latest_trading_date(),
            };
            print_session(latest);
        }
        CalendarQuery::Prev { anchor, steps } => {
            print_session(service.previous_trading_date(&anchor, steps));
        }
        CalendarQuery::Next { anchor, steps } => {
            print_session(service.next_trading_date(&anchor, steps));
        }
        CalendarQuery::Check { date } => {
            if service.is_trading_date(&date) {
                println!("{date} is a trading day");
            } else {
                println!("{date} is not a trading day");
            }
        }
    }
    Ok(())
}

fn print_session(result: Option<String>) {
    match result {
        Some(date) => println!("{date}"),
        None => println!("no trading date in the snapshot window"),
    }
}
