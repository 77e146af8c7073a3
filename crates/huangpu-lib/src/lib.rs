//! A-share market-data acquisition toolkit built around a trading-calendar
//! core.
//!
//! This is a facade crate that re-exports functionality from the huangpu
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use huangpu_lib::prelude::*;
//!
//! let root = DataRoot::new("Database");
//! let calendar = CalendarService::open(root.snapshot_path());
//!
//! // Per-date loop every puller is built on. A degraded calendar yields an
//! // empty date list, so a broken snapshot skips the run instead of
//! // crashing it.
//! for date in calendar.trading_dates("2025-01-01", Some("2025-01-31"), None) {
//!     println!("would fetch {date}");
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/huangpu-data/huangpu/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use huangpu_types::*;

// Re-export the trading-calendar core
pub use huangpu_calendar::{
    CalendarError, CalendarService, SNAPSHOT_COLUMN, TradingCalendar, load_snapshot,
    store_snapshot,
};

// Re-export the provider client
pub use huangpu_fetch::{
    ApiData, ApiRequest, ApiResponse, DEFAULT_BASE_URL, DEFAULT_EXCHANGE, ProviderClient,
    ProviderConfig, ProviderError, daily_bars, daily_valuation, money_flow, trading_days,
};

// Re-export the data store
pub use huangpu_store::{DataRoot, Dataset, SNAPSHOT_FILE, StoreError, write_table};

/// Prelude module for convenient imports.
///
/// ```
/// use huangpu_lib::prelude::*;
/// ```
pub mod prelude {
    pub use huangpu_types::{DataTable, HuangpuError, Result, format_date, parse_date};

    pub use huangpu_calendar::{CalendarService, TradingCalendar};

    pub use huangpu_fetch::{
        ProviderClient, ProviderConfig, daily_bars, daily_valuation, money_flow, trading_days,
    };

    pub use huangpu_store::{DataRoot, Dataset, write_table};
}
