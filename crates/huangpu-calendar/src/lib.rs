//! Trading-calendar core for the huangpu A-share data toolkit.
//!
//! This crate owns the ordered sequence of A-share trading sessions and
//! answers the temporal queries every fetch job is built on:
//!
//! - [`TradingCalendar`] - typed, binary-searched session sequence
//! - [`CalendarService`] - fail-soft `YYYY-MM-DD` string boundary
//! - [`load_snapshot`] / [`store_snapshot`] - CSV snapshot persistence with
//!   atomic replacement

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/huangpu-data/huangpu/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod calendar;
mod service;
mod snapshot;

pub use calendar::TradingCalendar;
pub use service::CalendarService;
pub use snapshot::{CalendarError, SNAPSHOT_COLUMN, load_snapshot, store_snapshot};
