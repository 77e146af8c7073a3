//! Core types for the huangpu A-share market-data toolkit.
//!
//! This crate provides the fundamental data structures used throughout
//! huangpu:
//!
//! - [`DataTable`] - Normalized column-named rows returned by the provider
//! - [`HuangpuError`] - Workspace error taxonomy root
//! - [`parse_date`] / [`format_date`] - Canonical `YYYY-MM-DD` boundary form

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/huangpu-data/huangpu/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date;
mod error;
mod table;

pub use date::{
    DATE_FORMAT, DateParseError, PROVIDER_DATE_FORMAT, format_date, parse_date,
    parse_provider_date, provider_date,
};
pub use error::{HuangpuError, Result};
pub use table::DataTable;
