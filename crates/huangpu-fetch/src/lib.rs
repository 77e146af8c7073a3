//! Provider client for the huangpu A-share data toolkit.
//!
//! This crate talks to a tushare-style JSON API and normalizes every
//! response into a [`huangpu_types::DataTable`]:
//!
//! - [`ProviderClient`] - pooled, retrying HTTP client
//! - [`ApiRequest`] / [`ApiResponse`] - the request/response envelope
//! - [`trading_days`], [`daily_bars`], [`daily_valuation`], [`money_flow`] -
//!   typed helpers per dataset

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/huangpu-data/huangpu/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod client;
mod datasets;

pub use api::{ApiData, ApiRequest, ApiResponse};
pub use client::{DEFAULT_BASE_URL, ProviderClient, ProviderConfig, ProviderError};
pub use datasets::{DEFAULT_EXCHANGE, daily_bars, daily_valuation, money_flow, trading_days};
