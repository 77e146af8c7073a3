//! CLI command implementations.

pub(crate) mod calendar;
pub(crate) mod pull;
pub(crate) mod refresh;

use anyhow::{Context, Result};

/// Resolves the provider token from the flag or `TUSHARE_TOKEN`.
pub(crate) fn resolve_token(flag: Option<String>) -> Result<String> {
    flag.filter(|t| !t.is_empty())
        .or_else(|| std::env::var("TUSHARE_TOKEN").ok().filter(|t| !t.is_empty()))
        .context("no provider token: pass --token or set TUSHARE_TOKEN")
}
