//! Typed fetch helpers for the datasets huangpu pulls.
//!
//! Each helper wraps one provider endpoint, pins its field list, and hands
//! back either a normalized [`DataTable`] (one row per security for the
//! requested date) or, for the trading calendar, a parsed date list.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use huangpu_types::{DataTable, HuangpuError, Result, parse_provider_date, provider_date};

use crate::ProviderClient;

/// Exchange used for the trading calendar unless the caller says otherwise.
pub const DEFAULT_EXCHANGE: &str = "SSE";

const TRADE_CAL_FIELDS: &str = "cal_date,is_open";

const DAILY_FIELDS: &str =
    "ts_code,trade_date,open,high,low,close,pre_close,change,pct_chg,vol,amount";

const DAILY_BASIC_FIELDS: &str = "ts_code,trade_date,close,turnover_rate,pe,pe_ttm,pb,\
                                  ps,ps_ttm,dv_ratio,dv_ttm,total_share,float_share,total_mv,circ_mv";

const MONEYFLOW_FIELDS: &str = "ts_code,trade_date,buy_sm_vol,buy_sm_amount,sell_sm_vol,\
                                sell_sm_amount,buy_md_vol,buy_md_amount,sell_md_vol,sell_md_amount,\
                                buy_lg_vol,buy_lg_amount,sell_lg_vol,sell_lg_amount,buy_elg_vol,\
                                buy_elg_amount,sell_elg_vol,sell_elg_amount,net_mf_vol,net_mf_amount";

/// Fetches the open sessions of `exchange` in `[start, end]`, ascending.
///
/// The provider's calendar lists every calendar day with an `is_open` flag;
/// only the open days survive.
///
/// # Errors
///
/// Returns an error if the call fails or the response is missing the
/// calendar columns.
pub async fn trading_days(
    client: &ProviderClient,
    exchange: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let mut params = BTreeMap::new();
    params.insert("exchange".to_string(), exchange.to_string());
    params.insert("start_date".to_string(), provider_date(start));
    params.insert("end_date".to_string(), provider_date(end));

    let table = client.call("trade_cal", &params, TRADE_CAL_FIELDS).await?;
    parse_trading_days(&table)
}

/// Extracts the open sessions from a `trade_cal` table.
fn parse_trading_days(table: &DataTable) -> Result<Vec<NaiveDate>> {
    let cal_idx = table
        .column_index("cal_date")
        .ok_or_else(|| HuangpuError::Parse("trade_cal response missing 'cal_date'".to_string()))?;
    let open_idx = table
        .column_index("is_open")
        .ok_or_else(|| HuangpuError::Parse("trade_cal response missing 'is_open'".to_string()))?;

    let mut days = Vec::new();
    for row in table.rows() {
        if !row.get(open_idx).is_some_and(is_open_flag) {
            continue;
        }
        let cell = row.get(cal_idx).and_then(Value::as_str).ok_or_else(|| {
            HuangpuError::Parse("trade_cal row carries a non-string 'cal_date'".to_string())
        })?;
        days.push(parse_provider_date(cell)?);
    }
    days.sort_unstable();
    Ok(days)
}

/// The provider emits `is_open` as a number or a string depending on the
/// endpoint version.
fn is_open_flag(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => s == "1",
        _ => false,
    }
}

/// Daily OHLCV bars for every listed security on `date`.
///
/// # Errors
///
/// Returns an error if the provider call fails.
pub async fn daily_bars(client: &ProviderClient, date: NaiveDate) -> Result<DataTable> {
    fetch_by_date(client, "daily", DAILY_FIELDS, date).await
}

/// Daily valuation metrics (PE, PB, turnover, market cap) for every listed
/// security on `date`.
///
/// # Errors
///
/// Returns an error if the provider call fails.
pub async fn daily_valuation(client: &ProviderClient, date: NaiveDate) -> Result<DataTable> {
    fetch_by_date(client, "daily_basic", DAILY_BASIC_FIELDS, date).await
}

/// Daily money-flow breakdown for every listed security on `date`.
///
/// # Errors
///
/// Returns an error if the provider call fails.
pub async fn money_flow(client: &ProviderClient, date: NaiveDate) -> Result<DataTable> {
    fetch_by_date(client, "moneyflow", MONEYFLOW_FIELDS, date).await
}

async fn fetch_by_date(
    client: &ProviderClient,
    api_name: &str,
    fields: &str,
    date: NaiveDate,
) -> Result<DataTable> {
    let mut params = BTreeMap::new();
    params.insert("trade_date".to_string(), provider_date(date));
    Ok(client.call(api_name, &params, fields).await?)
}
