//! Request and response model for the tushare-style JSON API.
//!
//! Every endpoint takes the same envelope: a POST body naming the API, the
//! access token, a string-valued parameter map, and a comma-separated field
//! list. Every response carries a status code, a message, and a
//! fields-plus-items table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use huangpu_types::DataTable;

use crate::ProviderError;

/// A provider API call body.
#[derive(Debug, Serialize)]
pub struct ApiRequest<'a> {
    /// Endpoint name, e.g. `trade_cal` or `daily`.
    pub api_name: &'a str,
    /// Access token.
    pub token: &'a str,
    /// Endpoint parameters; ordered map so request bodies are stable.
    pub params: &'a BTreeMap<String, String>,
    /// Comma-separated list of columns to return.
    pub fields: &'a str,
}

/// Envelope every provider response arrives in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    /// Provider-assigned request identifier.
    #[serde(default)]
    pub request_id: String,
    /// Status code; zero means success.
    pub code: i64,
    /// Error message, if any.
    #[serde(default)]
    pub msg: Option<String>,
    /// Tabular payload, absent on errors.
    #[serde(default)]
    pub data: Option<ApiData>,
}

/// Tabular payload of a successful response.
#[derive(Debug, Deserialize)]
pub struct ApiData {
    /// Ordered column names.
    pub fields: Vec<String>,
    /// Data rows, one JSON array per row.
    pub items: Vec<Vec<Value>>,
    /// True if the provider truncated the result.
    #[serde(default)]
    pub has_more: bool,
}

impl ApiResponse {
    /// Converts the envelope into a normalized table.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Api`] for a non-zero status code and
    /// [`ProviderError::MissingData`] when a success response carries no
    /// payload.
    pub fn into_table(self) -> Result<DataTable, ProviderError> {
        if self.code != 0 {
            return Err(ProviderError::Api {
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            });
        }
        let data = self.data.ok_or(ProviderError::MissingData)?;
        Ok(DataTable::new(data.fields, data.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response_into_table() {
        let body = json!({
            "request_id": "abc",
            "code": 0,
            "msg": null,
            "data": {
                "fields": ["cal_date", "is_open"],
                "items": [["20250102", 1], ["20250104", 0]],
                "has_more": false
            }
        });
        let response: ApiResponse = serde_json::from_value(body).unwrap();
        let table = response.into_table().unwrap();
        assert_eq!(table.fields(), &["cal_date", "is_open"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.str_cell(0, "cal_date"), Some("20250102"));
    }

    #[test]
    fn test_error_code_maps_to_api_error() {
        let body = json!({"request_id": "abc", "code": 40203, "msg": "token invalid"});
        let response: ApiResponse = serde_json::from_value(body).unwrap();
        match response.into_table() {
            Err(ProviderError::Api { code, msg }) => {
                assert_eq!(code, 40203);
                assert_eq!(msg, "token invalid");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_success_without_payload_is_missing_data() {
        let body = json!({"code": 0});
        let response: ApiResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            response.into_table(),
            Err(ProviderError::MissingData)
        ));
    }

    #[test]
    fn test_request_serialization_shape() {
        let mut params = BTreeMap::new();
        params.insert("trade_date".to_string(), "20250106".to_string());
        let request = ApiRequest {
            api_name: "daily",
            token: "tok",
            params: &params,
            fields: "ts_code,close",
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["api_name"], "daily");
        assert_eq!(body["params"]["trade_date"], "20250106");
        assert_eq!(body["fields"], "ts_code,close");
    }
}
