//! Raw Alpha Vantage payloads and their conversion into core types.
//!
//! Alpha Vantage sends most numbers as strings and omits or blanks fields
//! freely, so every raw field is optional and parsed leniently.

use std::collections::BTreeMap;
use std::str::FromStr;

use option_scan_core::{OptionContract, OptionType};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AlphaVantageError, Result};

/// Keys Alpha Vantage uses for error documents returned with HTTP 200.
const ERROR_KEYS: [&str; 3] = ["Error Message", "Information", "Note"];

/// Fails if `value` is an Alpha Vantage error document.
pub(crate) fn check_error_document(value: &Value) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return Ok(());
    };
    for key in ERROR_KEYS {
        if let Some(message) = obj.get(key).and_then(Value::as_str) {
            return Err(AlphaVantageError::api(200, format!("{key}: {message}")));
        }
    }
    Ok(())
}

/// Parses a decimal from a JSON string or number. Blank and `"None"` are absent.
pub(crate) fn parse_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("none") {
                return None;
            }
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()
        }
        _ => None,
    }
}

/// Parses a finite float from a JSON string or number.
pub(crate) fn parse_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

// =============================================================================
// GLOBAL_QUOTE
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawGlobalQuoteResponse {
    #[serde(rename = "Global Quote - DATA DELAYED BY 15 MINUTES")]
    delayed: Option<Map<String, Value>>,
    #[serde(rename = "Global Quote")]
    realtime: Option<Map<String, Value>>,
}

impl RawGlobalQuoteResponse {
    /// The `05. price` field, preferring the delayed block.
    pub(crate) fn price(&self) -> Option<Decimal> {
        self.delayed
            .as_ref()
            .or(self.realtime.as_ref())
            .and_then(|quote| parse_decimal(quote.get("05. price")))
    }
}

// =============================================================================
// TIME_SERIES_DAILY
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDailySeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, Map<String, Value>>>,
}

impl RawDailySeriesResponse {
    /// Close of the most recent trading day.
    ///
    /// Keys are `YYYY-MM-DD`, so the greatest key is the latest day.
    pub(crate) fn latest_close(&self) -> Option<Decimal> {
        let (_, bar) = self.series.as_ref()?.iter().next_back()?;
        parse_decimal(bar.get("4. close"))
    }
}

// =============================================================================
// HISTORICAL_OPTIONS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOptionsResponse {
    #[serde(default)]
    data: Vec<RawOptionContract>,
}

impl RawOptionsResponse {
    /// Converts the chain, dropping contracts that could never be selected.
    pub(crate) fn into_contracts(self) -> Vec<OptionContract> {
        let total = self.data.len();
        let contracts: Vec<OptionContract> = self
            .data
            .into_iter()
            .filter_map(RawOptionContract::into_contract)
            .collect();
        if contracts.len() < total {
            tracing::debug!(
                dropped = total - contracts.len(),
                kept = contracts.len(),
                "Dropped option contracts without type, expiration or strike"
            );
        }
        contracts
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOptionContract {
    expiration: Option<String>,
    #[serde(rename = "type")]
    option_type: Option<String>,
    strike: Option<Value>,
    bid: Option<Value>,
    ask: Option<Value>,
    delta: Option<Value>,
}

impl RawOptionContract {
    fn into_contract(self) -> Option<OptionContract> {
        let option_type = OptionType::from_str(self.option_type.as_deref()?).ok()?;
        let strike = parse_decimal(self.strike.as_ref())?;
        Some(OptionContract {
            expiration: self.expiration?,
            option_type,
            delta: parse_f64(self.delta.as_ref()),
            bid: parse_decimal(self.bid.as_ref()),
            ask: parse_decimal(self.ask.as_ref()),
            strike,
        })
    }
}

// =============================================================================
// EARNINGS_CALENDAR (CSV)
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEarningsRecord {
    #[serde(rename = "reportDate", default)]
    report_date: String,
}

/// Earliest report date in an earnings calendar CSV.
///
/// Dates that parse are compared chronologically; if none parse, the first
/// non-blank value is returned as-is.
pub(crate) fn earliest_report_date(csv_body: &str) -> Result<Option<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_body.as_bytes());

    let mut earliest: Option<chrono::NaiveDate> = None;
    let mut first_raw: Option<String> = None;
    for record in reader.deserialize::<RawEarningsRecord>() {
        let record = record?;
        if record.report_date.is_empty() {
            continue;
        }
        match chrono::NaiveDate::parse_from_str(&record.report_date, "%Y-%m-%d") {
            Ok(date) => earliest = Some(earliest.map_or(date, |e| e.min(date))),
            Err(_) => {
                first_raw.get_or_insert(record.report_date);
            }
        }
    }

    Ok(earliest
        .map(|d| d.format("%Y-%m-%d").to_string())
        .or(first_raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_error_document_detection() {
        let err = check_error_document(&json!({"Error Message": "Invalid API call."})).unwrap_err();
        assert!(err.to_string().contains("Invalid API call"));

        let err = check_error_document(&json!({"Information": "rate limit is 25 requests per day"}))
            .unwrap_err();
        assert!(err.to_string().contains("25 requests"));

        assert!(check_error_document(&json!({"data": []})).is_ok());
        assert!(check_error_document(&json!([1, 2])).is_ok());
    }

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal(Some(&json!("1.25"))), Some(dec!(1.25)));
        assert_eq!(parse_decimal(Some(&json!(" 95.00 "))), Some(dec!(95)));
        assert_eq!(parse_decimal(Some(&json!(2.5))), Some(dec!(2.5)));
        assert_eq!(parse_decimal(Some(&json!(100))), Some(dec!(100)));
        assert_eq!(parse_decimal(Some(&json!(""))), None);
        assert_eq!(parse_decimal(Some(&json!("None"))), None);
        assert_eq!(parse_decimal(Some(&json!("n/a"))), None);
        assert_eq!(parse_decimal(Some(&Value::Null)), None);
        assert_eq!(parse_decimal(None), None);
    }

    #[test]
    fn test_parse_f64_variants() {
        assert_eq!(parse_f64(Some(&json!("-0.25"))), Some(-0.25));
        assert_eq!(parse_f64(Some(&json!(-0.18))), Some(-0.18));
        assert_eq!(parse_f64(Some(&json!("NaN"))), None);
        assert_eq!(parse_f64(Some(&json!("abc"))), None);
        assert_eq!(parse_f64(None), None);
    }

    #[test]
    fn test_global_quote_prefers_delayed_block() {
        let raw: RawGlobalQuoteResponse = serde_json::from_value(json!({
            "Global Quote - DATA DELAYED BY 15 MINUTES": {
                "01. symbol": "AMD",
                "05. price": "172.4000",
                "08. previous close": "170.1000"
            }
        }))
        .unwrap();
        assert_eq!(raw.price(), Some(dec!(172.40)));
    }

    #[test]
    fn test_global_quote_realtime_fallback_and_empty() {
        let raw: RawGlobalQuoteResponse =
            serde_json::from_value(json!({"Global Quote": {"05. price": "10.5"}})).unwrap();
        assert_eq!(raw.price(), Some(dec!(10.5)));

        let raw: RawGlobalQuoteResponse =
            serde_json::from_value(json!({"Global Quote": {}})).unwrap();
        assert_eq!(raw.price(), None);
    }

    #[test]
    fn test_daily_series_latest_close() {
        let raw: RawDailySeriesResponse = serde_json::from_value(json!({
            "Meta Data": {"2. Symbol": "AMD"},
            "Time Series (Daily)": {
                "2025-08-01": {"4. close": "171.9500"},
                "2025-07-31": {"4. close": "176.3100"},
                "2025-07-30": {"4. close": "179.5100"}
            }
        }))
        .unwrap();
        assert_eq!(raw.latest_close(), Some(dec!(171.95)));
    }

    #[test]
    fn test_daily_series_missing() {
        let raw: RawDailySeriesResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(raw.latest_close(), None);
    }

    #[test]
    fn test_options_conversion() {
        let raw: RawOptionsResponse = serde_json::from_value(json!({
            "endpoint": "Historical Options",
            "message": "success",
            "data": [
                {
                    "contractID": "AMD250815P00095000",
                    "symbol": "AMD",
                    "expiration": "2025-08-15",
                    "strike": "95.00",
                    "type": "put",
                    "bid": "0.80",
                    "ask": "1.00",
                    "delta": "-0.25"
                },
                {
                    "contractID": "AMD250815C00200000",
                    "expiration": "2025-08-15",
                    "strike": "200.00",
                    "type": "call",
                    "bid": "",
                    "ask": "0.05",
                    "delta": "0.02"
                },
                {"expiration": "2025-08-15", "type": "put", "bid": "1", "ask": "1.1"},
                {"expiration": "2025-08-15", "strike": "90", "type": "straddle"},
                {"strike": "90", "type": "put"}
            ]
        }))
        .unwrap();

        let contracts = raw.into_contracts();
        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].strike, dec!(95));
        assert_eq!(contracts[0].option_type, OptionType::Put);
        assert_eq!(contracts[0].delta, Some(-0.25));
        assert_eq!(contracts[0].bid, Some(dec!(0.80)));
        assert_eq!(contracts[1].option_type, OptionType::Call);
        assert_eq!(contracts[1].bid, None);
    }

    #[test]
    fn test_options_missing_data_is_empty_chain() {
        let raw: RawOptionsResponse =
            serde_json::from_value(json!({"message": "No data for symbol"})).unwrap();
        assert!(raw.into_contracts().is_empty());
    }

    #[test]
    fn test_earliest_report_date() {
        let body = "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n\
                    AMD,Advanced Micro Devices Inc,2025-11-04,2025-09-30,1.16,USD\n\
                    AMD,Advanced Micro Devices Inc,2025-08-05,2025-06-30,0.48,USD\n";
        assert_eq!(
            earliest_report_date(body).unwrap().as_deref(),
            Some("2025-08-05")
        );
    }

    #[test]
    fn test_earliest_report_date_header_only() {
        let body = "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n";
        assert_eq!(earliest_report_date(body).unwrap(), None);
    }

    #[test]
    fn test_earliest_report_date_unparseable_kept_raw() {
        let body = "symbol,reportDate\nAMD,TBD\n";
        assert_eq!(earliest_report_date(body).unwrap().as_deref(), Some("TBD"));
    }
}
