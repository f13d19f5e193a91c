//! Binance daily-kline provider.
//!
//! Fetches the most recent daily candles from the spot klines endpoint.
//! The kline payload is a JSON array of heterogeneous arrays (numbers and
//! numeric strings mixed), so parsing goes through `serde_json::Value`
//! with structured errors on every shape assumption. API errors arrive as
//! an object with a `msg` field instead of an array.

use super::provider::DataError;
use crate::domain::Kline;
use chrono::DateTime;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.binance.us";
const DAILY_LIMIT: u32 = 500;

/// Blocking Binance spot-market kline fetcher.
pub struct BinanceProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BinanceProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point at a different host (binance.com, or a test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn klines_url(&self, symbol: &str) -> String {
        format!(
            "{}/api/v3/klines?symbol={symbol}&interval=1d&limit={DAILY_LIMIT}",
            self.base_url
        )
    }

    /// Fetch the most recent daily klines for a symbol, oldest first.
    pub fn fetch_daily(&self, symbol: &str) -> Result<Vec<Kline>, DataError> {
        let body = self
            .client
            .get(self.klines_url(symbol))
            .send()?
            .text()?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| DataError::ResponseFormat(format!("not JSON: {e}")))?;
        parse_klines(&payload)
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the klines payload. Malformed candles (non-finite prices) are
/// rejected here, upstream of the store.
pub fn parse_klines(payload: &Value) -> Result<Vec<Kline>, DataError> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(map) => {
            let msg = map
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error object");
            return Err(DataError::Api(msg.to_string()));
        }
        other => {
            return Err(DataError::ResponseFormat(format!(
                "expected kline array, got {other}"
            )))
        }
    };

    let mut klines = Vec::with_capacity(entries.len());
    for entry in entries {
        let fields = entry
            .as_array()
            .ok_or_else(|| DataError::ResponseFormat("kline entry is not an array".into()))?;
        if fields.len() < 9 {
            return Err(DataError::ResponseFormat(format!(
                "kline entry has {} fields, expected >= 9",
                fields.len()
            )));
        }

        let open_time_ms = fields[0]
            .as_i64()
            .ok_or_else(|| DataError::ResponseFormat("open time is not an integer".into()))?;
        let date = DateTime::from_timestamp_millis(open_time_ms)
            .ok_or_else(|| {
                DataError::ResponseFormat(format!("open time out of range: {open_time_ms}"))
            })?
            .date_naive();

        let open = numeric_field(&fields[1], "open")?;
        let high = numeric_field(&fields[2], "high")?;
        let low = numeric_field(&fields[3], "low")?;
        let close = numeric_field(&fields[4], "close")?;
        let volume = numeric_field(&fields[5], "volume")?;
        let trades = fields[8]
            .as_u64()
            .ok_or_else(|| DataError::ResponseFormat("trade count is not an integer".into()))?;

        let kline = Kline {
            date,
            price: Kline::midpoint_price(high, low),
            open,
            high,
            low,
            close,
            volume,
            trades,
        };
        if kline.is_malformed() {
            return Err(DataError::ResponseFormat(format!(
                "non-finite price in kline for {date}"
            )));
        }
        klines.push(kline);
    }
    Ok(klines)
}

/// Kline prices arrive as numeric strings; accept plain numbers too.
fn numeric_field(value: &Value, name: &str) -> Result<f64, DataError> {
    match value {
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| DataError::ResponseFormat(format!("{name} is not numeric: {s:?}"))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DataError::ResponseFormat(format!("{name} is not representable"))),
        other => Err(DataError::ResponseFormat(format!(
            "{name} has unexpected type: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_entry(open_time_ms: i64, high: &str, low: &str) -> Value {
        json!([
            open_time_ms,
            "100.0",   // open
            high,      // high
            low,       // low
            "103.0",   // close
            "5000.0",  // volume
            0,         // close time
            "0",       // quote asset volume
            1234,      // number of trades
            "0", "0", "0"
        ])
    }

    // 2024-01-02T00:00:00Z
    const JAN_2_2024_MS: i64 = 1_704_153_600_000;

    #[test]
    fn parses_kline_array() {
        let payload = json!([sample_entry(JAN_2_2024_MS, "105.0", "98.0")]);
        let klines = parse_klines(&payload).unwrap();
        assert_eq!(klines.len(), 1);
        let k = &klines[0];
        assert_eq!(k.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(k.high, 105.0);
        assert_eq!(k.low, 98.0);
        assert_eq!(k.price, 101.5); // round2((105 + 98) / 2)
        assert_eq!(k.trades, 1234);
    }

    #[test]
    fn api_error_object_is_surfaced() {
        let payload = json!({"code": -1121, "msg": "Invalid symbol."});
        let err = parse_klines(&payload).unwrap_err();
        match err {
            DataError::Api(msg) => assert_eq!(msg, "Invalid symbol."),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn short_entry_is_rejected() {
        let payload = json!([[JAN_2_2024_MS, "1", "2"]]);
        assert!(matches!(
            parse_klines(&payload),
            Err(DataError::ResponseFormat(_))
        ));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let payload = json!([sample_entry(JAN_2_2024_MS, "not-a-price", "98.0")]);
        assert!(matches!(
            parse_klines(&payload),
            Err(DataError::ResponseFormat(_))
        ));
    }

    #[test]
    fn nan_price_is_rejected() {
        let payload = json!([sample_entry(JAN_2_2024_MS, "nan", "98.0")]);
        assert!(matches!(
            parse_klines(&payload),
            Err(DataError::ResponseFormat(_))
        ));
    }
}
