//! IndicatorRow — one fully derived record per day of the price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day derived metrics, produced once per run and never mutated.
///
/// Every windowed field uses a **zero sentinel** while its window has not
/// yet accumulated (and for percentage fields whose denominator is exactly
/// zero). This preserves the legacy report contract: a zero here means
/// "not yet computed", which is indistinguishable from a true zero reading
/// (e.g. a day with zero volatility). Callers that need the distinction
/// must check the row index against the window sizes.
///
/// The band fields require 365 points up to and including the row; the
/// lookback fields (`dynamic_step`, `yoy_pct`) use a 364-day window. The
/// off-by-one is intentional and load-bearing: a 365-sample statistical
/// window vs a 364-day day-over-day comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub price: f64,
    /// Trailing 365-sample moving average.
    pub ma_365: f64,
    /// Trailing 365-sample population standard deviation (divide by 365).
    pub std_365: f64,
    /// `ma_365 + 2 * std_365`.
    pub ceiling: f64,
    /// Equals `ma_365`.
    pub floor: f64,
    /// Midpoint of ceiling and floor.
    pub median: f64,
    /// Day-over-day price change; zero for the first row.
    pub change: f64,
    /// Day-over-day change as a percentage of the previous price.
    pub move_pct: f64,
    /// Trailing 364-row mean of `change`, including the current row.
    pub dynamic_step: f64,
    /// Signed percentage distance of price from `median`.
    pub offset_pct: f64,
    /// Percentage change versus the price 364 days earlier.
    pub yoy_pct: f64,
}

impl IndicatorRow {
    /// A row carrying only the copied inputs, all derived fields unset.
    pub fn seed(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            ma_365: 0.0,
            std_365: 0.0,
            ceiling: 0.0,
            floor: 0.0,
            median: 0.0,
            change: 0.0,
            move_pct: 0.0,
            dynamic_step: 0.0,
            offset_pct: 0.0,
            yoy_pct: 0.0,
        }
    }

    /// True once the 365-sample band has been computed for this row.
    ///
    /// Zero-sentinel caveat: a genuine all-zero band would also report
    /// false, but a zero median cannot occur for positive price series.
    pub fn has_band(&self) -> bool {
        self.median != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_row_is_all_sentinel() {
        let row = IndicatorRow::seed(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 100.0);
        assert_eq!(row.price, 100.0);
        assert_eq!(row.ma_365, 0.0);
        assert_eq!(row.median, 0.0);
        assert!(!row.has_band());
    }

    #[test]
    fn row_serialization_roundtrip() {
        let mut row = IndicatorRow::seed(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 100.0);
        row.median = 95.0;
        row.offset_pct = 5.26;
        let json = serde_json::to_string(&row).unwrap();
        let deser: IndicatorRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, deser);
    }
}
