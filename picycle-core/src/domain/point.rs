//! PricePoint and Kline — the raw market data units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the price series: the engine's only input.
///
/// The series is ordered ascending by date with no duplicate dates.
/// The store guarantees that; the engine only `debug_assert`s it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Full daily candle as fetched from the exchange and kept in the store.
///
/// `price` is the midpoint round2((high + low) / 2), except for the most
/// recent stored date where the store re-points it at `close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub date: NaiveDate,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub trades: u64,
}

impl Kline {
    /// Midpoint price rounded to cents, the series value for this candle.
    pub fn midpoint_price(high: f64, low: f64) -> f64 {
        (((high + low) / 2.0) * 100.0).round() / 100.0
    }

    /// True if any price field is non-finite (rejected before storage).
    pub fn is_malformed(&self) -> bool {
        !(self.price.is_finite()
            && self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    pub fn as_point(&self) -> PricePoint {
        PricePoint::new(self.date, self.price)
    }
}
