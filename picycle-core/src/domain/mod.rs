//! Domain types: price points, raw klines, and the per-day indicator row.

pub mod point;
pub mod row;

pub use point::{Kline, PricePoint};
pub use row::IndicatorRow;
