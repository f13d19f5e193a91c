//! Data layer: exchange fetch and the CSV-backed kline store.
//!
//! Everything the engine treats as an external collaborator lives here —
//! ordering, de-duplication, and validation of the price series are this
//! layer's responsibility, so the engine can assume a well-formed input.

pub mod binance;
pub mod provider;
pub mod store;

pub use binance::BinanceProvider;
pub use provider::{DataError, SeriesSource};
pub use store::KlineStore;
