//! Series source trait and structured data-layer errors.

use crate::domain::PricePoint;
use thiserror::Error;

/// Structured error types for data operations.
///
/// None of these originate inside the engine — computation is total over
/// well-formed input. They cover the fetch and store boundaries only.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("exchange API error: {0}")]
    Api(String),

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("store I/O error: {0}")]
    StoreIo(#[from] std::io::Error),

    #[error("store CSV error: {0}")]
    StoreCsv(#[from] csv::Error),

    #[error("malformed stored record: {0}")]
    MalformedRecord(String),
}

/// An ordered supply of `(date, price)` points — the engine's input seam.
///
/// Implementations guarantee ascending dates with no duplicates and
/// finite prices; the engine does not re-validate.
pub trait SeriesSource {
    fn load_series(&self) -> Result<Vec<PricePoint>, DataError>;
}
