//! Trailing band statistics — moving average, population std dev, and the
//! ceiling/median/floor band.
//!
//! For every index with at least `ma_window` points up to and including it,
//! the row gets the trailing mean and population standard deviation
//! (divide by the window size, not N-1 — intentional, for reproducibility
//! of the legacy output). Earlier rows keep the zero sentinel.
//!
//! Complexity is O(n·w): naive re-summation per index. Daily granularity
//! and a series in the low thousands make this a non-issue.

use crate::domain::{IndicatorRow, PricePoint};

/// Compute the band fields for the full series, one row per point.
///
/// Rows come back in input order. `ceiling = ma + 2σ`, `floor = ma`,
/// `median = (ceiling + floor) / 2`; all three (plus `ma_365`/`std_365`)
/// stay at the zero sentinel until the window has accumulated.
pub fn compute_bands(points: &[PricePoint], ma_window: usize) -> Vec<IndicatorRow> {
    debug_assert!(ma_window >= 2, "ma_window must be >= 2");
    debug_assert!(
        points.windows(2).all(|w| w[0].date < w[1].date),
        "price series must be strictly ascending by date"
    );

    let mut rows: Vec<IndicatorRow> = points
        .iter()
        .map(|p| IndicatorRow::seed(p.date, p.price))
        .collect();

    for i in (ma_window - 1)..points.len() {
        let window = &points[(i + 1 - ma_window)..=i];

        let sum: f64 = window.iter().map(|p| p.price).sum();
        let mean = sum / ma_window as f64;

        let sum_sq_diff: f64 = window
            .iter()
            .map(|p| {
                let diff = p.price - mean;
                diff * diff
            })
            .sum();
        let std_dev = (sum_sq_diff / ma_window as f64).sqrt();

        let row = &mut rows[i];
        row.ma_365 = mean;
        row.std_365 = std_dev;
        row.ceiling = mean + 2.0 * std_dev;
        row.floor = mean;
        row.median = (row.ceiling + row.floor) / 2.0;
    }

    rows
}
