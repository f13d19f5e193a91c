//! The rolling-statistics indicator engine.
//!
//! Batch pipeline over the full in-memory price series: band statistics
//! first, then the cumulative derived fields. Single-threaded, synchronous,
//! no state survives a run — computing twice over the same input yields
//! identical row sequences.

pub mod derived;
pub mod window;
pub mod window_stats;

pub use window::ReportWindow;

use crate::config::IndicatorConfig;
use crate::domain::{IndicatorRow, PricePoint};

/// Orchestrates the two engine passes under one config.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// Transform the ordered price series into the full indicator table.
    ///
    /// The caller (the store) guarantees ascending, duplicate-free dates
    /// and finite prices; this only `debug_assert`s the ordering. Output
    /// rows preserve input order, one row per point.
    pub fn compute(&self, points: &[PricePoint]) -> Vec<IndicatorRow> {
        debug_assert!(
            points.iter().all(|p| p.price.is_finite()),
            "price series must be finite"
        );

        let mut rows = window_stats::compute_bands(points, self.config.ma_window);
        derived::fill_derived(&mut rows, self.config.lookback_window);
        rows
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{assert_approx, make_points, EPSILON};
    use super::*;

    #[test]
    fn compute_runs_both_passes() {
        let mut prices = vec![100.0; 365];
        prices.push(110.0);
        let engine = IndicatorEngine::default();
        let rows = engine.compute(&make_points(&prices));

        let last = rows.last().unwrap();
        assert!(last.has_band());
        assert_approx(last.change, 10.0, EPSILON);
        assert_approx(last.move_pct, 10.0, EPSILON);
        assert!(last.offset_pct != 0.0);
    }

    #[test]
    fn compute_is_idempotent() {
        let prices: Vec<f64> = (0..400).map(|i| 100.0 + (i % 17) as f64).collect();
        let points = make_points(&prices);
        let engine = IndicatorEngine::default();
        assert_eq!(engine.compute(&points), engine.compute(&points));
    }

    #[test]
    fn compute_empty_series() {
        let engine = IndicatorEngine::default();
        assert!(engine.compute(&[]).is_empty());
    }
}
