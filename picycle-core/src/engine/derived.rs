//! Cumulative derived fields layered on the banded rows.
//!
//! Fills `change`, `move_pct`, `dynamic_step`, `offset_pct`, and `yoy_pct`
//! via a second pass over the row sequence. Every percentage that would
//! divide by an exact zero keeps the zero sentinel instead — the row model
//! stays total.

use crate::domain::IndicatorRow;

/// Fill all derived fields in place. Bands must already be populated.
///
/// `dynamic_step` averages the already-computed `change` values (never
/// re-derives price differences) over the trailing `lookback` rows
/// including the current one; it stays at the sentinel until `lookback`
/// rows of change history exist. `yoy_pct` compares against the price
/// `lookback` rows back.
pub fn fill_derived(rows: &mut [IndicatorRow], lookback: usize) {
    debug_assert!(lookback >= 1, "lookback must be >= 1");

    // Day-over-day change and percentage move. The first row has no
    // predecessor and keeps the sentinel.
    for i in 1..rows.len() {
        let prev_price = rows[i - 1].price;
        rows[i].change = rows[i].price - prev_price;
        if prev_price != 0.0 {
            rows[i].move_pct = rows[i].change / prev_price * 100.0;
        }
    }

    // Dynamic step: trailing mean of `change` over `lookback` rows,
    // current row included. A second O(n·w) windowed reduction.
    for i in lookback..rows.len() {
        let sum_changes: f64 = (0..lookback).map(|j| rows[i - j].change).sum();
        rows[i].dynamic_step = sum_changes / lookback as f64;
    }

    // Offset from the band median, as a percentage.
    for row in rows.iter_mut() {
        if row.median != 0.0 {
            row.offset_pct = (row.price - row.median) / row.median * 100.0;
        }
    }

    // 52-week field: percentage change vs the price `lookback` rows back.
    for i in lookback..rows.len() {
        let base = rows[i - lookback].price;
        if base != 0.0 {
            rows[i].yoy_pct = (rows[i].price - base) / base * 100.0;
        }
    }
}
