//! End-to-end scenarios for the indicator pipeline: warmup sentinels,
//! band geometry, classification of the freshest row, and projector
//! degradation on short histories.

use chrono::NaiveDate;
use picycle_core::config::{PiCycleConfig, ZoneConfig};
use picycle_core::projector::project;
use picycle_core::{IndicatorEngine, PricePoint, ReportWindow, Zone};

const EPSILON: f64 = 1e-9;

fn make_points(prices: &[f64]) -> Vec<PricePoint> {
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint::new(base_date + chrono::Duration::days(i as i64), price))
        .collect()
}

fn assert_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "actual={actual}, expected={expected}"
    );
}

/// Relative tolerance for windowed statistics over long series.
fn assert_rel(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        ((actual - expected) / scale).abs() < EPSILON,
        "actual={actual}, expected={expected}"
    );
}

#[test]
fn flat_series_collapses_band_onto_price() {
    // 365 identical prices plus one more identical day.
    let prices = vec![100.0; 366];
    let rows = IndicatorEngine::default().compute(&make_points(&prices));

    let last = rows.last().unwrap();
    assert_approx(last.ma_365, 100.0);
    assert_approx(last.std_365, 0.0);
    assert_approx(last.ceiling, 100.0);
    assert_approx(last.floor, 100.0);
    assert_approx(last.median, 100.0);
    assert_approx(last.offset_pct, 0.0);
    assert_eq!(Zone::classify(last, &ZoneConfig::default()), Zone::AtMedian);
}

#[test]
fn single_spike_widens_band_and_classifies_above() {
    // 364 flat days then a spike to 130 on day 365.
    let mut prices = vec![100.0; 364];
    prices.push(130.0);
    let rows = IndicatorEngine::default().compute(&make_points(&prices));

    let last = rows.last().unwrap();
    let expected_mean = (364.0 * 100.0 + 130.0) / 365.0;
    assert_rel(last.ma_365, expected_mean);
    assert!(last.std_365 > 0.0);
    assert!(last.ceiling > last.median);
    assert!(last.median > last.floor);

    let zone = Zone::classify(last, &ZoneConfig::default());
    assert!(zone.is_above_median(), "price above median, got {zone:?}");
}

#[test]
fn series_one_short_of_window_never_computes_bands() {
    // Exactly 364 points: the 365-sample window never accumulates.
    let prices: Vec<f64> = (0..364).map(|i| 100.0 + (i % 13) as f64).collect();
    let rows = IndicatorEngine::default().compute(&make_points(&prices));

    assert_eq!(rows.len(), 364);
    for row in &rows {
        assert_eq!(row.ma_365, 0.0);
        assert_eq!(row.ceiling, 0.0);
        assert_eq!(row.median, 0.0);
        assert_eq!(row.floor, 0.0);
        assert_eq!(row.yoy_pct, 0.0);
        assert_eq!(row.dynamic_step, 0.0);
        assert_eq!(row.offset_pct, 0.0);
    }
}

#[test]
fn warmup_sentinels_then_band_geometry() {
    let prices: Vec<f64> = (0..500).map(|i| 100.0 + (i % 29) as f64).collect();
    let rows = IndicatorEngine::default().compute(&make_points(&prices));

    for (i, row) in rows.iter().enumerate() {
        if i < 364 {
            assert_eq!(row.ma_365, 0.0, "warmup row {i}");
            assert_eq!(row.median, 0.0, "warmup row {i}");
        } else {
            assert_rel(row.floor, row.ma_365);
            assert_rel(row.median, (row.ceiling + row.floor) / 2.0);
            assert_rel(row.ceiling - row.floor, 2.0 * row.std_365);
            assert_rel(
                row.offset_pct,
                (row.price - row.median) / row.median * 100.0,
            );
            let base = rows[i - 364].price;
            assert_rel(row.yoy_pct, (row.price - base) / base * 100.0);
        }
    }
}

#[test]
fn engine_is_idempotent_end_to_end() {
    let prices: Vec<f64> = (0..450)
        .map(|i| 40_000.0 + (i as f64 * 17.0).sin() * 2_500.0)
        .collect();
    let points = make_points(&prices);
    let engine = IndicatorEngine::default();
    let first = engine.compute(&points);
    let second = engine.compute(&points);
    assert_eq!(first, second);
}

#[test]
fn projector_degrades_gracefully_below_smoothing_window() {
    // Ten rows of history instead of the configured thirty.
    let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let rows = IndicatorEngine::default().compute(&make_points(&prices));
    let window = ReportWindow::from_rows(&rows, rows.len());
    assert_eq!(window.len(), 10);

    let config = PiCycleConfig::default();
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let projection = project(&window, &config.projector, today);

    // All steps are at the sentinel this early; the average over the ten
    // available values is still well-defined.
    assert_eq!(projection.drift, 0.0);
    assert_eq!(projection.baseline, 0.0);
    assert_eq!(
        projection.horizon_date,
        today + chrono::Duration::days(config.projector.smoothing_window as i64)
    );
}

#[test]
fn full_pipeline_report_window_and_projection() {
    // Long gently-rising series: every derived field live on recent rows.
    let prices: Vec<f64> = (0..800).map(|i| 30_000.0 + 10.0 * i as f64).collect();
    let config = PiCycleConfig::default();
    let rows = IndicatorEngine::new(config.indicator.clone()).compute(&make_points(&prices));

    let window = ReportWindow::from_rows(&rows, 33);
    assert_eq!(window.len(), 33);
    let latest = window.latest().unwrap();
    assert_eq!(latest.date, rows.last().unwrap().date);
    assert!(latest.has_band());
    // Constant +10/day drift: the dynamic step converges to 10.
    assert!((latest.dynamic_step - 10.0).abs() < 1e-6);

    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let projection = project(&window, &config.projector, today);
    assert!((projection.drift - 10.0).abs() < 1e-6);
    assert_rel(projection.baseline, latest.median);
    assert_rel(
        projection.horizon_price,
        latest.median + projection.drift * 30.0,
    );
}
