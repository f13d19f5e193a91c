//! Linear price projection from the latest band median and smoothed drift.
//!
//! The drift is the mean `dynamic_step` over the most recent rows of the
//! report window (up to the smoothing window; fewer rows just shrink the
//! average). Two point estimates: a fixed target calendar date and a
//! fixed day offset. Straight-line extrapolation, no confidence interval.

use crate::config::ProjectorConfig;
use crate::engine::ReportWindow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two point estimates plus the inputs they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Smoothed daily drift (average of recent `dynamic_step` values).
    pub drift: f64,
    /// The latest row's band median, the extrapolation baseline.
    pub baseline: f64,
    /// Calendar days from `today` to the target date (can be negative).
    pub days_to_target: i64,
    pub target_date: NaiveDate,
    pub target_price: f64,
    /// `today` plus the smoothing window.
    pub horizon_date: NaiveDate,
    pub horizon_price: f64,
}

/// Project from the report window. An empty window degrades to the
/// all-zero projection; fewer rows than the smoothing window average
/// whatever is available. Never fails.
pub fn project(window: &ReportWindow, config: &ProjectorConfig, today: NaiveDate) -> Projection {
    let take = config.smoothing_window.min(window.len());
    let drift = if take > 0 {
        let sum: f64 = window.rows()[..take].iter().map(|r| r.dynamic_step).sum();
        sum / take as f64
    } else {
        0.0
    };

    let baseline = window.latest().map(|row| row.median).unwrap_or(0.0);

    let days_to_target = (config.target_date - today).num_days();
    let horizon_days = config.smoothing_window as i64;

    Projection {
        drift,
        baseline,
        days_to_target,
        target_date: config.target_date,
        target_price: baseline + drift * days_to_target as f64,
        horizon_date: today + chrono::Duration::days(horizon_days),
        horizon_price: baseline + drift * horizon_days as f64,
    }
}
