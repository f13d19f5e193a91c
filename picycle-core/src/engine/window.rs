//! Report windowing — the most recent K rows, reversed for display.
//!
//! The window also carries the most recent row as an explicit value: the
//! projector reads its baseline and step from here rather than from any
//! ambient state captured during rendering.

use crate::domain::IndicatorRow;

/// The most recent slice of the indicator table, most-recent-first.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportWindow {
    rows: Vec<IndicatorRow>,
}

impl ReportWindow {
    /// Take the last `days` rows of the table and reverse them.
    ///
    /// A `days` larger than the table simply takes everything.
    pub fn from_rows(rows: &[IndicatorRow], days: usize) -> Self {
        let start = rows.len().saturating_sub(days);
        let mut window: Vec<IndicatorRow> = rows[start..].to_vec();
        window.reverse();
        Self { rows: window }
    }

    /// Rows, most-recent-first.
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    /// The most recent row — the projector's explicit baseline source.
    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::make_points;
    use crate::engine::window_stats::compute_bands;

    fn table(n: usize) -> Vec<IndicatorRow> {
        let prices: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        compute_bands(&make_points(&prices), 2)
    }

    #[test]
    fn takes_tail_and_reverses() {
        let rows = table(10);
        let window = ReportWindow::from_rows(&rows, 3);
        assert_eq!(window.len(), 3);
        assert_eq!(window.rows()[0].price, 109.0);
        assert_eq!(window.rows()[1].price, 108.0);
        assert_eq!(window.rows()[2].price, 107.0);
    }

    #[test]
    fn latest_is_most_recent_row() {
        let rows = table(10);
        let window = ReportWindow::from_rows(&rows, 5);
        assert_eq!(window.latest().unwrap().price, 109.0);
        assert_eq!(window.latest(), Some(&window.rows()[0]));
    }

    #[test]
    fn oversized_request_takes_everything() {
        let rows = table(4);
        let window = ReportWindow::from_rows(&rows, 100);
        assert_eq!(window.len(), 4);
        assert_eq!(window.rows()[0].price, 103.0);
    }

    #[test]
    fn empty_table_gives_empty_window() {
        let window = ReportWindow::from_rows(&[], 33);
        assert!(window.is_empty());
        assert!(window.latest().is_none());
    }
}
