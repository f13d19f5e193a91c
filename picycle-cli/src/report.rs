//! Terminal report: the fixed-width indicator table and projection trailer.
//!
//! Layout and palette reproduce the legacy report — ten bordered columns,
//! thousands separators on dollar amounts, one ANSI color per row chosen
//! by its zone.

use chrono::NaiveDate;
use picycle_core::config::ZoneConfig;
use picycle_core::{Projection, ReportWindow, Zone};

const COLOR_RESET: &str = "\x1b[0m";

const TABLE_BORDER: &str = "+------------+----------+--------+--------+----------+----------+----------+------+--------+----------+";
const TABLE_HEADER: &str = "|    Date    |   Price  |  Move  | Offset | CEILING  |  MEDIAN  |  FLOOR   | Step | Change | 52-weeks |";

/// ANSI color for a zone: greens above the median, yellows around it,
/// reds below.
fn zone_color(zone: Zone) -> &'static str {
    match zone {
        Zone::BrightHigh => "\x1b[92m",
        Zone::High => "\x1b[32m",
        Zone::MidHigh => "\x1b[38;5;22m",
        Zone::NearMedianAbove => "\x1b[38;5;142m",
        Zone::AtMedian => "\x1b[93m",
        Zone::NearMedianBelow => "\x1b[38;5;208m",
        Zone::MidLow => "\x1b[38;5;52m",
        Zone::Low => "\x1b[91m",
        Zone::BrightLow => "\x1b[38;5;196m",
    }
}

/// Format with thousands separators and a fixed number of decimals.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    let (integer_part, fractional_part) = match s.find('.') {
        Some(pos) => (&s[..pos], &s[pos..]),
        None => (&s[..], ""),
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}{fractional_part}")
}

/// Render the indicator table, one colored line per row of the window.
pub fn render_table(window: &ReportWindow, zone_config: &ZoneConfig) -> String {
    let mut out = String::new();
    out.push_str(TABLE_BORDER);
    out.push('\n');
    out.push_str(TABLE_HEADER);
    out.push('\n');
    out.push_str(TABLE_BORDER);
    out.push('\n');

    for row in window.rows() {
        let color = zone_color(Zone::classify(row, zone_config));
        let line = format!(
            "| {date} |{price:>9} | {move_pct:>6} |{offset:>7} |{ceiling:>9} |{median:>9} |{floor:>9} |{step:>5} |{change:>7} | {yoy:>8} |",
            date = row.date.format("%Y-%m-%d"),
            price = format_thousands(row.price, 0),
            move_pct = format!("{:.2}%", row.move_pct),
            offset = format!("{:.1}%", row.offset_pct),
            ceiling = format_thousands(row.ceiling, 0),
            median = format_thousands(row.median, 0),
            floor = format_thousands(row.floor, 0),
            step = format_thousands(row.dynamic_step, 0),
            change = format_thousands(row.change, 0),
            yoy = format!("{:.2}%", row.yoy_pct),
        );
        out.push_str(color);
        out.push_str(&line);
        out.push_str(COLOR_RESET);
        out.push('\n');
    }

    out.push_str(TABLE_BORDER);
    out.push('\n');
    out
}

/// Render the projection trailer under the table.
pub fn render_projection(
    projection: &Projection,
    smoothing_window: usize,
    lookback_window: usize,
    today: NaiveDate,
) -> String {
    let horizon_label = if smoothing_window == 30 {
        "+4w".to_string()
    } else {
        format!("+{smoothing_window}d")
    };

    let mut out = String::new();
    out.push_str(&format!(
        "| {smoothing_window}-day Avg Step: {:.2} (Dynamic {lookback_window}-day Price-based)\n",
        projection.drift
    ));
    out.push_str("+------------+----------+-------------------------------+\n");
    out.push_str(&format!(
        "| {:^10} | ${} | {}\n",
        projection.target_date.format("%Y"),
        format_thousands(projection.target_price, 0),
        today.format("%B %d, %Y"),
    ));
    out.push_str(&format!(
        "| {:^10} | ${} | {}\n",
        horizon_label,
        format_thousands(projection.horizon_price, 0),
        projection.horizon_date.format("%B %d, %Y"),
    ));
    out.push_str("+------------+----------+-------------------------------+\n");
    out
}
