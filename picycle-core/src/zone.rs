//! Zone classification — where a day's price sits within its band.
//!
//! Nine ordered zones, from deep above the band to deep below it. The zone
//! is a view-layer annotation only: it is derived from a finished row and
//! never feeds back into the calculation.

use crate::config::ZoneConfig;
use crate::domain::IndicatorRow;
use serde::{Deserialize, Serialize};

/// Ordered position of the price within its band, top to bottom.
///
/// The three `NearMedian*` variants cover the corridor within
/// `near_median_pct` of the median; outside it, the distance to the
/// ceiling (above) or floor (below) is split at `bright_frac` and
/// `mid_frac` into three intensities per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    BrightHigh,
    High,
    MidHigh,
    NearMedianAbove,
    AtMedian,
    NearMedianBelow,
    MidLow,
    Low,
    BrightLow,
}

impl Zone {
    /// Classify one row. Pure and total: degenerate bands (ceiling equal
    /// to median, or median equal to floor) fall back to the lowest
    /// intensity on that side via the zero-fraction guard, and rows with
    /// no band yet land in `MidHigh` the same way the legacy display did.
    pub fn classify(row: &IndicatorRow, config: &ZoneConfig) -> Zone {
        Self::classify_values(row.price, row.median, row.ceiling, row.floor, config)
    }

    /// Classification on bare band values (used by the mirror-symmetry tests).
    pub fn classify_values(
        price: f64,
        median: f64,
        ceiling: f64,
        floor: f64,
        config: &ZoneConfig,
    ) -> Zone {
        let corridor = median * config.near_median_pct;
        if (price - median).abs() <= corridor {
            return if price > median {
                Zone::NearMedianAbove
            } else if price < median {
                Zone::NearMedianBelow
            } else {
                Zone::AtMedian
            };
        }

        if price >= median {
            let range_above = ceiling - median;
            let frac = if range_above > 0.0 {
                (price - median) / range_above
            } else {
                0.0
            };
            if frac >= config.bright_frac {
                Zone::BrightHigh
            } else if frac >= config.mid_frac {
                Zone::High
            } else {
                Zone::MidHigh
            }
        } else {
            let range_below = median - floor;
            let frac = if range_below > 0.0 {
                (median - price) / range_below
            } else {
                0.0
            };
            if frac >= config.bright_frac {
                Zone::BrightLow
            } else if frac >= config.mid_frac {
                Zone::Low
            } else {
                Zone::MidLow
            }
        }
    }

    /// The equally distant zone on the other side of the median.
    pub fn mirror(self) -> Zone {
        match self {
            Zone::BrightHigh => Zone::BrightLow,
            Zone::High => Zone::Low,
            Zone::MidHigh => Zone::MidLow,
            Zone::NearMedianAbove => Zone::NearMedianBelow,
            Zone::AtMedian => Zone::AtMedian,
            Zone::NearMedianBelow => Zone::NearMedianAbove,
            Zone::MidLow => Zone::MidHigh,
            Zone::Low => Zone::High,
            Zone::BrightLow => Zone::BrightHigh,
        }
    }

    pub fn is_above_median(self) -> bool {
        matches!(self, Zone::BrightHigh | Zone::High | Zone::MidHigh | Zone::NearMedianAbove)
    }
}
