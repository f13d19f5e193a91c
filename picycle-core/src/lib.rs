//! Pi Cycle core — the volatility-band indicator engine and its collaborators.
//!
//! The heart of this crate is the rolling-statistics pipeline: an ordered
//! daily price series goes in, and a table of per-day derived metrics comes
//! out — trailing 365-sample mean and population standard deviation, the
//! ceiling/median/floor band, day-over-day change and move percentage, the
//! 364-day dynamic step, offset from the median, and the 52-week change.
//! On top of the table sit the nine-level zone classifier (display
//! coloring) and the linear projector (two price point-estimates from the
//! latest band median and smoothed drift).
//!
//! Stages run strictly in sequence over the full in-memory series; there
//! is no streaming, no shared mutable state, and no hidden globals — the
//! report window hands the latest row to the projector explicitly.

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod projector;
pub mod zone;

pub use config::{PiCycleConfig, MIN_DISPLAY_DAYS};
pub use domain::{IndicatorRow, Kline, PricePoint};
pub use engine::{IndicatorEngine, ReportWindow};
pub use projector::{project, Projection};
pub use zone::Zone;
