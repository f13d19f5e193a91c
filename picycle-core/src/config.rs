//! Serializable configuration for the indicator pipeline.
//!
//! Every tunable the pipeline honors lives here, with `Default` carrying
//! the legacy constants. Configs load from TOML; any omitted section or
//! field falls back to its default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Minimum number of rows the report will present. Callers clamp up to this.
pub const MIN_DISPLAY_DAYS: usize = 33;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Windows for the rolling-statistics engine.
///
/// `ma_window` (365) and `lookback_window` (364) are two distinct semantic
/// windows — a 365-sample statistical window vs a 364-day lookback for
/// day-over-day comparison. They are never merged into one constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Samples in the moving-average / standard-deviation window.
    pub ma_window: usize,
    /// Days in the dynamic-step and 52-week lookback window.
    pub lookback_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_window: 365,
            lookback_window: 364,
        }
    }
}

/// Thresholds for the nine-level zone classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Half-width of the near-median corridor, as a fraction of the median.
    pub near_median_pct: f64,
    /// Band fraction at and above which the brightest zone applies.
    pub bright_frac: f64,
    /// Band fraction at and above which the middle-intensity zone applies.
    pub mid_frac: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            near_median_pct: 0.02,
            bright_frac: 0.575,
            mid_frac: 0.29,
        }
    }
}

/// Settings for the linear price projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Most-recent rows whose `dynamic_step` is averaged into the drift.
    pub smoothing_window: usize,
    /// Fixed calendar date for the long-horizon estimate.
    pub target_date: NaiveDate,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 30,
            target_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }
}

/// Data-layer settings: which symbol to pull and where the store lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub symbol: String,
    pub store_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            store_path: "data/klines.csv".to_string(),
        }
    }
}

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PiCycleConfig {
    pub indicator: IndicatorConfig,
    pub zone: ZoneConfig,
    pub projector: ProjectorConfig,
    pub data: DataConfig,
}

impl PiCycleConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.indicator.ma_window < 2 {
            return Err(ConfigError::Invalid("ma_window must be >= 2".into()));
        }
        if self.indicator.lookback_window < 1 {
            return Err(ConfigError::Invalid("lookback_window must be >= 1".into()));
        }
        if self.projector.smoothing_window < 1 {
            return Err(ConfigError::Invalid("smoothing_window must be >= 1".into()));
        }
        if !(0.0..1.0).contains(&self.zone.near_median_pct) {
            return Err(ConfigError::Invalid(
                "near_median_pct must be in [0, 1)".into(),
            ));
        }
        if self.zone.mid_frac > self.zone.bright_frac {
            return Err(ConfigError::Invalid(
                "mid_frac must not exceed bright_frac".into(),
            ));
        }
        Ok(())
    }
}
