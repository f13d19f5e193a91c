//! CSV-backed kline store.
//!
//! One flat file, one row per calendar date, kept sorted by keying every
//! operation off a `BTreeMap<NaiveDate, Kline>`. Upserts replace rows for
//! dates already present, so re-pulling overlapping history is idempotent.
//! This layer owns the ordering/uniqueness guarantee the engine relies on.

use super::provider::{DataError, SeriesSource};
use crate::domain::{Kline, PricePoint};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct KlineStore {
    path: PathBuf,
}

impl KlineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full store. A missing file is an empty store, not an error.
    fn read_all(&self) -> Result<BTreeMap<chrono::NaiveDate, Kline>, DataError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut klines = BTreeMap::new();
        for record in reader.deserialize() {
            let kline: Kline = record?;
            if kline.is_malformed() {
                return Err(DataError::MalformedRecord(format!(
                    "non-finite price stored for {}",
                    kline.date
                )));
            }
            klines.insert(kline.date, kline);
        }
        Ok(klines)
    }

    fn write_all(&self, klines: &BTreeMap<chrono::NaiveDate, Kline>) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        for kline in klines.values() {
            writer.serialize(kline)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Merge fetched klines into the store, replacing rows for dates
    /// already present. Malformed candles are rejected whole-batch.
    /// Returns the store size after the merge.
    pub fn upsert(&self, fetched: &[Kline]) -> Result<usize, DataError> {
        if let Some(bad) = fetched.iter().find(|k| k.is_malformed()) {
            return Err(DataError::MalformedRecord(format!(
                "refusing to store non-finite price for {}",
                bad.date
            )));
        }
        let mut klines = self.read_all()?;
        for kline in fetched {
            klines.insert(kline.date, kline.clone());
        }
        self.write_all(&klines)?;
        Ok(klines.len())
    }

    /// Re-point the newest row's series price at its close.
    ///
    /// The midpoint price is right for finished days; the still-forming
    /// latest candle tracks its close instead. Returns the date touched.
    pub fn mark_latest_close(&self) -> Result<Option<chrono::NaiveDate>, DataError> {
        let mut klines = self.read_all()?;
        let Some(latest_date) = klines.keys().next_back().copied() else {
            return Ok(None);
        };
        if let Some(kline) = klines.get_mut(&latest_date) {
            kline.price = kline.close;
        }
        self.write_all(&klines)?;
        Ok(Some(latest_date))
    }

    /// Number of stored days.
    pub fn len(&self) -> Result<usize, DataError> {
        Ok(self.read_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DataError> {
        Ok(self.len()? == 0)
    }
}

impl SeriesSource for KlineStore {
    /// The ascending, duplicate-free price series. Ordering and
    /// uniqueness come for free from the date-keyed map.
    fn load_series(&self) -> Result<Vec<PricePoint>, DataError> {
        Ok(self.read_all()?.values().map(Kline::as_point).collect())
    }
}
