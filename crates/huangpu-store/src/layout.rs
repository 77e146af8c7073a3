//! Fixed on-disk layout of the data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use huangpu_types::format_date;

/// File name of the trading-day snapshot under the data root.
pub const SNAPSHOT_FILE: &str = "all_trading_days.csv";

/// Datasets persisted as per-day CSV files under the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Daily OHLCV price bars.
    StockPrice,
    /// Daily valuation metrics.
    StockValuation,
    /// Daily money-flow breakdown.
    MoneyFlow,
}

impl Dataset {
    /// Returns the dataset's directory name under the data root.
    #[must_use]
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::StockPrice => "stock_price",
            Self::StockValuation => "stock_valuation",
            Self::MoneyFlow => "money_flow",
        }
    }

    /// Returns all datasets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::StockPrice, Self::StockValuation, Self::MoneyFlow]
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Root of the on-disk data layout.
///
/// Every path the toolkit reads or writes is derived from here, so callers
/// never assemble file names by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    /// Creates a layout rooted at `root`. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the trading-day snapshot path.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }

    /// Returns a dataset's directory.
    #[must_use]
    pub fn dataset_dir(&self, dataset: Dataset) -> PathBuf {
        self.root.join(dataset.dir_name())
    }

    /// Returns the per-day file for `dataset` on `date`.
    #[must_use]
    pub fn daily_file(&self, dataset: Dataset, date: NaiveDate) -> PathBuf {
        self.dataset_dir(dataset)
            .join(format!("{}.csv", format_date(date)))
    }

    /// Creates the root and every dataset directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        for dataset in Dataset::all() {
            fs::create_dir_all(self.dataset_dir(*dataset))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_paths_follow_the_layout() {
        let root = DataRoot::new("/data");
        assert_eq!(root.snapshot_path(), Path::new("/data/all_trading_days.csv"));
        assert_eq!(
            root.dataset_dir(Dataset::StockPrice),
            Path::new("/data/stock_price")
        );
        assert_eq!(
            root.daily_file(Dataset::MoneyFlow, date("2025-01-06")),
            Path::new("/data/money_flow/2025-01-06.csv")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_every_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let root = DataRoot::new(dir.path().join("db"));
        root.ensure_dirs().unwrap();
        for dataset in Dataset::all() {
            assert!(root.dataset_dir(*dataset).is_dir());
        }
    }
}
