//! Snapshot persistence for the trading-day sequence.
//!
//! The snapshot is a CSV table carrying a `trade_date` column with one
//! `YYYY-MM-DD` row per session. It is regenerated out of band (roughly once
//! a year) by the refresh job and read once per process by the calendar.
//! Extra columns are tolerated and ignored so snapshots exported by other
//! tools load unchanged.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use huangpu_types::{format_date, parse_date};

use crate::TradingCalendar;

/// Name of the date column every snapshot must carry.
pub const SNAPSHOT_COLUMN: &str = "trade_date";

/// Errors raised while loading or storing the trading-day snapshot.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Snapshot file missing or unreadable.
    #[error("trading-day snapshot unavailable at '{path}': {source}")]
    SnapshotUnavailable {
        /// The snapshot path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Snapshot readable but not a valid trading-day table.
    #[error("malformed trading-day snapshot '{path}': {reason}")]
    MalformedSnapshot {
        /// The snapshot path that failed to parse.
        path: PathBuf,
        /// What was wrong with the content.
        reason: String,
    },

    /// Snapshot could not be written.
    #[error("failed to write trading-day snapshot '{path}': {source}")]
    WriteSnapshot {
        /// The snapshot path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Loads a calendar from a snapshot file.
///
/// # Errors
///
/// Returns [`CalendarError::SnapshotUnavailable`] if the file cannot be
/// read and [`CalendarError::MalformedSnapshot`] if its content is not a
/// valid trading-day table.
pub fn load_snapshot(path: &Path) -> Result<TradingCalendar, CalendarError> {
    let text = fs::read_to_string(path).map_err(|source| CalendarError::SnapshotUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&text).map_err(|reason| CalendarError::MalformedSnapshot {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parses snapshot CSV text into a calendar.
fn parse_snapshot(text: &str) -> Result<TradingCalendar, String> {
    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| "empty file".to_string())?;
    let column = header
        .split(',')
        .map(str::trim)
        .position(|field| field == SNAPSHOT_COLUMN)
        .ok_or_else(|| format!("missing '{SNAPSHOT_COLUMN}' column"))?;

    let mut dates = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cell = line.split(',').nth(column).map(str::trim).unwrap_or("");
        let date = parse_date(cell)
            .map_err(|_| format!("line {}: unparseable date '{cell}'", index + 2))?;
        dates.push(date);
    }
    Ok(TradingCalendar::from_dates(dates))
}

/// Writes a calendar to a snapshot file, atomically replacing any previous
/// snapshot.
///
/// The content goes to a temporary file in the target directory first and is
/// renamed into place, so a concurrent reader observes either the old or the
/// new snapshot, never a partial one.
///
/// # Errors
///
/// Returns [`CalendarError::WriteSnapshot`] if the directory cannot be
/// created or the file cannot be written or renamed.
pub fn store_snapshot(path: &Path, calendar: &TradingCalendar) -> Result<(), CalendarError> {
    let write_err = |source| CalendarError::WriteSnapshot {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    writeln!(tmp, "{SNAPSHOT_COLUMN}").map_err(write_err)?;
    for date in calendar.as_slice() {
        writeln!(tmp, "{}", format_date(*date)).map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_snapshot() {
        let cal = parse_snapshot("trade_date\n2025-01-02\n2025-01-03\n").unwrap();
        assert_eq!(cal.as_slice(), &[date("2025-01-02"), date("2025-01-03")]);
    }

    #[test]
    fn test_parse_tolerates_extra_columns_and_blank_lines() {
        let text = ",trade_date\n0,2025-01-03\n\n1,2025-01-02\n";
        let cal = parse_snapshot(text).unwrap();
        assert_eq!(cal.as_slice(), &[date("2025-01-02"), date("2025-01-03")]);
    }

    #[test]
    fn test_parse_rejects_missing_column() {
        let err = parse_snapshot("cal_date\n2025-01-02\n").unwrap_err();
        assert!(err.contains("trade_date"));
    }

    #[test]
    fn test_parse_rejects_bad_cell() {
        let err = parse_snapshot("trade_date\n2025-01-02\nnot-a-date\n").unwrap_err();
        assert!(err.contains("line 3"));
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, CalendarError::SnapshotUnavailable { .. }));
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_trading_days.csv");
        let cal = TradingCalendar::from_dates(vec![
            date("2025-01-06"),
            date("2025-01-02"),
            date("2025-01-03"),
        ]);

        store_snapshot(&path, &cal).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, cal);

        // Overwriting replaces the previous snapshot in full.
        let shorter = TradingCalendar::from_dates(vec![date("2025-01-07")]);
        store_snapshot(&path, &shorter).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), shorter);
    }

    #[test]
    fn test_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/all_trading_days.csv");
        let cal = TradingCalendar::from_dates(vec![date("2025-01-02")]);
        store_snapshot(&path, &cal).unwrap();
        assert!(path.exists());
    }
}
