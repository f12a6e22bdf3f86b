//! CSV ingest of trajectory logs and egress of the merged table.
//!
//! Input logs are tabular: a timestamp column plus 2D coordinates, usually
//! with a leading index column and an unused vertical coordinate, both
//! ignored here. Column names differ between the two logs, so the reader
//! takes a [`CsvFormat`] naming them.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use log::debug;

use crate::core::types::{SyncedPair, TimedPoint};
use crate::error::{AlignError, Result};

/// Column names of one trajectory log.
#[derive(Debug, Clone)]
pub struct CsvFormat {
    pub timestamp: String,
    pub x: String,
    pub y: String,
}

impl CsvFormat {
    /// Columns of the planned-path log.
    pub fn path_log() -> Self {
        Self {
            timestamp: "t_pth".to_string(),
            x: "x_pth".to_string(),
            y: "y_pth".to_string(),
        }
    }

    /// Columns of the tracker log.
    pub fn tracker_log() -> Self {
        Self {
            timestamp: "t_trk".to_string(),
            x: "x_trk".to_string(),
            y: "y_trk".to_string(),
        }
    }
}

/// Parse a timestamp cell to microseconds since epoch.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.frac]` (taken as UTC), or raw
/// seconds.
fn parse_timestamp_us(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_micros());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_micros());
    }
    if let Ok(secs) = raw.parse::<f64>() {
        if secs.is_finite() {
            return Some((secs * 1_000_000.0).round() as i64);
        }
    }
    None
}

/// Read one trajectory log.
///
/// Rows come back in file order; sortedness is checked downstream by the
/// synchronizer. Missing columns and unparsable cells fail with
/// [`AlignError::MalformedInput`] carrying file and row context.
pub fn read_trajectory<P: AsRef<Path>>(file: P, format: &CsvFormat) -> Result<Vec<TimedPoint>> {
    let file = file.as_ref();
    let mut rdr = csv::Reader::from_path(file)?;

    let headers = rdr.headers()?.clone();
    let col = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            AlignError::MalformedInput(format!(
                "{}: missing column '{name}' (found: {})",
                file.display(),
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
    };
    let t_col = col(&format.timestamp)?;
    let x_col = col(&format.x)?;
    let y_col = col(&format.y)?;

    let mut points = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let timestamp_us = parse_timestamp_us(cell(t_col)).ok_or_else(|| {
            AlignError::MalformedInput(format!(
                "{} row {}: unparsable timestamp '{}'",
                file.display(),
                row + 1,
                cell(t_col)
            ))
        })?;

        let coord = |idx: usize, name: &str| -> Result<f64> {
            cell(idx).trim().parse::<f64>().map_err(|_| {
                AlignError::MalformedInput(format!(
                    "{} row {}: unparsable {name} '{}'",
                    file.display(),
                    row + 1,
                    cell(idx)
                ))
            })
        };

        points.push(TimedPoint::new(
            timestamp_us,
            coord(x_col, "x")?,
            coord(y_col, "y")?,
        ));
    }

    debug!("read {} rows from {}", points.len(), file.display());
    Ok(points)
}

/// Persist the synchronized table for inspection.
///
/// Columns: `path_x, path_y, tracker_x, tracker_y, timestamp_us`.
pub fn write_merged<P: AsRef<Path>>(file: P, pairs: &[SyncedPair]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(file.as_ref())?;
    wtr.write_record(["path_x", "path_y", "tracker_x", "tracker_y", "timestamp_us"])?;
    for p in pairs {
        wtr.write_record([
            p.path[0].to_string(),
            p.path[1].to_string(),
            p.tracker[0].to_string(),
            p.tracker[1].to_string(),
            p.timestamp_us.to_string(),
        ])?;
    }
    wtr.flush()?;
    debug!("wrote {} merged rows to {}", pairs.len(), file.as_ref().display());
    Ok(())
}
