//! Timestamp synchronization of the two trajectory logs.
//!
//! Pairs every planned-path sample with the tracker sample nearest in time.
//! The join is true nearest-neighbor on the path timeline (not backward-only
//! as-of): a backward-only join would drop every path row before the first
//! tracker row even when a near match lies just ahead. Ties between equally
//! distant tracker samples resolve to the earlier one.

use std::time::Instant;

use log::{debug, info};

use crate::core::types::{SyncedPair, TimedPoint};
use crate::error::{AlignError, Result};

/// Configuration for the synchronizer.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum allowed |path timestamp - tracker timestamp| for a match,
    /// in microseconds.
    pub tolerance_us: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            // 5 minutes
            tolerance_us: 300_000_000,
        }
    }
}

impl SyncConfig {
    /// Tolerance given in seconds.
    pub fn with_tolerance_secs(secs: f64) -> Self {
        Self {
            tolerance_us: (secs * 1_000_000.0) as i64,
        }
    }
}

/// Result of a synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOutput {
    /// Matched pairs, in non-decreasing path-timestamp order.
    pub pairs: Vec<SyncedPair>,
    /// Path samples dropped for lack of a tracker sample within tolerance.
    pub dropped: usize,
}

/// Pair each path sample with the nearest tracker sample by timestamp.
///
/// Both series must be sorted by timestamp and contain only finite
/// coordinates. Path samples whose nearest tracker timestamp differs by more
/// than the tolerance are dropped, whether at the boundaries or in interior
/// gaps.
pub fn synchronize(
    path: &[TimedPoint],
    tracker: &[TimedPoint],
    config: &SyncConfig,
) -> Result<SyncOutput> {
    let start = Instant::now();

    check_series("path", path)?;
    check_series("tracker", tracker)?;

    if tracker.is_empty() {
        info!("synchronize: tracker log empty, dropping all {} path samples", path.len());
        return Ok(SyncOutput {
            pairs: Vec::new(),
            dropped: path.len(),
        });
    }

    let mut pairs = Vec::with_capacity(path.len());
    let mut dropped = 0usize;
    let mut j = 0usize;

    for p in path {
        // Both series are sorted, so the nearest tracker index never moves
        // backwards as the path timestamp advances.
        while j + 1 < tracker.len()
            && (tracker[j + 1].timestamp_us - p.timestamp_us).abs()
                < (tracker[j].timestamp_us - p.timestamp_us).abs()
        {
            j += 1;
        }

        let delta = (tracker[j].timestamp_us - p.timestamp_us).abs();
        if delta <= config.tolerance_us {
            pairs.push(SyncedPair {
                timestamp_us: p.timestamp_us,
                path: p.position(),
                tracker: tracker[j].position(),
            });
        } else {
            dropped += 1;
            debug!(
                "synchronize: dropping path sample at {} (nearest tracker {} us away)",
                p.timestamp_us, delta
            );
        }
    }

    info!(
        "synchronized {} pairs, dropped {} in {:.2?}",
        pairs.len(),
        dropped,
        start.elapsed()
    );

    Ok(SyncOutput { pairs, dropped })
}

/// Validate sortedness and coordinate finiteness of one series.
fn check_series(name: &str, series: &[TimedPoint]) -> Result<()> {
    let mut prev = i64::MIN;
    for (i, p) in series.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(AlignError::MalformedInput(format!(
                "{name} log row {i}: non-finite coordinates ({}, {})",
                p.x, p.y
            )));
        }
        if p.timestamp_us < prev {
            return Err(AlignError::MalformedInput(format!(
                "{name} log row {i}: timestamps not sorted ({} after {prev})",
                p.timestamp_us
            )));
        }
        prev = p.timestamp_us;
    }
    Ok(())
}
