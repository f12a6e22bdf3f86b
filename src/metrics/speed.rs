//! Finite-difference speed profile of a synchronized trajectory.
//!
//! Presentation-layer computation feeding the speed scatter: the series is
//! resampled to a fixed time step with forward-fill, then differentiated by
//! central differences over a configurable shift:
//!
//! ```text
//! dx[i] = (x[i + shift] - x[i - shift]) / (shift + 1)
//! speed = sqrt(dx² + dy²)
//! ```
//!
//! The divisor is a fixed convention, not a physical time base; the profile
//! is for relative inspection, not calibrated velocity.

use serde::{Deserialize, Serialize};

use crate::core::types::SyncedPair;

/// Which side of the synchronized table to differentiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectorySide {
    Path,
    Tracker,
}

/// Configuration for the speed profile.
#[derive(Debug, Clone)]
pub struct SpeedConfig {
    /// Resampling step in microseconds.
    pub step_us: i64,
    /// Central-difference shift in resampled steps.
    pub shift: usize,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            // 100 ms
            step_us: 100_000,
            shift: 2,
        }
    }
}

/// One resampled position with its speed estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedSample {
    pub timestamp_us: i64,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

/// Compute the speed profile of one side of the synchronized table.
///
/// Edge rows without a full central-difference window are omitted. Returns
/// an empty vector when the input is empty, the step is non-positive, or too
/// few resampled rows remain.
pub fn speed_profile(
    pairs: &[SyncedPair],
    side: TrajectorySide,
    config: &SpeedConfig,
) -> Vec<SpeedSample> {
    if pairs.is_empty() || config.step_us <= 0 {
        return Vec::new();
    }

    // Resample with forward-fill: each grid time takes the latest sample at
    // or before it.
    let pick = |p: &SyncedPair| match side {
        TrajectorySide::Path => p.path,
        TrajectorySide::Tracker => p.tracker,
    };

    let t0 = pairs[0].timestamp_us;
    let t1 = pairs[pairs.len() - 1].timestamp_us;
    let steps = ((t1 - t0) / config.step_us) as usize + 1;

    let mut grid = Vec::with_capacity(steps);
    let mut src = 0usize;
    for k in 0..steps {
        let t = t0 + k as i64 * config.step_us;
        while src + 1 < pairs.len() && pairs[src + 1].timestamp_us <= t {
            src += 1;
        }
        let pos = pick(&pairs[src]);
        grid.push((t, pos[0], pos[1]));
    }

    let shift = config.shift;
    if grid.len() <= 2 * shift {
        return Vec::new();
    }

    let div = (shift + 1) as f64;
    (shift..grid.len() - shift)
        .map(|i| {
            let (t, x, y) = grid[i];
            let dx = (grid[i + shift].1 - grid[i - shift].1) / div;
            let dy = (grid[i + shift].2 - grid[i - shift].2) / div;
            SpeedSample {
                timestamp_us: t,
                x,
                y,
                speed: (dx * dx + dy * dy).sqrt(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pairs_linear(n: usize, dt_us: i64, vx: f64, vy: f64) -> Vec<SyncedPair> {
        (0..n)
            .map(|i| {
                let t = i as i64 * dt_us;
                let secs = t as f64 / 1e6;
                let pos = [vx * secs, vy * secs];
                SyncedPair {
                    timestamp_us: t,
                    path: pos,
                    tracker: pos,
                }
            })
            .collect()
    }

    #[test]
    fn test_constant_velocity_gives_constant_speed() {
        let config = SpeedConfig {
            step_us: 100_000,
            shift: 2,
        };
        let pairs = pairs_linear(50, 100_000, 3.0, 4.0);
        let profile = speed_profile(&pairs, TrajectorySide::Path, &config);

        assert!(!profile.is_empty());
        // Displacement over 2*shift steps of 0.1 s at |v| = 5, divided by
        // (shift + 1): 5 * 0.4 / 3.
        let expected = 5.0 * 0.4 / 3.0;
        for s in &profile {
            assert_relative_eq!(s.speed, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_edge_rows_omitted() {
        let config = SpeedConfig {
            step_us: 100_000,
            shift: 2,
        };
        let pairs = pairs_linear(10, 100_000, 1.0, 0.0);
        let profile = speed_profile(&pairs, TrajectorySide::Path, &config);
        assert_eq!(profile.len(), 10 - 2 * config.shift);
        assert_eq!(profile[0].timestamp_us, 200_000);
    }

    #[test]
    fn test_forward_fill_over_gap() {
        let config = SpeedConfig {
            step_us: 100_000,
            shift: 1,
        };
        // Stationary, with a hole in the middle of the log.
        let mut pairs = pairs_linear(3, 100_000, 0.0, 0.0);
        pairs.push(SyncedPair {
            timestamp_us: 800_000,
            path: [0.0, 0.0],
            tracker: [0.0, 0.0],
        });
        let profile = speed_profile(&pairs, TrajectorySide::Path, &config);
        // Grid covers the gap by holding the last position; speed stays 0.
        assert_eq!(profile.len(), 9 - 2);
        for s in &profile {
            assert_relative_eq!(s.speed, 0.0);
        }
    }

    #[test]
    fn test_too_short_input_is_empty() {
        let config = SpeedConfig::default();
        let pairs = pairs_linear(2, 100_000, 1.0, 0.0);
        assert!(speed_profile(&pairs, TrajectorySide::Tracker, &config).is_empty());
        assert!(speed_profile(&[], TrajectorySide::Path, &config).is_empty());
    }
}
