//! Statistical utility functions.

use serde::{Deserialize, Serialize};

/// Mean and population variance of a sample set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarStats {
    pub mean: f64,
    /// Population variance (divides by N).
    pub variance: f64,
}

impl ScalarStats {
    /// Compute statistics from a slice of samples.
    ///
    /// Returns zeros for an empty slice.
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self { mean, variance }
    }

    /// Standard deviation.
    #[inline]
    pub fn std(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_population_variance() {
        let stats = ScalarStats::from_samples(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(stats.mean, 2.5);
        // Population variance: ((1.5² + 0.5²) * 2) / 4 = 1.25
        assert_relative_eq!(stats.variance, 1.25);
        assert_relative_eq!(stats.std(), 1.25f64.sqrt());
    }

    #[test]
    fn test_constant_samples_have_zero_variance() {
        let stats = ScalarStats::from_samples(&[7.0; 20]);
        assert_relative_eq!(stats.mean, 7.0);
        assert_relative_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_empty_is_zeroed() {
        assert_eq!(ScalarStats::from_samples(&[]), ScalarStats::default());
    }
}
