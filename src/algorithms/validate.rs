//! Monte-Carlo validation of the fitted transform.
//!
//! Repeats the fit + decomposition on random subsets of the synchronized
//! table and aggregates per-component statistics. A tight variance across
//! trials means the estimate is supported by the whole dataset rather than a
//! lucky subset.

use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::algorithms::decompose::decompose;
use crate::algorithms::fit::{fit_affine, MIN_FIT_POINTS};
use crate::core::types::SyncedPair;
use crate::error::{AlignError, Result};
use crate::utils::stats::ScalarStats;

/// Configuration for the validation loop.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Number of random-subsample trials.
    pub epochs: usize,

    /// Inverse batch fraction: each trial uses `len / batch_div` pairs.
    pub batch_div: usize,

    /// Random seed for deterministic trials (0 for OS entropy).
    pub seed: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_div: 10,
            seed: 0,
        }
    }
}

/// One trial's decomposed components.
#[derive(Debug, Clone, Copy)]
struct EpochSample {
    translation: [f64; 2],
    rotation_rad: f64,
    scale: [f64; 2],
    shear: f64,
    r2: f64,
    reflected: bool,
}

/// Aggregated statistics over all validation trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub epochs: usize,
    pub batch_size: usize,
    pub translation_x: ScalarStats,
    pub translation_y: ScalarStats,
    pub rotation_rad: ScalarStats,
    pub scale_x: ScalarStats,
    pub scale_y: ScalarStats,
    pub shear: ScalarStats,
    pub r2: ScalarStats,
    /// Trials whose map included a reflection.
    pub reflected: usize,
    pub not_reflected: usize,
}

impl ValidationReport {
    /// Report all statistics through the logging facade.
    pub fn log_summary(&self) {
        info!(
            "validation: {} epochs, batch size {}",
            self.epochs, self.batch_size
        );
        info!(
            "translation x mu = {:.6} var = {:.6e}",
            self.translation_x.mean, self.translation_x.variance
        );
        info!(
            "translation y mu = {:.6} var = {:.6e}",
            self.translation_y.mean, self.translation_y.variance
        );
        info!(
            "rotation angle mu = {:.6} var = {:.6e}",
            self.rotation_rad.mean, self.rotation_rad.variance
        );
        info!(
            "scale x mu = {:.6} var = {:.6e}",
            self.scale_x.mean, self.scale_x.variance
        );
        info!(
            "scale y mu = {:.6} var = {:.6e}",
            self.scale_y.mean, self.scale_y.variance
        );
        info!(
            "shear mu = {:.6} var = {:.6e}",
            self.shear.mean, self.shear.variance
        );
        info!(
            "r2 mu = {:.6} var = {:.6e}",
            self.r2.mean, self.r2.variance
        );
        info!(
            "reflected {} | not reflected {}",
            self.reflected, self.not_reflected
        );
    }
}

/// Validate a transform estimate by refitting on random subsamples.
///
/// Each epoch draws a fresh uniform subset of `pairs.len() / batch_div`
/// pairs without replacement, fits the affine map, decomposes it, and
/// records the components. After all epochs the records fold into mean and
/// population variance per component.
///
/// Fails fast with [`AlignError::InsufficientData`] when the batch size
/// would fall below the fitter's minimum, and aborts (with the epoch index)
/// on any trial failure rather than reporting statistics over partial runs.
/// A nonzero `seed` makes the trial sequence reproducible.
pub fn validate(pairs: &[SyncedPair], config: &ValidationConfig) -> Result<ValidationReport> {
    let start = Instant::now();

    if config.batch_div == 0 {
        return Err(AlignError::MalformedInput(
            "batch_div must be at least 1".to_string(),
        ));
    }
    let batch_size = pairs.len() / config.batch_div;
    if batch_size < MIN_FIT_POINTS {
        // Surfaced before the loop: every epoch would fail identically.
        return Err(AlignError::InsufficientData {
            needed: MIN_FIT_POINTS * config.batch_div,
            actual: pairs.len(),
        });
    }

    let mut rng = if config.seed != 0 {
        StdRng::seed_from_u64(config.seed)
    } else {
        StdRng::from_os_rng()
    };

    let mut samples = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        let chosen = rand::seq::index::sample(&mut rng, pairs.len(), batch_size);

        let mut tracker = Vec::with_capacity(batch_size);
        let mut path = Vec::with_capacity(batch_size);
        for idx in chosen.iter() {
            tracker.push(pairs[idx].tracker);
            path.push(pairs[idx].path);
        }

        let trial = fit_affine(&tracker, &path)
            .and_then(|fit| decompose(&fit.map).map(|parts| (fit, parts)))
            .map_err(|e| AlignError::EpochFailed {
                epoch,
                source: Box::new(e),
            })?;

        let (fit, parts) = trial;
        samples.push(EpochSample {
            translation: parts.translation,
            rotation_rad: parts.rotation_rad,
            scale: parts.scale,
            shear: parts.shear,
            r2: fit.r2,
            reflected: parts.reflection < 0.0,
        });
    }

    let stat = |f: fn(&EpochSample) -> f64| {
        let values: Vec<f64> = samples.iter().map(f).collect();
        ScalarStats::from_samples(&values)
    };

    let reflected = samples.iter().filter(|s| s.reflected).count();
    let report = ValidationReport {
        epochs: config.epochs,
        batch_size,
        translation_x: stat(|s| s.translation[0]),
        translation_y: stat(|s| s.translation[1]),
        rotation_rad: stat(|s| s.rotation_rad),
        scale_x: stat(|s| s.scale[0]),
        scale_y: stat(|s| s.scale[1]),
        shear: stat(|s| s.shear),
        r2: stat(|s| s.r2),
        reflected,
        not_reflected: samples.len() - reflected,
    };

    info!(
        "validation ran {} epochs (batch {} of {}) in {:.2?}",
        config.epochs,
        batch_size,
        pairs.len(),
        start.elapsed()
    );

    Ok(report)
}
