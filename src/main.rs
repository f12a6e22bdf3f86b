//! One-shot trajectory reconciliation pipeline.
//!
//! Reads the planned-path and tracker logs, synchronizes them by timestamp,
//! estimates and decomposes the frame transform, validates it on random
//! subsamples, and writes the merged table plus optional SVG audit files.
//!
//! # Usage
//!
//! ```bash
//! yatra-align --path path.csv --tracker tracker.csv
//! yatra-align --path path.csv --tracker tracker.csv \
//!     --epochs 1000 --seed 42 --svg overlay.svg --speed-svg speed.svg
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::info;

use yatra_align::{
    decompose, fit_affine, read_trajectory, speed_profile, synchronize, validate, write_merged,
    CsvFormat, ScatterConfig, ScatterPlot, SpeedConfig, SyncConfig, TrajectorySide,
    ValidationConfig,
};

#[derive(Parser)]
#[command(name = "yatra-align")]
#[command(about = "Reconcile path/tracker trajectory logs and estimate the frame transform")]
struct Args {
    /// Planned path log (CSV with t_pth, x_pth, y_pth columns)
    #[arg(long)]
    path: PathBuf,

    /// Tracker log (CSV with t_trk, x_trk, y_trk columns)
    #[arg(long)]
    tracker: PathBuf,

    /// Output file for the synchronized table
    #[arg(long, default_value = "merged.csv")]
    merged: PathBuf,

    /// Matching tolerance in seconds
    #[arg(long, default_value = "300")]
    tolerance_secs: f64,

    /// Number of validation trials
    #[arg(long, default_value = "500")]
    epochs: usize,

    /// Inverse batch fraction: each trial uses len/batch-div pairs
    #[arg(long, default_value = "10")]
    batch_div: usize,

    /// Random seed for reproducible validation (0 = OS entropy)
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Write a scatter overlay of both point sets to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write a speed-colored scatter of the path to this SVG file
    #[arg(long)]
    speed_svg: Option<PathBuf>,

    /// Speed profile resampling step in milliseconds
    #[arg(long, default_value = "100")]
    speed_step_ms: i64,

    /// Speed profile central-difference shift in resampled steps
    #[arg(long, default_value = "2")]
    speed_shift: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> yatra_align::Result<()> {
    let path_log = read_trajectory(&args.path, &CsvFormat::path_log())?;
    let tracker_log = read_trajectory(&args.tracker, &CsvFormat::tracker_log())?;
    info!(
        "loaded {} path rows, {} tracker rows",
        path_log.len(),
        tracker_log.len()
    );

    let sync = synchronize(
        &path_log,
        &tracker_log,
        &SyncConfig::with_tolerance_secs(args.tolerance_secs),
    )?;
    write_merged(&args.merged, &sync.pairs)?;
    info!("merged table written to {}", args.merged.display());

    let tracker: Vec<[f64; 2]> = sync.pairs.iter().map(|p| p.tracker).collect();
    let path: Vec<[f64; 2]> = sync.pairs.iter().map(|p| p.path).collect();

    // Fit once on the full table for inspection.
    let fit = fit_affine(&tracker, &path)?;
    let parts = decompose(&fit.map)?;
    info!(
        "full fit over {} pairs: r2 {:.6}",
        sync.pairs.len(),
        fit.r2
    );
    info!(
        "translation ({:.4}, {:.4}) | rotation {:.4} rad | scale ({:.4}, {:.4}) | shear {:.4} | {}",
        parts.translation[0],
        parts.translation[1],
        parts.rotation_rad,
        parts.scale[0],
        parts.scale[1],
        parts.shear,
        if parts.reflection < 0.0 {
            "reflected"
        } else {
            "not reflected"
        }
    );

    let report = validate(
        &sync.pairs,
        &ValidationConfig {
            epochs: args.epochs,
            batch_div: args.batch_div,
            seed: args.seed,
        },
    )?;
    report.log_summary();

    if let Some(ref svg_path) = args.svg {
        ScatterPlot::new(ScatterConfig::default())
            .with_title("Raw path and tracker samples")
            .with_path(path.clone())
            .with_tracker(tracker.clone())
            .save(svg_path)?;
        info!("scatter overlay written to {}", svg_path.display());
    }

    if let Some(ref speed_path) = args.speed_svg {
        let profile = speed_profile(
            &sync.pairs,
            TrajectorySide::Path,
            &SpeedConfig {
                step_us: args.speed_step_ms * 1000,
                shift: args.speed_shift,
            },
        );
        ScatterPlot::new(ScatterConfig::default())
            .with_title("Path segment speed")
            .with_speed(profile)
            .save(speed_path)?;
        info!("speed scatter written to {}", speed_path.display());
    }

    Ok(())
}
