//! End-to-end pipeline behavior: CSV ingest, synchronization, validation.

use approx::assert_relative_eq;
use std::path::PathBuf;

use yatra_align::{
    fit_affine, read_trajectory, synchronize, validate, write_merged, AffineMap2D, CsvFormat,
    SyncConfig, TimedPoint, TransformParts, ValidationConfig,
};

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("yatra-pipeline-{}-{name}", std::process::id()))
}

/// Tracker log with a known frame offset from the path log, sampled at a
/// different, jittered rate.
fn synthetic_logs(n: usize) -> (Vec<TimedPoint>, Vec<TimedPoint>, AffineMap2D) {
    let map = AffineMap2D::from_parts(&TransformParts {
        translation: [12.0, -4.0],
        reflection: 1.0,
        rotation_rad: 0.35,
        scale: [1.0, 1.0],
        shear: 0.0,
    });

    // Path sampled every 100 ms along a figure-eight-ish sweep.
    let path: Vec<TimedPoint> = (0..n)
        .map(|i| {
            let t = i as i64 * 100_000;
            let s = i as f64 * 0.05;
            TimedPoint::new(t, s.cos() * 4.0 + s, (2.0 * s).sin() * 2.0)
        })
        .collect();

    // Tracker observes the path through the inverse frame: here we emit the
    // mapped path position so that `path ≈ A·tracker + b` holds with A, b
    // being the inverse map. Simpler: tracker carries raw coordinates and
    // the path log carries mapped ones.
    let tracker: Vec<TimedPoint> = path
        .iter()
        .enumerate()
        .map(|(i, p)| {
            // Deterministic sub-tolerance jitter, ±20 ms.
            let jitter = ((i * 31 % 5) as i64 - 2) * 10_000;
            TimedPoint::new(p.timestamp_us + jitter, p.x, p.y)
        })
        .collect();

    let path_mapped: Vec<TimedPoint> = path
        .iter()
        .map(|p| {
            let q = map.apply([p.x, p.y]);
            TimedPoint::new(p.timestamp_us, q[0], q[1])
        })
        .collect();

    (path_mapped, tracker, map)
}

#[test]
fn synchronized_pairs_stay_within_tolerance() {
    let (path, tracker, _) = synthetic_logs(200);
    let config = SyncConfig {
        tolerance_us: 50_000,
    };

    let out = synchronize(&path, &tracker, &config).unwrap();
    assert!(!out.pairs.is_empty());

    for pair in &out.pairs {
        // The matched tracker sample must be within tolerance, and no other
        // tracker sample may be strictly closer.
        let matched_delta = tracker
            .iter()
            .filter(|t| t.x == pair.tracker[0] && t.y == pair.tracker[1])
            .map(|t| (t.timestamp_us - pair.timestamp_us).abs())
            .min()
            .unwrap();
        assert!(matched_delta <= config.tolerance_us);

        let closest = tracker
            .iter()
            .map(|t| (t.timestamp_us - pair.timestamp_us).abs())
            .min()
            .unwrap();
        assert_eq!(matched_delta, closest);
    }
}

#[test]
fn full_pipeline_recovers_the_frame_transform() {
    let (path, tracker, map) = synthetic_logs(300);

    let out = synchronize(&path, &tracker, &SyncConfig::default()).unwrap();
    assert_eq!(out.dropped, 0);

    let tracker_pts: Vec<[f64; 2]> = out.pairs.iter().map(|p| p.tracker).collect();
    let path_pts: Vec<[f64; 2]> = out.pairs.iter().map(|p| p.path).collect();

    let fit = fit_affine(&tracker_pts, &path_pts).unwrap();
    assert_relative_eq!(fit.r2, 1.0, epsilon = 1e-9);
    for i in 0..2 {
        for k in 0..2 {
            assert_relative_eq!(fit.map.a[i][k], map.a[i][k], epsilon = 1e-8);
        }
        assert_relative_eq!(fit.map.b[i], map.b[i], epsilon = 1e-8);
    }
}

#[test]
fn validation_on_exact_data_converges_to_zero_variance() {
    let (path, tracker, _) = synthetic_logs(400);
    let out = synchronize(&path, &tracker, &SyncConfig::default()).unwrap();

    let report = validate(
        &out.pairs,
        &ValidationConfig {
            epochs: 1000,
            batch_div: 10,
            seed: 7,
        },
    )
    .unwrap();

    assert!(report.translation_x.variance < 1e-10);
    assert!(report.translation_y.variance < 1e-10);
    assert!(report.rotation_rad.variance < 1e-10);
    assert!(report.scale_x.variance < 1e-10);
    assert!(report.scale_y.variance < 1e-10);
    assert!(report.shear.variance < 1e-10);
    assert_relative_eq!(report.r2.mean, 1.0, epsilon = 1e-9);
    assert_relative_eq!(report.translation_x.mean, 12.0, epsilon = 1e-6);
    assert_relative_eq!(report.translation_y.mean, -4.0, epsilon = 1e-6);
    assert_relative_eq!(report.rotation_rad.mean, 0.35, epsilon = 1e-6);
    assert_eq!(report.reflected, 0);
    assert_eq!(report.not_reflected, 1000);
}

#[test]
fn csv_logs_round_trip_through_the_pipeline() {
    let path_file = temp_file("path.csv");
    let tracker_file = temp_file("tracker.csv");
    let merged_file = temp_file("merged.csv");

    std::fs::write(
        &path_file,
        "index,t_pth,x_pth,y_pth,z_pth\n\
         0,1970-01-01 00:00:00.0,5.0,5.0,0.0\n\
         1,1970-01-01 00:00:01.0,6.0,5.0,0.0\n\
         2,1970-01-01 00:00:02.0,5.0,6.0,0.0\n\
         3,1970-01-01 00:00:03.0,7.0,7.0,0.0\n",
    )
    .unwrap();
    std::fs::write(
        &tracker_file,
        "index,t_trk,x_trk,y_trk,z_trk\n\
         0,1970-01-01 00:00:00.1,0.0,0.0,0.0\n\
         1,1970-01-01 00:00:01.1,1.0,0.0,0.0\n\
         2,1970-01-01 00:00:02.1,0.0,1.0,0.0\n\
         3,1970-01-01 00:00:03.1,2.0,2.0,0.0\n",
    )
    .unwrap();

    let path = read_trajectory(&path_file, &CsvFormat::path_log()).unwrap();
    let tracker = read_trajectory(&tracker_file, &CsvFormat::tracker_log()).unwrap();
    let out = synchronize(&path, &tracker, &SyncConfig::default()).unwrap();
    assert_eq!(out.pairs.len(), 4);

    write_merged(&merged_file, &out.pairs).unwrap();
    let merged_text = std::fs::read_to_string(&merged_file).unwrap();
    assert!(merged_text.starts_with("path_x,path_y,tracker_x,tracker_y,timestamp_us"));
    assert_eq!(merged_text.lines().count(), 5);

    // The synthetic logs differ by a pure (5, 5) translation.
    let tracker_pts: Vec<[f64; 2]> = out.pairs.iter().map(|p| p.tracker).collect();
    let path_pts: Vec<[f64; 2]> = out.pairs.iter().map(|p| p.path).collect();
    let fit = fit_affine(&tracker_pts, &path_pts).unwrap();
    assert_relative_eq!(fit.map.b[0], 5.0, epsilon = 1e-9);
    assert_relative_eq!(fit.map.b[1], 5.0, epsilon = 1e-9);

    std::fs::remove_file(&path_file).ok();
    std::fs::remove_file(&tracker_file).ok();
    std::fs::remove_file(&merged_file).ok();
}

#[test]
fn seeded_validation_is_reproducible_across_runs() {
    let (path, tracker, _) = synthetic_logs(150);
    let out = synchronize(&path, &tracker, &SyncConfig::default()).unwrap();

    let config = ValidationConfig {
        epochs: 40,
        batch_div: 5,
        seed: 12345,
    };
    let a = validate(&out.pairs, &config).unwrap();
    let b = validate(&out.pairs, &config).unwrap();

    assert_eq!(a.translation_x, b.translation_x);
    assert_eq!(a.translation_y, b.translation_y);
    assert_eq!(a.rotation_rad, b.rotation_rad);
    assert_eq!(a.scale_x, b.scale_x);
    assert_eq!(a.shear, b.shear);
    assert_eq!(a.r2, b.r2);
}
