//! YatraAlign - Trajectory log reconciliation and frame alignment
//!
//! Reconciles a planned-path log and a tracker log of the same run into one
//! synchronized table, estimates the 2D affine map relating the two
//! coordinate frames, decomposes it into interpretable components, and
//! validates the estimate by refitting on random subsamples.
//!
//! # Architecture
//!
//! The crate is organized into 4 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │            (trajectory CSV, SVG audit)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   metrics/                          │  ← Derived output
//! │                 (speed profile)                     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Estimation core
//! │        (sync, fit, decompose, validate)             │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! ```text
//! path.csv ─┐
//!           ├─ synchronize ─ merged table ─ fit ─ decompose
//! trkr.csv ─┘                     │                  │
//!                                 │              validate (random
//!                                 │               subsample trials)
//!                                 └─ merged.csv / scatter SVG / speed SVG
//! ```
//!
//! Correspondences come purely from nearest-timestamp matching; this is a
//! log reconciliation tool, not a geometric registration system.

// Layer 1: Core foundation (no internal deps)
pub mod core;

// Layer 2: Estimation algorithms (depends on core)
pub mod algorithms;

// Layer 3: Derived metrics (depends on core)
pub mod metrics;

// Layer 4: I/O infrastructure (depends on all layers)
pub mod io;

pub mod error;
pub mod utils;

// Core types
pub use crate::core::types::{AffineMap2D, SyncedPair, TimedPoint, TransformParts};

// Errors
pub use crate::error::{AlignError, Result};

// Algorithms
pub use crate::algorithms::decompose::decompose;
pub use crate::algorithms::fit::{fit_affine, AffineFit, MIN_FIT_POINTS};
pub use crate::algorithms::sync::{synchronize, SyncConfig, SyncOutput};
pub use crate::algorithms::validate::{validate, ValidationConfig, ValidationReport};

// Metrics
pub use crate::metrics::speed::{speed_profile, SpeedConfig, SpeedSample, TrajectorySide};

// I/O
pub use crate::io::svg::{ScatterConfig, ScatterPlot};
pub use crate::io::trajectory::{read_trajectory, write_merged, CsvFormat};

// Utilities
pub use crate::utils::stats::ScalarStats;
