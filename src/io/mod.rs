//! I/O infrastructure: CSV log ingest/egress and SVG rendering.

pub mod svg;
pub mod trajectory;

pub use svg::{ScatterConfig, ScatterPlot};
pub use trajectory::{read_trajectory, write_merged, CsvFormat};
