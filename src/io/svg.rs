//! SVG scatter rendering for visual inspection.
//!
//! Renders the two point sets as an overlay scatter, and optionally a speed
//! profile as markers colored by speed magnitude. The SVG is an audit file:
//! if the fitted transform is sane, the overlay shows two versions of the
//! same route offset by the estimated map.

use std::fmt::Write;
use std::path::Path;

use crate::metrics::speed::SpeedSample;

/// Color scheme for scatter rendering.
#[derive(Clone, Debug)]
pub struct ScatterColorScheme {
    /// Planned path point color
    pub path: &'static str,
    /// Tracker point color
    pub tracker: &'static str,
    /// Canvas background
    pub background: &'static str,
    /// Slow end of the speed ramp
    pub speed_low: [u8; 3],
    /// Fast end of the speed ramp
    pub speed_high: [u8; 3],
}

impl Default for ScatterColorScheme {
    fn default() -> Self {
        Self {
            path: "#2222AA",
            tracker: "#DD8822",
            background: "#F8F8F8",
            speed_low: [0x22, 0x22, 0xAA],
            speed_high: [0xCC, 0x22, 0x22],
        }
    }
}

/// Configuration for SVG scatter rendering.
#[derive(Clone, Debug)]
pub struct ScatterConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Marker radius in pixels
    pub marker_radius: f64,
    /// Padding around the data in pixels
    pub padding: f64,
    /// Color scheme
    pub colors: ScatterColorScheme,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            marker_radius: 2.0,
            padding: 30.0,
            colors: ScatterColorScheme::default(),
        }
    }
}

/// One named point series.
#[derive(Clone, Debug)]
struct Series {
    name: String,
    points: Vec<[f64; 2]>,
    color: String,
}

/// SVG scatter builder.
pub struct ScatterPlot {
    config: ScatterConfig,
    title: Option<String>,
    series: Vec<Series>,
    speed: Option<Vec<SpeedSample>>,
}

impl ScatterPlot {
    /// Create a new scatter plot.
    pub fn new(config: ScatterConfig) -> Self {
        Self {
            config,
            title: None,
            series: Vec::new(),
            speed: None,
        }
    }

    /// Set a title to display.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add the planned path points.
    pub fn with_path(mut self, points: Vec<[f64; 2]>) -> Self {
        let color = self.config.colors.path.to_string();
        self.series.push(Series {
            name: "Path".to_string(),
            points,
            color,
        });
        self
    }

    /// Add the tracker points.
    pub fn with_tracker(mut self, points: Vec<[f64; 2]>) -> Self {
        let color = self.config.colors.tracker.to_string();
        self.series.push(Series {
            name: "Tracker".to_string(),
            points,
            color,
        });
        self
    }

    /// Add a speed profile rendered as speed-colored markers.
    pub fn with_speed(mut self, samples: Vec<SpeedSample>) -> Self {
        self.speed = Some(samples);
        self
    }

    /// Render to an SVG string.
    pub fn render(&self) -> String {
        let mut svg = String::new();

        let (min, max) = self.data_bounds();
        let span_x = (max[0] - min[0]).max(1e-9);
        let span_y = (max[1] - min[1]).max(1e-9);

        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let legend_height = 25.0;
        let plot_w = self.config.width - 2.0 * self.config.padding;
        let plot_h = self.config.height - 2.0 * self.config.padding - title_height - legend_height;
        // Uniform scale keeps the geometry undistorted.
        let scale = (plot_w / span_x).min(plot_h / span_y);

        let to_px = |p: [f64; 2]| -> (f64, f64) {
            let x = self.config.padding + (p[0] - min[0]) * scale;
            // SVG y axis points down.
            let y = title_height + self.config.padding + plot_h - (p[1] - min[1]) * scale;
            (x, y)
        };

        writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            self.config.width, self.config.height, self.config.width, self.config.height
        )
        .unwrap();

        writeln!(
            &mut svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.config.colors.background
        )
        .unwrap();

        if let Some(ref title) = self.title {
            writeln!(
                &mut svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                self.config.width / 2.0,
                title
            )
            .unwrap();
        }

        for series in &self.series {
            let id = series.name.to_lowercase();
            writeln!(&mut svg, r#"  <g id="scatter-{id}">"#).unwrap();
            for &p in &series.points {
                let (x, y) = to_px(p);
                writeln!(
                    &mut svg,
                    r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" opacity="0.6"/>"#,
                    x, y, self.config.marker_radius, series.color
                )
                .unwrap();
            }
            writeln!(&mut svg, "  </g>").unwrap();
        }

        if let Some(ref samples) = self.speed {
            let max_speed = samples
                .iter()
                .map(|s| s.speed)
                .fold(f64::NEG_INFINITY, f64::max)
                .max(1e-9);
            writeln!(&mut svg, r#"  <g id="speed-profile">"#).unwrap();
            for s in samples {
                let (x, y) = to_px([s.x, s.y]);
                writeln!(
                    &mut svg,
                    r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" opacity="0.8"/>"#,
                    x,
                    y,
                    self.config.marker_radius,
                    self.speed_color(s.speed / max_speed)
                )
                .unwrap();
            }
            writeln!(&mut svg, "  </g>").unwrap();
        }

        self.render_legend(&mut svg);

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    /// Save to file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.render())
    }

    /// Bounds over every rendered point.
    fn data_bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];

        let mut take = |p: [f64; 2]| {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        };

        for series in &self.series {
            for &p in &series.points {
                take(p);
            }
        }
        if let Some(ref samples) = self.speed {
            for s in samples {
                take([s.x, s.y]);
            }
        }

        if min[0] > max[0] {
            // Nothing to plot; keep a unit box so the canvas still renders.
            return ([0.0, 0.0], [1.0, 1.0]);
        }
        (min, max)
    }

    /// Linear ramp between the scheme's slow and fast colors, `t` in [0, 1].
    fn speed_color(&self, t: f64) -> String {
        let t = t.clamp(0.0, 1.0);
        let lo = self.config.colors.speed_low;
        let hi = self.config.colors.speed_high;
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            mix(lo[0], hi[0]),
            mix(lo[1], hi[1]),
            mix(lo[2], hi[2])
        )
    }

    fn render_legend(&self, svg: &mut String) {
        let y = self.config.height - 12.0;
        let mut x = self.config.padding;

        writeln!(
            svg,
            r#"  <g id="legend" font-family="sans-serif" font-size="12">"#
        )
        .unwrap();
        for series in &self.series {
            writeln!(
                svg,
                r#"    <circle cx="{:.0}" cy="{:.0}" r="4" fill="{}"/>"#,
                x,
                y - 4.0,
                series.color
            )
            .unwrap();
            writeln!(
                svg,
                r##"    <text x="{:.0}" y="{:.0}" fill="#333">{}</text>"##,
                x + 10.0,
                y,
                series.name
            )
            .unwrap();
            x += 90.0;
        }
        if self.speed.is_some() {
            writeln!(
                svg,
                r##"    <text x="{:.0}" y="{:.0}" fill="#333">Speed (dark = slow)</text>"##,
                x, y
            )
            .unwrap();
        }
        writeln!(svg, "  </g>").unwrap();
    }
}
