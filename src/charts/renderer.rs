//! Static Chart Renderer
//! Draws the four attack charts to PNG with plotters.
//!
//! Charts:
//! 1. Geographic scatter of attack origins on a lon/lat grid
//! 2. Daily attack volume as a line
//! 3. Protocol share as a pie with percentage labels
//! 4. Attacks per host, stacked by attack type

use crate::aggregate::{AnalysisReport, DailyCount, GeoPoint, HostTypeMatrix, ProtocolCounts};
use plotters::prelude::*;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GEO_SCATTER_FILE: &str = "geo_scatter.png";
pub const DAILY_ATTACKS_FILE: &str = "daily_attacks.png";
pub const ATTACK_VECTORS_FILE: &str = "attack_vectors.png";
pub const HOST_TYPE_FILE: &str = "host_type_stacked.png";

/// Segment colors, reused in order for protocols and attack types.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(52, 152, 219), // Blue
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

const FONT: &str = "sans-serif";

type DrawResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to prepare chart directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw {chart}: {message}")]
    Draw { chart: &'static str, message: String },
}

/// Pick a palette color by position.
pub fn palette_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// Writes chart images for a finished report into one directory.
pub struct ChartRenderer {
    out_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render every chart that has data. Returns the files written.
    pub fn render_all(&self, report: &AnalysisReport) -> Result<Vec<PathBuf>, ChartError> {
        fs::create_dir_all(&self.out_dir)?;
        let mut written = Vec::new();

        if report.geo_points.is_empty() {
            tracing::info!("No coordinates to plot, skipping geographic scatter");
        } else {
            written.push(self.render(GEO_SCATTER_FILE, "geographic scatter", |path| {
                draw_geo_scatter(&report.geo_points, path)
            })?);
        }

        if report.daily_counts.is_empty() {
            tracing::info!("No timestamps to plot, skipping daily attack series");
        } else {
            written.push(self.render(DAILY_ATTACKS_FILE, "daily attack series", |path| {
                draw_daily_series(&report.daily_counts, path)
            })?);
        }

        if report.protocol_counts.is_empty() {
            tracing::info!("No protocol labels, skipping attack vector pie");
        } else {
            written.push(self.render(ATTACK_VECTORS_FILE, "attack vector pie", |path| {
                draw_protocol_pie(&report.protocol_counts, path)
            })?);
        }

        if report.host_type_matrix.is_empty() {
            tracing::info!("No hosts, skipping host/type bar chart");
        } else {
            written.push(self.render(HOST_TYPE_FILE, "host/type bar chart", |path| {
                draw_host_type_bars(&report.host_type_matrix, path)
            })?);
        }

        Ok(written)
    }

    fn render<F>(&self, file: &str, chart: &'static str, draw: F) -> Result<PathBuf, ChartError>
    where
        F: FnOnce(&Path) -> DrawResult,
    {
        let path = self.out_dir.join(file);
        draw(&path).map_err(|e| ChartError::Draw {
            chart,
            message: e.to_string(),
        })?;
        tracing::info!("Saved {} to {}", chart, path.display());
        Ok(path)
    }
}

fn draw_geo_scatter(points: &[GeoPoint], path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, (1500, 1000)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Geographical Scatter Plot of Attack Origins", (FONT, 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-180f64..180f64, -90f64..90f64)?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()?;

    // the map is fixed to the globe; anything outside is not drawn
    chart.draw_series(
        points
            .iter()
            .filter(|p| (-180.0..=180.0).contains(&p.longitude))
            .filter(|p| (-90.0..=90.0).contains(&p.latitude))
            .map(|p| Circle::new((p.longitude, p.latitude), 3, RED.mix(0.5).filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_daily_series(counts: &[DailyCount], path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = counts.len().saturating_sub(1).max(1) as f64;
    let y_max = counts.iter().map(|c| c.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Time Series Analysis of Attack Frequency", (FONT, 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    let day_label = |x: &f64| {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > 1e-6 {
            return String::new();
        }
        counts
            .get(idx as usize)
            .map(|c| c.day.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Number of Attacks")
        .x_labels(counts.len().min(12))
        .x_label_formatter(&day_label)
        .draw()?;

    chart.draw_series(LineSeries::new(
        counts
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx as f64, c.count as f64)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

fn draw_protocol_pie(counts: &ProtocolCounts, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Attack Vectors Distribution", (FONT, 30))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;
    let total = counts.total() as f64;

    let at = |angle: f64, r: f64| {
        (
            center.0 + (r * angle.cos()).round() as i32,
            center.1 + (r * angle.sin()).round() as i32,
        )
    };

    // slices run clockwise from twelve o'clock
    let mut start = -FRAC_PI_2;
    for (idx, entry) in counts.entries().iter().enumerate() {
        let sweep = entry.count as f64 / total * TAU;
        let steps = ((sweep / TAU) * 360.0).ceil().max(2.0) as usize;

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push(center);
        outline.extend((0..=steps).map(|s| at(start + sweep * s as f64 / steps as f64, radius)));
        root.draw(&Polygon::new(outline, palette_color(idx).filled()))?;

        let mid = start + sweep / 2.0;
        root.draw(&Text::new(
            entry.protocol.clone(),
            at(mid, radius * 1.12),
            (FONT, 18).into_font(),
        ))?;
        root.draw(&Text::new(
            format!("{:.1}%", counts.share(&entry.protocol).unwrap_or(0.0)),
            at(mid, radius * 0.6),
            (FONT, 16).into_font(),
        ))?;

        start += sweep;
    }

    root.present()?;
    Ok(())
}

fn draw_host_type_bars(matrix: &HostTypeMatrix, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let hosts = matrix.rows.len();
    let y_max = matrix.max_row_total().max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Number of Attacks per Host per Type", (FONT, 30))
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(hosts as f64 - 0.5), 0f64..y_max)?;

    let host_label = |x: &f64| {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > 1e-6 {
            return String::new();
        }
        matrix
            .rows
            .get(idx as usize)
            .map(|row| row.host.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Host")
        .y_desc("Number of Attacks")
        .x_labels(hosts)
        .x_label_formatter(&host_label)
        .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
        .draw()?;

    // every host stacks its segments in the same type order
    let mut base = vec![0usize; hosts];
    for (type_idx, attack_type) in matrix.types.iter().enumerate() {
        let color = palette_color(type_idx);
        let segments: Vec<_> = matrix
            .rows
            .iter()
            .enumerate()
            .map(|(host_idx, row)| {
                let count = row.counts.get(attack_type).copied().unwrap_or(0);
                let bottom = base[host_idx];
                base[host_idx] += count;
                Rectangle::new(
                    [
                        (host_idx as f64 - 0.35, bottom as f64),
                        (host_idx as f64 + 0.35, (bottom + count) as f64),
                    ],
                    color.filled(),
                )
            })
            .collect();

        chart
            .draw_series(segments)?
            .label(attack_type.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
