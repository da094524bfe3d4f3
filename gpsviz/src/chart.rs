//! Two-panel raster plot of photo locations and altitudes.

use crate::survey::ProjectedPoint;
use anyhow::{Context, Error as AnyError};
use plotters::{coord::Shift, prelude::*};
use std::{ops::Range, path::Path};

/// Upper bound on gridlines drawn per axis before the 1 m step is
/// coarsened.
const MAX_GRID_LINES: f64 = 500.0;

/// Step multipliers producing 1, 2, 5, 10, 20, 50, ... meters.
const GRID_STEP_MULTIPLIERS: [f64; 3] = [2.0, 2.5, 2.0];

/// Steps in the colorbar gradient.
const COLORBAR_STEPS: u32 = 256;

const FONT: &str = "sans-serif";
const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Renders `points` to a PNG at `out`, overwriting any existing file.
///
/// The left half shows the points in UTM coordinates colored by
/// altitude, with a colorbar; the right half shows altitude against
/// point index.
pub fn render(
    points: &[ProjectedPoint],
    out: &Path,
    (width, height): (u32, u32),
) -> Result<(), AnyError> {
    let layout = Layout::new(width, height);
    let root = BitMapBackend::new(out, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (left, right) = root.split_horizontally(width / 2);
    let (map, colorbar) = left.split_horizontally((width / 2).saturating_sub(layout.colorbar_width));
    let scale = AltitudeScale::new(points.iter().map(|p| p.altitude));

    draw_locations(&map, points, &scale, &layout)?;
    draw_colorbar(&colorbar, &scale, &layout)?;
    draw_altitudes(&right, points, &layout)?;

    root.present()
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn draw_locations(
    area: &Area,
    points: &[ProjectedPoint],
    scale: &AltitudeScale,
    layout: &Layout,
) -> Result<(), AnyError> {
    let x_range = padded_range(points.iter().map(|p| p.easting));
    let y_range = padded_range(points.iter().map(|p| p.northing));

    let mut chart = ChartBuilder::on(area)
        .caption("Photo Locations in UTM Coordinates", (FONT, layout.title))
        .margin(layout.margin)
        .x_label_area_size(layout.label_area)
        .y_label_area_size(layout.label_area)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let grid_style = GRID_COLOR.stroke_width(layout.grid_width);
    chart.draw_series(
        grid_lines(&x_range, grid_step(x_range.end - x_range.start))
            .map(|x| PathElement::new(vec![(x, y_range.start), (x, y_range.end)], grid_style)),
    )?;
    chart.draw_series(
        grid_lines(&y_range, grid_step(y_range.end - y_range.start))
            .map(|y| PathElement::new(vec![(x_range.start, y), (x_range.end, y)], grid_style)),
    )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("UTM Easting (meters)")
        .y_desc("UTM Northing (meters)")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .label_style((FONT, layout.label))
        .axis_desc_style((FONT, layout.desc))
        .draw()?;

    chart.draw_series(points.iter().map(|p| {
        Circle::new(
            (p.easting, p.northing),
            layout.marker,
            scale.color(p.altitude).filled(),
        )
    }))?;

    Ok(())
}

fn draw_colorbar(area: &Area, scale: &AltitudeScale, layout: &Layout) -> Result<(), AnyError> {
    let range = scale.range();
    let mut chart = ChartBuilder::on(area)
        .margin(layout.margin)
        .margin_top(layout.margin + layout.title)
        .x_label_area_size(layout.label_area)
        .right_y_label_area_size(layout.label_area)
        .build_cartesian_2d(0.0..1.0, range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Altitude (meters)")
        .y_label_formatter(&|y| format!("{y:.1}"))
        .label_style((FONT, layout.label))
        .axis_desc_style((FONT, layout.desc))
        .draw()?;

    let step = (range.end - range.start) / f64::from(COLORBAR_STEPS);
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = range.start + step * f64::from(i);
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            scale.color(lo + step / 2.0).filled(),
        )
    }))?;

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_altitudes(area: &Area, points: &[ProjectedPoint], layout: &Layout) -> Result<(), AnyError> {
    let x_range = -0.5..(points.len().max(1) as f64 - 0.5);
    let y_range = padded_range(points.iter().map(|p| p.altitude));

    let mut chart = ChartBuilder::on(area)
        .caption("Z Offsets", (FONT, layout.title))
        .margin(layout.margin)
        .x_label_area_size(layout.label_area)
        .y_label_area_size(layout.label_area)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Photo Index")
        .y_desc("Altitude (meters)")
        .x_label_formatter(&index_label)
        .y_label_formatter(&|y| format!("{y:.1}"))
        .label_style((FONT, layout.label))
        .axis_desc_style((FONT, layout.desc))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .enumerate()
            .map(|(i, p)| Circle::new((i as f64, p.altitude), layout.marker, BLUE.filled())),
    )?;

    Ok(())
}

/// Labels whole indices only.
fn index_label(x: &f64) -> String {
    if x.fract() == 0.0 {
        format!("{x:.0}")
    } else {
        String::new()
    }
}

/// Maps altitudes onto the viridis color scale.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AltitudeScale {
    min: f64,
    max: f64,
}

impl AltitudeScale {
    /// Returns a scale spanning `altitudes`.
    ///
    /// When all altitudes are equal (or there are none) the scale is
    /// widened upward by one meter, so every point maps to the low end
    /// of the scale.
    fn new(altitudes: impl Iterator<Item = f64>) -> Self {
        let (min, max) = match min_max(altitudes) {
            Some((min, max)) if max > min => (min, max),
            Some((min, _)) => (min, min + 1.0),
            None => (0.0, 1.0),
        };
        Self { min, max }
    }

    fn range(&self) -> Range<f64> {
        self.min..self.max
    }

    fn color(&self, altitude: f64) -> RGBColor {
        ViridisRGB::get_color_normalized(altitude, self.min, self.max)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Returns the span of `values` widened by 5% (at least 1 m) on each
/// side, or `0..1` for no values.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match min_max(values) {
        Some((min, max)) => {
            let pad = ((max - min) * 0.05).max(1.0);
            (min - pad)..(max + pad)
        }
        None => 0.0..1.0,
    }
}

/// Returns the gridline spacing for an axis spanning `span` meters:
/// 1 m, or the smallest 1-2-5 multiple of it yielding no more than
/// [MAX_GRID_LINES] lines.
fn grid_step(span: f64) -> f64 {
    if !span.is_finite() {
        return f64::INFINITY;
    }
    let mut step = 1.0;
    for multiplier in GRID_STEP_MULTIPLIERS.iter().cycle() {
        if span / step <= MAX_GRID_LINES {
            break;
        }
        step *= multiplier;
    }
    step
}

/// Returns the multiples of `step` inside `range`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn grid_lines(range: &Range<f64>, step: f64) -> impl Iterator<Item = f64> {
    let (first, last) = if step.is_finite() {
        (
            (range.start / step).ceil() as i64,
            (range.end / step).floor() as i64,
        )
    } else {
        (1, 0)
    };
    (first..=last).map(move |i| i as f64 * step)
}

/// Pixel sizes of text, markers and spacing, scaled to the raster.
#[derive(Debug, Clone, Copy)]
struct Layout {
    title: u32,
    desc: u32,
    label: u32,
    margin: u32,
    label_area: u32,
    marker: u32,
    grid_width: u32,
    colorbar_width: u32,
}

impl Layout {
    fn new(width: u32, height: u32) -> Self {
        Self {
            title: (height / 40).max(12),
            desc: (height / 60).max(10),
            label: (height / 80).max(9),
            margin: (height / 80).max(5),
            label_area: (height / 16).max(30),
            marker: (height / 400).max(2),
            grid_width: (height / 2400).max(1),
            colorbar_width: (width / 20).max(80),
        }
    }
}
