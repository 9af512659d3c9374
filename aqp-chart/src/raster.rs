//! Raster chart rendering.
//!
//! Draws each chart into a scoped in-memory RGB buffer with plotters and
//! encodes it to PNG bytes. The backend borrow of the buffer ends with its
//! scope on every exit path, including draw errors, so repeated calls
//! never leak drawing surfaces. Output is pure geometry (grid, line,
//! markers, wedges, bars); titles, labels and units travel in the
//! chart-description document form instead, which keeps rendering free of
//! any host font dependency.

use crate::series::{DialChart, SeriesChart, StackedBarChart};
use aqp_core::risk::{LOW_CUTOFF, MODERATE_CUTOFF, SCALE_MAX};
use chrono::{DateTime, Duration, Utc};
use plotters::coord::types::RangedDateTime;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::io::Cursor;

/// Line chart dimensions in pixels.
pub const LINE_CHART_SIZE: (u32, u32) = (900, 360);
/// Risk dial dimensions in pixels.
pub const DIAL_SIZE: (u32, u32) = (600, 300);
/// Stacked attribution bar dimensions in pixels.
pub const BAR_SIZE: (u32, u32) = (800, 200);

/// Needle and band inner radius as a fraction of the dial outer radius.
const DIAL_INNER_RADIUS: f64 = 0.65;

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(204, 204, 204);
const BAND_LOW: RGBColor = RGBColor(44, 160, 44);
const BAND_MODERATE: RGBColor = RGBColor(255, 204, 0);
const BAND_HIGH: RGBColor = RGBColor(214, 39, 40);
const SEGMENT_PALETTE: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

/// Raster rendering failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("empty series: nothing to draw")]
    EmptySeries,

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("png encoding failed: {0}")]
    Encode(String),
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Map a dial value onto the semicircle needle angle in radians, measured
/// from the rightmost point: 0 maps to pi (leftmost), 100 maps to 0
/// (rightmost).
pub fn needle_angle(value: f64) -> f64 {
    PI * (1.0 - value.clamp(0.0, SCALE_MAX) / SCALE_MAX)
}

/// Render a (timestamp, value) series as a connected, marker-annotated
/// line chart.
pub fn line_chart_png(chart: &SeriesChart) -> Result<Vec<u8>, RenderError> {
    if chart.points.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    log::debug!("rendering line chart with {} points", chart.points.len());
    let (width, height) = LINE_CHART_SIZE;
    let mut frame = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut frame, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let start = chart.points[0].0;
        let mut end = chart.points[chart.points.len() - 1].0;
        if end <= start {
            // Single-point series: pad the domain so the axis is non-degenerate.
            end = start + Duration::hours(1);
        }
        let x_range: RangedDateTime<DateTime<Utc>> = (start..end).into();
        let y_max = chart.points.iter().map(|&(_, v)| v).fold(0.0f64, f64::max) + 10.0;

        let mut ctx = ChartBuilder::on(&root)
            .margin(20i32)
            .x_label_area_size(20u32)
            .y_label_area_size(40u32)
            .build_cartesian_2d(x_range, 0f64..y_max)
            .map_err(draw_err)?;

        ctx.draw_series((1..5).map(|i| {
            let y = y_max * f64::from(i) / 5.0;
            PathElement::new(vec![(start, y), (end, y)], GRID_COLOR)
        }))
        .map_err(draw_err)?;

        ctx.draw_series(LineSeries::new(
            chart.points.iter().copied(),
            SERIES_COLOR.stroke_width(2),
        ))
        .map_err(draw_err)?;

        ctx.draw_series(
            chart
                .points
                .iter()
                .map(|&(ts, v)| Circle::new((ts, v), 3, SERIES_COLOR.filled())),
        )
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }
    encode_png(width, height, frame)
}

/// Render a scalar in [0, 100] as a semicircular dial: three fixed color
/// bands beneath a needle positioned by [`needle_angle`].
pub fn risk_dial_png(dial: &DialChart) -> Result<Vec<u8>, RenderError> {
    log::debug!("rendering risk dial at value {}", dial.value);
    let (width, height) = DIAL_SIZE;
    let mut frame = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut frame, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .margin(10i32)
            .build_cartesian_2d(-1.1f64..1.1f64, -0.05f64..1.15f64)
            .map_err(draw_err)?;

        // The band boundaries are the risk cut-point constants shared with
        // the document form.
        let bands = [
            (0.0, LOW_CUTOFF, BAND_LOW),
            (LOW_CUTOFF, MODERATE_CUTOFF, BAND_MODERATE),
            (MODERATE_CUTOFF, SCALE_MAX, BAND_HIGH),
        ];
        for (from, to, color) in bands {
            ctx.draw_series(std::iter::once(Polygon::new(
                band_polygon(from, to),
                color.filled(),
            )))
            .map_err(draw_err)?;
        }

        let theta = needle_angle(dial.value);
        let tip = (DIAL_INNER_RADIUS * theta.cos(), DIAL_INNER_RADIUS * theta.sin());
        ctx.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), tip],
            BLACK.stroke_width(3),
        )))
        .map_err(draw_err)?;
        ctx.draw_series(std::iter::once(Circle::new((0.0, 0.0), 6, BLACK.filled())))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }
    encode_png(width, height, frame)
}

/// Render an ordered percentage breakdown as one stacked horizontal bar.
///
/// Segments are drawn in input order with a running left offset; the
/// total never exceeds the fixed 0-100 domain.
pub fn attribution_bar_png(bar: &StackedBarChart) -> Result<Vec<u8>, RenderError> {
    log::debug!("rendering attribution bar with {} segments", bar.segments.len());
    let (width, height) = BAR_SIZE;
    let mut frame = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut frame, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .margin(10i32)
            .build_cartesian_2d(0f64..100f64, 0f64..1f64)
            .map_err(draw_err)?;

        let mut left = 0.0f64;
        for (i, segment) in bar.segments.iter().enumerate() {
            let color = SEGMENT_PALETTE[i % SEGMENT_PALETTE.len()];
            let right = (left + segment.percent.max(0.0)).min(100.0);
            ctx.draw_series(std::iter::once(Rectangle::new(
                [(left, 0.3), (right, 0.7)],
                color.filled(),
            )))
            .map_err(draw_err)?;
            left = right;
        }

        root.present().map_err(draw_err)?;
    }
    encode_png(width, height, frame)
}

/// Annulus wedge between two dial values, as a closed polygon: outer arc
/// forward, inner arc back.
fn band_polygon(from: f64, to: f64) -> Vec<(f64, f64)> {
    const STEPS: usize = 32;
    let mut points = Vec::with_capacity(2 * (STEPS + 1));
    for i in 0..=STEPS {
        let v = from + (to - from) * i as f64 / STEPS as f64;
        let theta = needle_angle(v);
        points.push((theta.cos(), theta.sin()));
    }
    for i in (0..=STEPS).rev() {
        let v = from + (to - from) * i as f64 / STEPS as f64;
        let theta = needle_angle(v);
        points.push((DIAL_INNER_RADIUS * theta.cos(), DIAL_INNER_RADIUS * theta.sin()));
    }
    points
}

fn encode_png(width: u32, height: u32, frame: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    let img = image::RgbImage::from_raw(width, height, frame)
        .ok_or_else(|| RenderError::Encode("pixel buffer size mismatch".to_string()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}
