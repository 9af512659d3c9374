//! Chart-description documents.
//!
//! Structured, non-raster chart representations for a web chart renderer.
//! All structs derive `Serialize` so they can be handed to the frontend as
//! JSON; the numeric content is always the same series the raster path
//! drew, projected without regeneration.

use crate::series::{DialChart, Segment, SeriesChart, StackedBarChart};
use aqp_core::risk;
use aqp_utils::dates;
use serde::{Deserialize, Serialize};

/// Series kind emitted for line charts.
pub const SERIES_KIND_SCATTER: &str = "scatter";

/// One named data series of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(rename = "seriesKind")]
    pub series_kind: String,
    pub name: String,
}

/// Line chart layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartLayout {
    pub title: String,
    #[serde(rename = "xAxisLabel", skip_serializing_if = "Option::is_none")]
    pub x_axis_label: Option<String>,
    #[serde(rename = "yAxisLabel", skip_serializing_if = "Option::is_none")]
    pub y_axis_label: Option<String>,
}

/// Declarative line chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartDocument {
    pub data: Vec<SeriesTrace>,
    pub layout: LineChartLayout,
}

/// Project a line-chart intermediate into its document form.
pub fn line_chart(chart: &SeriesChart) -> LineChartDocument {
    LineChartDocument {
        data: vec![SeriesTrace {
            x: chart.points.iter().map(|(ts, _)| dates::format_ts(ts)).collect(),
            y: chart.values(),
            series_kind: SERIES_KIND_SCATTER.to_string(),
            name: chart.series_name.clone(),
        }],
        layout: LineChartLayout {
            title: chart.title.clone(),
            x_axis_label: Some("Time".to_string()),
            y_axis_label: Some(chart.y_label.clone()),
        },
    }
}

/// The three fixed dial band boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialThresholds {
    pub low: f64,
    pub med: f64,
    pub high: f64,
}

/// Declarative risk dial description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialDocument {
    pub value: f64,
    pub label: String,
    pub thresholds: DialThresholds,
    pub units: String,
}

/// Project a dial intermediate into its document form.
///
/// The threshold boundaries are the same risk cut-point constants the
/// raster bands are drawn from, not re-derived values.
pub fn risk_dial(dial: &DialChart) -> DialDocument {
    DialDocument {
        value: dial.value,
        label: dial.label.clone(),
        thresholds: DialThresholds {
            low: risk::LOW_CUTOFF,
            med: risk::MODERATE_CUTOFF,
            high: risk::SCALE_MAX,
        },
        units: dial.units.clone(),
    }
}

/// One stacked group of ordered segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentGroup {
    pub segments: Vec<Segment>,
}

/// Stacked bar layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub title: String,
}

/// Declarative stacked attribution bar description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarDocument {
    pub data: Vec<SegmentGroup>,
    pub layout: BarLayout,
}

/// Project a stacked-bar intermediate into its document form; segment
/// order matches the left-to-right draw order.
pub fn attribution_bar(bar: &StackedBarChart) -> StackedBarDocument {
    StackedBarDocument {
        data: vec![SegmentGroup {
            segments: bar.segments.clone(),
        }],
        layout: BarLayout {
            title: bar.title.clone(),
        },
    }
}
