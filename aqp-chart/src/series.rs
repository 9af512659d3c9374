//! Chart intermediates.
//!
//! One intermediate is built per render call and handed to both output
//! paths, so the image and the document can never be derived from
//! different generated values.

use aqp_core::attribution::AttributionResponse;
use aqp_core::forecast::ForecastPoint;
use aqp_core::pollutant;
use aqp_core::risk::RiskScore;
use aqp_core::timeseries::TimeSeriesPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A titled (timestamp, value) series for line charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChart {
    pub title: String,
    pub series_name: String,
    pub y_label: String,
    pub points: Vec<(DateTime<Utc>, f64)>,
}

impl SeriesChart {
    /// Build a line-chart intermediate from forecast points.
    pub fn from_forecast(points: &[ForecastPoint], pollutant: &str, label: &str) -> Self {
        SeriesChart {
            title: format!("{} Forecast ({})", pollutant, label),
            series_name: pollutant.to_string(),
            y_label: pollutant::units_for(pollutant).to_string(),
            points: points.iter().map(|p| (p.ts, p.value)).collect(),
        }
    }

    /// Build a line-chart intermediate from observed readings.
    pub fn from_observations(points: &[TimeSeriesPoint], pollutant: &str, label: &str) -> Self {
        SeriesChart {
            title: format!("{} Time Series ({})", pollutant, label),
            series_name: pollutant.to_string(),
            y_label: pollutant::units_for(pollutant).to_string(),
            points: points.iter().map(|p| (p.ts, p.value)).collect(),
        }
    }

    /// The y values in draw order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, v)| v).collect()
    }
}

/// A scalar in [0, 100] for the semicircular risk dial.
#[derive(Debug, Clone, PartialEq)]
pub struct DialChart {
    pub title: String,
    pub label: String,
    pub value: f64,
    pub units: String,
}

impl DialChart {
    /// Dial for the highest-scoring pollutant of a risk summary.
    ///
    /// Returns `None` for an empty summary.
    pub fn from_top_risk(scores: &[RiskScore], region: &str) -> Option<Self> {
        let top = scores.iter().max_by(|a, b| {
            a.score_0_100
                .partial_cmp(&b.score_0_100)
                .unwrap_or(Ordering::Equal)
        })?;
        Some(DialChart {
            title: format!("Risk (top) - {}", region),
            label: top.pollutant.clone(),
            value: top.score_0_100,
            units: "score".to_string(),
        })
    }
}

/// One contiguous segment of the stacked attribution bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub source: String,
    pub percent: f64,
}

/// Ordered percentage segments for the stacked attribution bar.
///
/// Segment order is draw order: the raster path lays segments out left to
/// right in this order and the document path emits them unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarChart {
    pub title: String,
    pub segments: Vec<Segment>,
}

impl StackedBarChart {
    /// Build a stacked-bar intermediate from an attribution breakdown,
    /// preserving source order.
    pub fn from_attribution(response: &AttributionResponse) -> Self {
        StackedBarChart {
            title: format!("Source Attribution - {}", response.pollutant),
            segments: response
                .breakdown
                .iter()
                .map(|b| Segment {
                    source: b.source.clone(),
                    percent: b.contribution_percent,
                })
                .collect(),
        }
    }
}
