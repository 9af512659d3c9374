//! Synthetic observed time series.
//!
//! Unlike the forecast path there is no smoothing: each reading is an
//! independent uniform draw over a fixed plausible range, modelling raw
//! noisy sensor output.

use aqp_utils::numbers::round2;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Quality flag attached to every synthetic reading.
pub const QA_GOOD: &str = "good";

/// A single observed reading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub ts: DateTime<Utc>,
    pub value: f64,
    pub qa_flag: String,
}

/// Observed time-series response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesResponse {
    pub station_id: String,
    pub pollutant: String,
    pub units: String,
    pub series: Vec<TimeSeriesPoint>,
}

/// Generate `hours + 1` readings walking from `now - hours` up to "now"
/// inclusive, one per hour.
pub fn generate_timeseries(station_id: &str, pollutant: &str, hours: u32) -> Vec<TimeSeriesPoint> {
    log::debug!("generating {}h series for {}/{}", hours, station_id, pollutant);
    let mut rng = StdRng::from_entropy();
    let now = Utc::now();
    (0..=hours)
        .rev()
        .map(|h| TimeSeriesPoint {
            ts: now - Duration::hours(i64::from(h)),
            value: round2(40.0 + rng.gen::<f64>() * 80.0),
            qa_flag: QA_GOOD.to_string(),
        })
        .collect()
}
