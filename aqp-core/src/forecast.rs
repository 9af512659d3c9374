//! Synthetic hourly pollutant forecasts.
//!
//! Values follow a smooth sinusoidal oscillation around a per-family
//! baseline with a bounded random component added on top, so successive
//! points show a visible trend while two calls with identical inputs still
//! differ in the noise term. This is a demonstration generator, not a
//! model.

use crate::pollutant;
use aqp_utils::numbers::round2;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Label identifying the generator revision.
pub const MODEL_VERSION: &str = "mock-v0.3";

/// Half-width of the fixed confidence band around each forecast value.
pub const CONFIDENCE_SPREAD: f64 = 8.0;

/// A single forecast point.
///
/// When the confidence bounds are present they bracket the value:
/// `0 <= ci_lower <= value <= ci_upper`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ts: DateTime<Utc>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

/// Forecast response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub station_id: String,
    pub pollutant: String,
    pub units: String,
    pub horizon: String,
    pub forecasts: Vec<ForecastPoint>,
}

/// Generate `hours` future points at hourly granularity starting at "now".
///
/// Each call draws from its own entropy-seeded generator, so concurrent
/// callers never share RNG state.
pub fn generate_forecast(station_id: &str, pollutant: &str, hours: u32) -> Vec<ForecastPoint> {
    log::debug!("generating {}h forecast for {}/{}", hours, station_id, pollutant);
    let mut rng = StdRng::from_entropy();
    let base = if pollutant::is_pm_family(pollutant) {
        80.0
    } else {
        30.0
    };
    let now = Utc::now();
    (0..hours)
        .map(|h| {
            let ts = now + Duration::hours(i64::from(h));
            let noise = ((f64::from(h) / 6.0).sin() + rng.gen::<f64>() * 0.6) * 10.0;
            let value = round2((base + noise).max(0.0));
            ForecastPoint {
                ts,
                value,
                ci_lower: Some(round2((value - CONFIDENCE_SPREAD).max(0.0))),
                ci_upper: Some(round2(value + CONFIDENCE_SPREAD)),
                model_version: Some(MODEL_VERSION.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_point_count_and_ordering() {
        let points = generate_forecast("ST-DEL-001", "PM2.5", 24);
        assert_eq!(points.len(), 24);
        for pair in points.windows(2) {
            assert_eq!(pair[1].ts - pair[0].ts, Duration::hours(1));
        }
    }

    #[test]
    fn test_forecast_confidence_bounds_bracket_value() {
        for point in generate_forecast("ST-DEL-001", "NO2", 72) {
            let lower = point.ci_lower.unwrap();
            let upper = point.ci_upper.unwrap();
            assert!(lower >= 0.0);
            assert!(lower <= point.value);
            assert!(point.value <= upper);
            assert_eq!(point.model_version.as_deref(), Some(MODEL_VERSION));
        }
    }

    #[test]
    fn test_forecast_pm_baseline_above_gas_baseline() {
        // With noise bounded to [-10, 16] around the baselines (80 vs 30)
        // every PM value must clear every gas-phase value.
        let pm = generate_forecast("ST-DEL-001", "PM2.5", 24);
        let gas = generate_forecast("ST-DEL-001", "O3", 24);
        let pm_min = pm.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let gas_max = gas.iter().map(|p| p.value).fold(0.0, f64::max);
        assert!(pm_min > gas_max);
    }

    #[test]
    fn test_forecast_zero_hours() {
        assert!(generate_forecast("ST-DEL-001", "PM2.5", 0).is_empty());
    }

    #[test]
    fn test_concurrent_forecast_generation() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| generate_forecast("ST-DEL-001", "PM2.5", 24)))
            .collect();
        for handle in handles {
            let points = handle.join().unwrap();
            assert_eq!(points.len(), 24);
            for pair in points.windows(2) {
                assert_eq!(pair[1].ts - pair[0].ts, Duration::hours(1));
            }
        }
    }
}
