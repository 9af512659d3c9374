//! Synthetic source attribution.
//!
//! Each call draws an independent magnitude per source and reports every
//! source's percentage share of the drawn total, so the shares always sum
//! to ~100 regardless of the magnitudes.

use aqp_utils::numbers::round2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Emission source labels covered by every breakdown.
pub const SOURCES: [&str; 5] = [
    "Traffic",
    "Industry",
    "Construction",
    "Residential",
    "Natural",
];

/// One source's share of the attribution total.
///
/// `value` mirrors `contribution_percent`: both carry the percentage share
/// of the total, matching the upstream feed contract.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AttributionBreakdown {
    pub source: String,
    pub contribution_percent: f64,
    pub value: f64,
}

/// Attribution response envelope. `total` is the sum of the raw drawn
/// magnitudes the shares were computed from.
#[derive(Debug, Clone, Serialize)]
pub struct AttributionResponse {
    pub pollutant: String,
    pub total: f64,
    pub breakdown: Vec<AttributionBreakdown>,
}

/// Generate a breakdown across the five fixed sources: magnitudes uniform
/// in [10, 40), restated as percentage shares of their sum.
///
/// A zero total (unreachable given the draw range, but guarded) yields
/// zero-percent shares rather than a division by zero.
pub fn generate_attribution(pollutant: &str) -> AttributionResponse {
    log::debug!("generating attribution for {}", pollutant);
    let mut rng = StdRng::from_entropy();
    let draws: Vec<f64> = SOURCES.iter().map(|_| rng.gen_range(10.0..40.0)).collect();
    breakdown_from_draws(pollutant, &draws)
}

fn breakdown_from_draws(pollutant: &str, draws: &[f64]) -> AttributionResponse {
    let total: f64 = draws.iter().sum();
    let breakdown = SOURCES
        .iter()
        .zip(draws)
        .map(|(source, &magnitude)| {
            let percent = if total > 0.0 {
                round2(magnitude / total * 100.0)
            } else {
                0.0
            };
            AttributionBreakdown {
                source: (*source).to_string(),
                contribution_percent: percent,
                value: percent,
            }
        })
        .collect();
    AttributionResponse {
        pollutant: pollutant.to_string(),
        total: round2(total),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribution_percentages_sum_to_100() {
        let response = generate_attribution("PM2.5");
        let sum: f64 = response
            .breakdown
            .iter()
            .map(|b| b.contribution_percent)
            .sum();
        assert!((sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_attribution_value_mirrors_percent() {
        let response = generate_attribution("NO2");
        for entry in &response.breakdown {
            assert_eq!(entry.value, entry.contribution_percent);
        }
    }

    #[test]
    fn test_attribution_covers_fixed_sources_in_order() {
        let response = generate_attribution("PM10");
        let labels: Vec<&str> = response.breakdown.iter().map(|b| b.source.as_str()).collect();
        assert_eq!(labels, SOURCES);
    }

    #[test]
    fn test_attribution_zero_total_guard() {
        let response = breakdown_from_draws("PM2.5", &[0.0; 5]);
        assert_eq!(response.total, 0.0);
        for entry in &response.breakdown {
            assert_eq!(entry.contribution_percent, 0.0);
            assert_eq!(entry.value, 0.0);
        }
    }
}
