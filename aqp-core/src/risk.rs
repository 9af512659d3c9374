//! Synthetic pollutant risk scores on a 0-100 scale.

use crate::pollutant;
use aqp_utils::numbers::round2;
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score below this is `Low` risk.
pub const LOW_CUTOFF: f64 = 33.0;
/// Score below this (and at or above [`LOW_CUTOFF`]) is `Moderate` risk.
pub const MODERATE_CUTOFF: f64 = 66.0;
/// Top of the risk scale.
pub const SCALE_MAX: f64 = 100.0;

/// Pollutants scored in every risk summary.
pub const RISK_POLLUTANTS: [&str; 4] = ["PM2.5", "PM10", "NO2", "O3"];

/// Risk category, in ascending order of severity.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    /// Derive the category from a score. The cut points are exhaustive and
    /// mutually exclusive: `Low` < 33, `Moderate` [33, 66), `High` >= 66.
    pub fn from_score(score: f64) -> Self {
        if score < LOW_CUTOFF {
            RiskCategory::Low
        } else if score < MODERATE_CUTOFF {
            RiskCategory::Moderate
        } else {
            RiskCategory::High
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "Low"),
            RiskCategory::Moderate => write!(f, "Moderate"),
            RiskCategory::High => write!(f, "High"),
        }
    }
}

/// A scored pollutant with its derived category.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    pub pollutant: String,
    pub score_0_100: f64,
    pub category: RiskCategory,
    pub threshold_used: f64,
}

impl RiskScore {
    /// Build a score record; the category is always derived from the score
    /// here so the two can never desynchronize.
    pub fn new(pollutant: impl Into<String>, score: f64, threshold: f64) -> Self {
        RiskScore {
            pollutant: pollutant.into(),
            score_0_100: score,
            category: RiskCategory::from_score(score),
            threshold_used: threshold,
        }
    }
}

/// Risk summary response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RiskSummaryResponse {
    pub region: String,
    pub timestamp: DateTime<Utc>,
    pub risk_scores: Vec<RiskScore>,
}

/// Generate a score for each of the four fixed pollutants: uniform in
/// [10, 90), with the contextual threshold picked by pollutant family.
pub fn generate_risk_scores(region: &str) -> Vec<RiskScore> {
    log::debug!("generating risk scores for {}", region);
    let mut rng = StdRng::from_entropy();
    RISK_POLLUTANTS
        .iter()
        .map(|pollutant| {
            let score = round2(rng.gen_range(10.0..90.0));
            RiskScore::new(*pollutant, score, pollutant::risk_threshold_for(pollutant))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_cut_points() {
        assert_eq!(RiskCategory::from_score(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(32.99), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(33.0), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(65.99), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(66.0), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(100.0), RiskCategory::High);
    }

    #[test]
    fn test_category_matches_score_for_generated_summaries() {
        for score in generate_risk_scores("Delhi NCR") {
            assert_eq!(score.category, RiskCategory::from_score(score.score_0_100));
            assert!(score.score_0_100 >= 10.0);
            assert!(score.score_0_100 <= 90.0);
        }
    }

    #[test]
    fn test_summary_covers_fixed_pollutants() {
        let scores = generate_risk_scores("Delhi NCR");
        let pollutants: Vec<&str> = scores.iter().map(|s| s.pollutant.as_str()).collect();
        assert_eq!(pollutants, RISK_POLLUTANTS);
    }

    #[test]
    fn test_thresholds_by_family() {
        let scores = generate_risk_scores("Delhi NCR");
        for score in scores {
            let expected = if score.pollutant.starts_with("PM") {
                50.0
            } else {
                40.0
            };
            assert_eq!(score.threshold_used, expected);
        }
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&RiskCategory::Moderate).unwrap();
        assert_eq!(json, "\"Moderate\"");
    }
}
