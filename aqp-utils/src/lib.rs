//! Shared utility functions for AQP crates.

/// Timestamp utility functions
pub mod dates {
    use chrono::{DateTime, Utc};

    /// Timestamp format used in chart documents: "YYYY-MM-DDTHH:MM:SSZ"
    pub const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    /// Format a UTC timestamp as "YYYY-MM-DDTHH:MM:SSZ"
    pub fn format_ts(ts: &DateTime<Utc>) -> String {
        ts.format(TS_FORMAT).to_string()
    }

    /// Parse an RFC 3339 timestamp string into a UTC timestamp
    pub fn parse_ts(s: &str) -> anyhow::Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
    }

}

/// Horizon and window span parsing.
///
/// A horizon is the forward-looking span for forecasts, expressed as one of
/// a small set of labels ("24h", "72h", "7d"). A window is the
/// backward-looking span for observed series, expressed as "<N>h".
/// Both parsers are total: unrecognized input falls back to the default
/// span rather than erroring, and window lengths clamp to a bounded range.
pub mod spans {
    /// Hours covered by the default forecast horizon.
    pub const DEFAULT_HORIZON_HOURS: u32 = 24;
    /// Hours covered by the default observed window.
    pub const DEFAULT_WINDOW_HOURS: u32 = 48;
    /// Upper bound on observed window length (30 days).
    pub const MAX_WINDOW_HOURS: u32 = 720;

    /// Map a horizon label to an hour count.
    pub fn horizon_hours(label: &str) -> u32 {
        match label {
            "7d" => 168,
            "72h" => 72,
            _ => DEFAULT_HORIZON_HOURS,
        }
    }

    /// Parse a "<N>h" window string into an hour count, clamped to
    /// [`MAX_WINDOW_HOURS`].
    pub fn window_hours(window: &str) -> u32 {
        window
            .strip_suffix('h')
            .and_then(|s| s.parse::<u32>().ok())
            .map(|h| h.min(MAX_WINDOW_HOURS))
            .unwrap_or(DEFAULT_WINDOW_HOURS)
    }

}

/// Numeric helpers
pub mod numbers {
    /// Round a value to two decimal places.
    pub fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }

}
