//! Query command implementations: catalog lookups and synthetic telemetry
//! generation, serialized as pretty JSON on stdout.

use aqp_core::attribution::generate_attribution;
use aqp_core::catalog::TelemetryCatalog;
use aqp_core::error::TelemetryError;
use aqp_core::forecast::{generate_forecast, ForecastResponse};
use aqp_core::pollutant;
use aqp_core::risk::{generate_risk_scores, RiskSummaryResponse};
use aqp_core::timeseries::{generate_timeseries, TimeSeriesResponse};
use aqp_utils::{dates, spans};
use chrono::Utc;
use log::info;

/// Region used when a risk summary request names none.
pub const DEFAULT_REGION: &str = "Delhi NCR";

/// Resolve the effective station id: an explicit id must exist in the
/// catalog, an absent one falls back to the first known station.
pub fn resolve_station_id(
    catalog: &TelemetryCatalog,
    station_id: Option<&str>,
) -> anyhow::Result<String> {
    match station_id {
        Some(id) => Ok(catalog.get_station(id)?.station_id.clone()),
        None => catalog
            .default_station()
            .map(|s| s.station_id.clone())
            .ok_or_else(|| anyhow::anyhow!("catalog has no stations")),
    }
}

pub fn run_stations(
    catalog: &TelemetryCatalog,
    region: Option<&str>,
    limit: usize,
    offset: usize,
) -> anyhow::Result<()> {
    let page = catalog.list_stations(region, limit, offset);
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

pub fn run_station(catalog: &TelemetryCatalog, station_id: &str) -> anyhow::Result<()> {
    let station = catalog.get_station(station_id)?;
    println!("{}", serde_json::to_string_pretty(station)?);
    Ok(())
}

pub fn run_alerts(
    catalog: &TelemetryCatalog,
    region: Option<&str>,
    since: Option<&str>,
) -> anyhow::Result<()> {
    let since = match since {
        Some(raw) => Some(dates::parse_ts(raw).map_err(|_| {
            TelemetryError::InvalidParameter(format!("since must be RFC 3339, got {:?}", raw))
        })?),
        None => None,
    };
    let alerts = catalog.list_alerts(region, since);
    println!("{}", serde_json::to_string_pretty(&alerts)?);
    Ok(())
}

pub fn run_forecast(
    catalog: &TelemetryCatalog,
    station_id: Option<&str>,
    pollutant: &str,
    horizon: &str,
) -> anyhow::Result<()> {
    let station_id = resolve_station_id(catalog, station_id)?;
    let hours = spans::horizon_hours(horizon);
    let forecasts = generate_forecast(&station_id, pollutant, hours);
    info!(
        "generated {} forecast points for {}/{}",
        forecasts.len(),
        station_id,
        pollutant
    );
    let response = ForecastResponse {
        station_id,
        pollutant: pollutant.to_string(),
        units: pollutant::units_for(pollutant).to_string(),
        horizon: horizon.to_string(),
        forecasts,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn run_timeseries(
    catalog: &TelemetryCatalog,
    station_id: Option<&str>,
    pollutant: &str,
    window: &str,
) -> anyhow::Result<()> {
    let station_id = resolve_station_id(catalog, station_id)?;
    let hours = spans::window_hours(window);
    let series = generate_timeseries(&station_id, pollutant, hours);
    info!(
        "generated {} observed points for {}/{}",
        series.len(),
        station_id,
        pollutant
    );
    let response = TimeSeriesResponse {
        station_id,
        pollutant: pollutant.to_string(),
        units: pollutant::units_for(pollutant).to_string(),
        series,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn run_risk(region: Option<&str>) -> anyhow::Result<()> {
    let region = region.unwrap_or(DEFAULT_REGION);
    let response = RiskSummaryResponse {
        region: region.to_string(),
        timestamp: Utc::now(),
        risk_scores: generate_risk_scores(region),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn run_attribution(pollutant: &str) -> anyhow::Result<()> {
    let response = generate_attribution(pollutant);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_station_id;
    use aqp_core::catalog::TelemetryCatalog;

    #[test]
    fn test_resolve_station_id_defaults_to_first() {
        let catalog = TelemetryCatalog::from_fixtures();
        assert_eq!(resolve_station_id(&catalog, None).unwrap(), "ST-DEL-001");
        assert_eq!(
            resolve_station_id(&catalog, Some("ST-DEL-002")).unwrap(),
            "ST-DEL-002"
        );
    }

    #[test]
    fn test_resolve_station_id_unknown_is_not_found() {
        let catalog = TelemetryCatalog::from_fixtures();
        assert!(resolve_station_id(&catalog, Some("ST-NOPE-000")).is_err());
    }

    #[test]
    fn test_resolve_station_id_empty_catalog() {
        let catalog = TelemetryCatalog::new(vec![], vec![]);
        assert!(resolve_station_id(&catalog, None).is_err());
    }
}
