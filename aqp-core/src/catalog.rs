//! Read-only catalog of seeded stations and alerts.
//!
//! The catalog is constructed once at startup and injected into the query
//! layer; nothing mutates it afterwards, so it can be shared freely across
//! concurrent request handlers without locking.

use crate::alert::AlertRecord;
use crate::error::TelemetryError;
use crate::station::Station;
use chrono::{DateTime, Utc};

/// In-memory registry of stations and alert records.
#[derive(Debug, Clone)]
pub struct TelemetryCatalog {
    stations: Vec<Station>,
    alerts: Vec<AlertRecord>,
}

impl TelemetryCatalog {
    /// Build a catalog from explicit collections (used by tests and any
    /// caller with its own fixtures).
    pub fn new(stations: Vec<Station>, alerts: Vec<AlertRecord>) -> Self {
        TelemetryCatalog { stations, alerts }
    }

    /// Build the catalog from the embedded CSV fixtures; alert timestamps
    /// are stamped with the load time.
    pub fn from_fixtures() -> Self {
        TelemetryCatalog::new(
            Station::get_station_vector(),
            AlertRecord::get_alert_vector(Utc::now()),
        )
    }

    /// The station used when a request supplies no station id.
    pub fn default_station(&self) -> Option<&Station> {
        self.stations.first()
    }

    /// Get a page of stations, filtered by exact region match when given.
    ///
    /// An offset beyond the end of the collection yields an empty page,
    /// not an error.
    pub fn list_stations(
        &self,
        region: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Vec<Station> {
        let page: Vec<Station> = self
            .stations
            .iter()
            .filter(|s| region.map_or(true, |r| s.region == r))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        log::info!("query: list_stations returned {} records", page.len());
        page
    }

    /// Look up a station by id.
    pub fn get_station(&self, station_id: &str) -> Result<&Station, TelemetryError> {
        self.stations
            .iter()
            .find(|s| s.station_id == station_id)
            .ok_or_else(|| TelemetryError::StationNotFound(station_id.to_string()))
    }

    /// Get alerts, filtered by station region and minimum timestamp when
    /// given.
    ///
    /// The region filter resolves each alert's station through its weak
    /// reference; an alert whose station id does not resolve is excluded
    /// from region-filtered results but is not itself an error.
    pub fn list_alerts(
        &self,
        region: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Vec<AlertRecord> {
        let matches: Vec<AlertRecord> = self
            .alerts
            .iter()
            .filter(|a| {
                region.map_or(true, |r| {
                    self.stations
                        .iter()
                        .any(|s| s.station_id == a.station_id && s.region == r)
                })
            })
            .filter(|a| since.map_or(true, |cutoff| a.ts >= cutoff))
            .cloned()
            .collect();
        log::info!("query: list_alerts returned {} records", matches.len());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::TelemetryCatalog;
    use crate::alert::{AlertRecord, AlertStatus};
    use crate::error::TelemetryError;
    use chrono::{Duration, Utc};

    #[test]
    fn test_list_stations_region_page() {
        let catalog = TelemetryCatalog::from_fixtures();
        let page = catalog.list_stations(Some("Delhi NCR"), 1, 0);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].station_id, "ST-DEL-001");
    }

    #[test]
    fn test_list_stations_offset_beyond_collection() {
        let catalog = TelemetryCatalog::from_fixtures();
        let page = catalog.list_stations(None, 50, 5);
        assert!(page.is_empty());
    }

    #[test]
    fn test_list_stations_unknown_region() {
        let catalog = TelemetryCatalog::from_fixtures();
        assert!(catalog.list_stations(Some("Nowhere"), 50, 0).is_empty());
    }

    #[test]
    fn test_get_station() {
        let catalog = TelemetryCatalog::from_fixtures();
        let station = catalog.get_station("ST-DEL-002").unwrap();
        assert_eq!(station.name, "Gurgaon - Sector 14");
        assert_eq!(
            catalog.get_station("ST-XXX-999"),
            Err(TelemetryError::StationNotFound("ST-XXX-999".to_string()))
        );
    }

    #[test]
    fn test_default_station() {
        let catalog = TelemetryCatalog::from_fixtures();
        assert_eq!(
            catalog.default_station().unwrap().station_id,
            "ST-DEL-001"
        );
    }

    #[test]
    fn test_list_alerts_region_filter() {
        let catalog = TelemetryCatalog::from_fixtures();
        let matched = catalog.list_alerts(Some("Delhi NCR"), None);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].alert_id, "A-001");
        assert!(catalog.list_alerts(Some("Nowhere"), None).is_empty());
    }

    #[test]
    fn test_list_alerts_since_cutoff() {
        let catalog = TelemetryCatalog::from_fixtures();
        let past = Utc::now() - Duration::hours(1);
        assert_eq!(catalog.list_alerts(None, Some(past)).len(), 1);
        let future = Utc::now() + Duration::hours(1);
        assert!(catalog.list_alerts(None, Some(future)).is_empty());
    }

    #[test]
    fn test_list_alerts_dangling_station_reference() {
        let dangling = AlertRecord {
            alert_id: "A-777".to_string(),
            station_id: "ST-GONE-000".to_string(),
            pollutant: "NO2".to_string(),
            threshold: 40.0,
            observed_value: 61.0,
            ts: Utc::now(),
            status: AlertStatus::Active,
        };
        let catalog = TelemetryCatalog::new(
            crate::station::Station::get_station_vector(),
            vec![dangling.clone()],
        );
        // Excluded under a region filter, still listed without one.
        assert!(catalog.list_alerts(Some("Delhi NCR"), None).is_empty());
        assert_eq!(catalog.list_alerts(None, None), vec![dangling]);
    }
}
