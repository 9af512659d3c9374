use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV data for the seeded alerts.
pub static ALERTS_CSV: &str = include_str!("../fixtures/alerts.csv");

/// Lifecycle state of an alert.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

/// A threshold-breach alert raised for a station/pollutant pair.
///
/// `station_id` is a weak reference into the station collection: it is
/// resolved at query time and a dangling id is never an error.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub alert_id: String,
    pub station_id: String,
    pub pollutant: String,
    pub threshold: f64,
    pub observed_value: f64,
    pub ts: DateTime<Utc>,
    pub status: AlertStatus,
}

impl AlertRecord {
    /// Get the alert vector from the embedded fixture, stamped with the
    /// given load time.
    pub fn get_alert_vector(loaded_at: DateTime<Utc>) -> Vec<AlertRecord> {
        if let Ok(a) = AlertRecord::parse_alert_csv(ALERTS_CSV, loaded_at) {
            a
        } else {
            panic!("failed to parse alerts csv fixture")
        }
    }

    /// Parse an alert CSV string into a vector of AlertRecords.
    ///
    /// Expected columns: alert_id, station_id, pollutant, threshold,
    /// observed_value, status. Timestamps are not stored in the fixture;
    /// every record is stamped with `loaded_at`.
    pub fn parse_alert_csv(
        csv_object: &str,
        loaded_at: DateTime<Utc>,
    ) -> Result<Vec<AlertRecord>, std::io::Error> {
        let mut alert_list: Vec<AlertRecord> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let threshold = record
                .get(3)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let observed_value = record
                .get(4)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let status = match record.get(5).unwrap_or("active").trim() {
                "active" => AlertStatus::Active,
                _ => AlertStatus::Resolved,
            };
            alert_list.push(AlertRecord {
                alert_id: String::from(record.get(0).expect("alert_id parse fail")),
                station_id: String::from(record.get(1).expect("station_id parse fail")),
                pollutant: String::from(record.get(2).expect("pollutant parse fail")),
                threshold,
                observed_value,
                ts: loaded_at,
                status,
            });
        }
        Ok(alert_list)
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertRecord, AlertStatus};
    use chrono::Utc;

    #[test]
    fn test_alert_vector() {
        let now = Utc::now();
        let alerts = AlertRecord::get_alert_vector(now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_id, "A-001");
        assert_eq!(alerts[0].station_id, "ST-DEL-001");
        assert_eq!(alerts[0].pollutant, "PM2.5");
        assert_eq!(alerts[0].threshold, 60.0);
        assert_eq!(alerts[0].observed_value, 82.0);
        assert_eq!(alerts[0].status, AlertStatus::Active);
        assert_eq!(alerts[0].ts, now);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AlertStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn test_parse_alert_csv_unknown_status() {
        let csv_data = "\
alert_id,station_id,pollutant,threshold,observed_value,status
A-900,ST-X,NO2,40.0,55.5,stale
";
        let alerts = AlertRecord::parse_alert_csv(csv_data, Utc::now()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, AlertStatus::Resolved);
    }
}
