use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Embedded CSV data for the seeded monitoring stations.
pub static STATIONS_CSV: &str = include_str!("../fixtures/stations.csv");

/// Embedded CSV data for per-station sensor descriptors.
pub static SENSORS_CSV: &str = include_str!("../fixtures/sensors.csv");

/// A sensor installed at a monitoring station.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub pollutant: String,
    pub unit: String,
    pub sensor_id: String,
}

/// Represents an air-quality monitoring station with its metadata.
///
/// Stations are immutable after load; identity is `station_id`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Region label used for exact-match filtering (e.g. "Delhi NCR")
    pub region: String,
    /// Free-form tags (e.g. "urban", "suburban")
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensors: Option<Vec<Sensor>>,
}

impl Station {
    /// Get the station vector from the embedded fixtures.
    pub fn get_station_vector() -> Vec<Station> {
        if let Ok(s) = Station::parse_station_csv(STATIONS_CSV, SENSORS_CSV) {
            s
        } else {
            panic!("failed to parse stations csv fixture")
        }
    }

    /// Parse station and sensor CSV strings into a vector of Stations.
    ///
    /// Expected station columns: station_id, name, lat, lon, region, tags
    /// (tags separated by '|'). Expected sensor columns: station_id,
    /// pollutant, unit, sensor_id; sensor rows are joined onto stations by
    /// station_id.
    pub fn parse_station_csv(
        stations_csv: &str,
        sensors_csv: &str,
    ) -> Result<Vec<Station>, std::io::Error> {
        let mut sensors_by_station: HashMap<String, Vec<Sensor>> = HashMap::new();
        let mut sensor_rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(sensors_csv.as_bytes());
        for row in sensor_rdr.records() {
            let record = row?;
            let station_id = String::from(record.get(0).expect("sensor station_id parse fail"));
            let sensor = Sensor {
                pollutant: String::from(record.get(1).expect("sensor pollutant parse fail")),
                unit: String::from(record.get(2).expect("sensor unit parse fail")),
                sensor_id: String::from(record.get(3).expect("sensor_id parse fail")),
            };
            sensors_by_station.entry(station_id).or_default().push(sensor);
        }

        let mut station_list: Vec<Station> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(stations_csv.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let station_id = String::from(record.get(0).expect("station_id parse fail"));
            let name = String::from(record.get(1).expect("name parse fail"));
            let lat = record
                .get(2)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let lon = record
                .get(3)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let region = String::from(record.get(4).expect("region parse fail"));
            let tags = record
                .get(5)
                .unwrap_or("")
                .split('|')
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            let sensors = sensors_by_station.remove(&station_id);
            station_list.push(Station {
                station_id,
                name,
                lat,
                lon,
                region,
                tags,
                sensors,
            });
        }
        Ok(station_list)
    }
}

#[cfg(test)]
mod tests {
    use super::Station;

    #[test]
    fn test_station_vector() {
        let stations = Station::get_station_vector();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_id, "ST-DEL-001");
        assert_eq!(stations[0].region, "Delhi NCR");
        assert_eq!(stations[0].tags, vec!["urban".to_string()]);
        let sensors = stations[0].sensors.as_ref().unwrap();
        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[0].pollutant, "PM2.5");
        assert_eq!(sensors[1].sensor_id, "S2");
        assert_eq!(stations[1].station_id, "ST-DEL-002");
    }

    #[test]
    fn test_parse_station_csv() {
        let stations_csv = "\
station_id,name,lat,lon,region,tags
X-001,Somewhere,12.5,77.1,Test Region,urban|roadside
";
        let sensors_csv = "station_id,pollutant,unit,sensor_id\n";
        let stations = Station::parse_station_csv(stations_csv, sensors_csv).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Somewhere");
        assert!((stations[0].lat - 12.5).abs() < f64::EPSILON);
        assert_eq!(
            stations[0].tags,
            vec!["urban".to_string(), "roadside".to_string()]
        );
        assert!(stations[0].sensors.is_none());
    }

    #[test]
    fn test_parse_empty_station_csv() {
        let stations_csv = "station_id,name,lat,lon,region,tags\n";
        let sensors_csv = "station_id,pollutant,unit,sensor_id\n";
        let stations = Station::parse_station_csv(stations_csv, sensors_csv).unwrap();
        assert_eq!(stations.len(), 0);
    }
}
