// Wire shapes returned by the energy data service
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `GET /api/daily-average-energy/{city}`: date -> peak split.
pub type DailyAverageResponse = IndexMap<String, PeakSplit>;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PeakSplit {
    pub on_peak: f64,
    pub off_peak: f64,
}

/// `GET /api/cluster-health`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClusterHealthResponse {
    #[serde(default)]
    pub nodes: Vec<NodeHealth>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeHealth {
    pub name: String,
    pub state: String,
    pub health: String,
    pub uptime: CellValue,
    pub last_heartbeat: CellValue,
    #[serde(default)]
    pub ping_ms: Option<CellValue>,
}

/// A loosely typed scalar the service may send as either a number or a string
/// (uptime seconds, heartbeat timestamps, "N/A").
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// `GET /api/average-energy-zip/{city}/{period}`: postal code -> series.
pub type ZipEnergyResponse = IndexMap<String, ZipSeries>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ZipSeries {
    #[serde(default)]
    pub dates: Vec<ZipDatePoint>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZipDatePoint {
    pub date: String,
    pub average_energy: f64,
}

/// Body of `POST /api/average-daily-usage-by-unit-type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTypeUsageQuery {
    pub city_name: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnitTypeDay {
    pub date: String,
    #[serde(default)]
    pub unit_type_averages: Vec<UnitTypeAverage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnitTypeAverage {
    pub unit_type: String,
    pub average_usage: f64,
}

/// `GET /top-units/{city}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopUnit {
    pub unit_id: CellValue,
    pub address: String,
    pub total_energy_usage: f64,
}

/// `GET /average-energy-by-device-type/{city}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceTypeAverage {
    pub device_type: String,
    pub average_energy_usage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_health_accepts_mixed_scalars() {
        let json = r#"{"nodes":[
            {"name":"db-0:27017","state":"PRIMARY","health":"healthy","uptime":86400,
             "last_heartbeat":"N/A","ping_ms":3},
            {"name":"db-1:27017","state":"SECONDARY","health":"healthy","uptime":12.5,
             "last_heartbeat":"2024-01-02T10:00:00Z"}
        ]}"#;
        let response: ClusterHealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.nodes.len(), 2);
        assert_eq!(response.nodes[0].uptime.to_string(), "86400");
        assert_eq!(response.nodes[1].uptime.to_string(), "12.5");
        assert!(response.nodes[1].ping_ms.is_none());
    }

    #[test]
    fn test_zip_response_keeps_key_order() {
        let json = r#"{"M5V":{"dates":[]},"Unspecified":{"dates":[]},"A1A":{"dates":[]}}"#;
        let response: ZipEnergyResponse = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = response.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["M5V", "Unspecified", "A1A"]);
    }

    #[test]
    fn test_shape_mismatch_is_a_decode_error() {
        let json = r#"{"2024-01-01": {"on_peak": "lots"}}"#;
        assert!(serde_json::from_str::<DailyAverageResponse>(json).is_err());
    }
}
