// Normalized, renderer-ready records
use chrono::NaiveDate;

/// Postal-code key the service uses for units without one.
pub const UNSPECIFIED_POSTAL_CODE: &str = "Unspecified";
/// Label shown in place of [`UNSPECIFIED_POSTAL_CODE`].
pub const UNSPECIFIED_POSTAL_CODE_LABEL: &str = "Unspecified Postal Code";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeakSeries {
    OnPeak,
    OffPeak,
}

impl PeakSeries {
    pub const ALL: [PeakSeries; 2] = [PeakSeries::OnPeak, PeakSeries::OffPeak];

    pub fn label(&self) -> &'static str {
        match self {
            PeakSeries::OnPeak => "On Peak",
            PeakSeries::OffPeak => "Off Peak",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PeakSeries::OnPeak => "on-peak",
            PeakSeries::OffPeak => "off-peak",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PeakSeries::OnPeak => "steelblue",
            PeakSeries::OffPeak => "orange",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyEnergyRecord {
    pub date: NaiveDate,
    pub series: PeakSeries,
    pub value: f64,
}

/// One cluster node, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHealthRow {
    pub name: String,
    pub state: String,
    pub health: String,
    pub uptime: String,
    pub last_heartbeat: String,
    pub ping: String,
}

impl NodeHealthRow {
    pub const HEADERS: [&'static str; 6] =
        ["Name", "State", "Health", "Uptime", "Last Heartbeat", "Ping (ms)"];

    pub fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.state,
            &self.health,
            &self.uptime,
            &self.last_heartbeat,
            &self.ping,
        ]
    }
}

/// Heatmap input: row keys plus one record per (postal code, date) cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZipEnergyGrid {
    /// Display labels in the service's key order, including codes with no
    /// dates so they still get a row.
    pub postal_codes: Vec<String>,
    pub records: Vec<ZipEnergyRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZipEnergyRecord {
    pub postal_code: String,
    pub date: NaiveDate,
    pub average_energy: f64,
}

/// Wide-format usage breakdown: one row per date, one column per unit type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTypeBreakdown {
    /// Unit types in first-seen order; the column order of every row.
    pub unit_types: Vec<String>,
    pub rows: Vec<UnitTypeUsageRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitTypeUsageRow {
    pub date: String,
    /// Aligned with [`UnitTypeBreakdown::unit_types`]; `None` where the service
    /// sent no average for that unit type on that date.
    pub usage: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopUnitRow {
    pub unit_id: String,
    pub address: String,
    pub total_energy_usage: f64,
}

impl TopUnitRow {
    pub const HEADERS: [&'static str; 3] = ["Unit ID", "Address", "Total Energy Usage (kWh)"];

    pub fn cells(&self) -> [String; 3] {
        [
            self.unit_id.clone(),
            self.address.clone(),
            format!("{:.2}", self.total_energy_usage),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTypeRecord {
    pub device_type: String,
    pub average_energy_usage: f64,
}

/// Normalized output of one fetch, tagged by the panel that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelData {
    DailyAverage(Vec<DailyEnergyRecord>),
    ClusterHealth(Vec<NodeHealthRow>),
    ZipHeatmap(ZipEnergyGrid),
    UnitTypeUsage(UnitTypeBreakdown),
    TopUnits(Vec<TopUnitRow>),
    DeviceType(Vec<DeviceTypeRecord>),
}

impl PanelData {
    pub fn len(&self) -> usize {
        match self {
            PanelData::DailyAverage(r) => r.len(),
            PanelData::ClusterHealth(r) => r.len(),
            PanelData::ZipHeatmap(g) => g.records.len(),
            PanelData::UnitTypeUsage(b) => b.rows.len(),
            PanelData::TopUnits(r) => r.len(),
            PanelData::DeviceType(r) => r.len(),
        }
    }
}
