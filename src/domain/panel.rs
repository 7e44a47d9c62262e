// Panel identity, lifecycle state and user-supplied parameters
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Missing or malformed input, checked before any request is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a start date.")]
    MissingStartDate,

    #[error("Please select a city.")]
    MissingCity,

    #[error("Unknown city '{0}'")]
    UnknownCity(String),

    #[error("Unknown panel '{0}'")]
    UnknownPanel(String),

    #[error("Invalid time period '{0}' (expected day, week or month)")]
    InvalidTimePeriod(String),
}

/// The six dashboard tabs. Each one owns an independent fetch+render unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelId {
    DailyAverage,
    ClusterHealth,
    ZipHeatmap,
    UnitTypeUsage,
    TopUnits,
    DeviceType,
}

impl PanelId {
    pub const ALL: [PanelId; 6] = [
        PanelId::DailyAverage,
        PanelId::ClusterHealth,
        PanelId::ZipHeatmap,
        PanelId::UnitTypeUsage,
        PanelId::TopUnits,
        PanelId::DeviceType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::DailyAverage => "daily-average",
            PanelId::ClusterHealth => "cluster-health",
            PanelId::ZipHeatmap => "zip-heatmap",
            PanelId::UnitTypeUsage => "unit-type-usage",
            PanelId::TopUnits => "top-units",
            PanelId::DeviceType => "device-type",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::DailyAverage => "Daily Average Energy",
            PanelId::ClusterHealth => "Cluster Health",
            PanelId::ZipHeatmap => "Energy by Postal Code",
            PanelId::UnitTypeUsage => "Usage by Unit Type",
            PanelId::TopUnits => "Top Units",
            PanelId::DeviceType => "Energy by Device Type",
        }
    }

    /// DOM id of the container this panel draws into.
    pub fn container_id(&self) -> String {
        format!("{}-container", self.as_str())
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPanel(s.to_string()))
    }
}

/// Lifecycle of a single panel: `Idle -> Loading -> (Rendered | Failed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Idle,
    Loading,
    Rendered,
    Failed,
}

/// Aggregation window for the postal-code heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Day,
    Week,
    Month,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 3] = [TimePeriod::Day, TimePeriod::Week, TimePeriod::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
        }
    }
}

impl FromStr for TimePeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidTimePeriod(s.to_string()))
    }
}

/// Raw control values as submitted by the page. Every field is optional here;
/// [`PanelRequest::from_form`] decides which ones a panel needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelForm {
    pub city: Option<String>,
    pub time_period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Validated parameters for one fetch, one variant per panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRequest {
    DailyAverage { city: String },
    ClusterHealth,
    ZipHeatmap { city: String, period: TimePeriod },
    UnitTypeUsage {
        city: String,
        start_date: String,
        end_date: String,
    },
    TopUnits { city: String },
    DeviceType { city: String },
}

impl PanelRequest {
    pub fn panel(&self) -> PanelId {
        match self {
            PanelRequest::DailyAverage { .. } => PanelId::DailyAverage,
            PanelRequest::ClusterHealth => PanelId::ClusterHealth,
            PanelRequest::ZipHeatmap { .. } => PanelId::ZipHeatmap,
            PanelRequest::UnitTypeUsage { .. } => PanelId::UnitTypeUsage,
            PanelRequest::TopUnits { .. } => PanelId::TopUnits,
            PanelRequest::DeviceType { .. } => PanelId::DeviceType,
        }
    }

    /// Collect and validate the controls for `panel`. Runs before any request
    /// is issued, so a rejected form never reaches the network.
    pub fn from_form(
        panel: PanelId,
        form: &PanelForm,
        cities: &[String],
    ) -> Result<Self, ValidationError> {
        let city = || -> Result<String, ValidationError> {
            let city = form
                .city
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or(ValidationError::MissingCity)?;
            if !cities.is_empty() && !cities.iter().any(|c| c == city) {
                return Err(ValidationError::UnknownCity(city.to_string()));
            }
            Ok(city.to_string())
        };

        match panel {
            PanelId::DailyAverage => Ok(PanelRequest::DailyAverage { city: city()? }),
            PanelId::ClusterHealth => Ok(PanelRequest::ClusterHealth),
            PanelId::ZipHeatmap => {
                let period = form.time_period.as_deref().unwrap_or("day").parse()?;
                Ok(PanelRequest::ZipHeatmap {
                    city: city()?,
                    period,
                })
            }
            PanelId::UnitTypeUsage => {
                let start_date = form
                    .start_date
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .ok_or(ValidationError::MissingStartDate)?
                    .to_string();
                let end_date = form.end_date.clone().unwrap_or_default();
                Ok(PanelRequest::UnitTypeUsage {
                    city: city()?,
                    start_date,
                    end_date,
                })
            }
            PanelId::TopUnits => Ok(PanelRequest::TopUnits { city: city()? }),
            PanelId::DeviceType => Ok(PanelRequest::DeviceType { city: city()? }),
        }
    }
}
