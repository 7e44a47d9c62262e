// Dataset normalizers - pure mapping from raw payloads to flat, renderer-ready records
use chrono::NaiveDate;

use crate::application::error::RenderError;
use crate::domain::payload::{
    CellValue, ClusterHealthResponse, DailyAverageResponse, DeviceTypeAverage, TopUnit,
    UnitTypeDay, ZipEnergyResponse,
};
use crate::domain::records::{
    DailyEnergyRecord, DeviceTypeRecord, NodeHealthRow, PeakSeries, TopUnitRow,
    UnitTypeBreakdown, UnitTypeUsageRow, ZipEnergyGrid, ZipEnergyRecord, UNSPECIFIED_POSTAL_CODE,
    UNSPECIFIED_POSTAL_CODE_LABEL,
};

const PING_PLACEHOLDER: &str = "Unknown";

/// Parse the date labels the service emits:
/// `2024-01-31`, `2024/01/31`, `2024/01/29 - 2024/02/04` (week start is used),
/// `2024-01` (first of month) and ISO timestamps.
pub fn parse_date_label(label: &str) -> Result<NaiveDate, RenderError> {
    let trimmed = label.trim();
    let head = trimmed.split(" - ").next().unwrap_or(trimmed).trim();
    let head = match head.find('T') {
        Some(idx) => &head[..idx],
        None => head,
    };

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{head}-01"), "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{head}/01"), "%Y/%m/%d").ok())
        .ok_or_else(|| RenderError::UnparsableDate(label.to_string()))
}

/// Flatten a date-keyed peak split into one record per (date, series) pair,
/// series-major and in ascending date order.
pub fn normalize_daily_average(
    payload: &DailyAverageResponse,
) -> Result<Vec<DailyEnergyRecord>, RenderError> {
    let mut days = payload
        .iter()
        .map(|(label, split)| Ok((parse_date_label(label)?, *split)))
        .collect::<Result<Vec<_>, RenderError>>()?;
    days.sort_by_key(|(date, _)| *date);

    let mut records = Vec::with_capacity(days.len() * PeakSeries::ALL.len());
    for series in PeakSeries::ALL {
        records.extend(days.iter().map(|(date, split)| DailyEnergyRecord {
            date: *date,
            series,
            value: match series {
                PeakSeries::OnPeak => split.on_peak,
                PeakSeries::OffPeak => split.off_peak,
            },
        }));
    }

    tracing::debug!("Normalized {} daily average records", records.len());
    Ok(records)
}

pub fn normalize_cluster_health(payload: &ClusterHealthResponse) -> Vec<NodeHealthRow> {
    payload
        .nodes
        .iter()
        .map(|node| NodeHealthRow {
            name: node.name.clone(),
            state: node.state.clone(),
            health: node.health.clone(),
            uptime: node.uptime.to_string(),
            last_heartbeat: node.last_heartbeat.to_string(),
            ping: match &node.ping_ms {
                Some(CellValue::Text(text)) if text.trim().is_empty() => {
                    PING_PLACEHOLDER.to_string()
                }
                Some(value) => value.to_string(),
                None => PING_PLACEHOLDER.to_string(),
            },
        })
        .collect()
}

/// Flatten a postal-code-keyed payload into one record per (postal code, date)
/// pair, keeping the service's key order. The sentinel key is relabeled.
pub fn normalize_zip_energy(payload: &ZipEnergyResponse) -> Result<ZipEnergyGrid, RenderError> {
    let mut grid = ZipEnergyGrid::default();
    for (zip, series) in payload {
        let postal_code = display_postal_code(zip);
        for point in &series.dates {
            grid.records.push(ZipEnergyRecord {
                postal_code: postal_code.clone(),
                date: parse_date_label(&point.date)?,
                average_energy: point.average_energy,
            });
        }
        grid.postal_codes.push(postal_code);
    }

    tracing::debug!(
        "Normalized {} postal code records across {} rows",
        grid.records.len(),
        grid.postal_codes.len()
    );
    Ok(grid)
}

fn display_postal_code(zip: &str) -> String {
    if zip == UNSPECIFIED_POSTAL_CODE {
        UNSPECIFIED_POSTAL_CODE_LABEL.to_string()
    } else {
        zip.to_string()
    }
}

/// Pivot each day's nested unit-type list into a wide row so the unit types
/// can share one x position.
pub fn normalize_unit_type_usage(payload: &[UnitTypeDay]) -> UnitTypeBreakdown {
    let mut unit_types: Vec<String> = Vec::new();
    for day in payload {
        for average in &day.unit_type_averages {
            if !unit_types.contains(&average.unit_type) {
                unit_types.push(average.unit_type.clone());
            }
        }
    }

    let rows = payload
        .iter()
        .map(|day| UnitTypeUsageRow {
            date: day.date.clone(),
            usage: unit_types
                .iter()
                .map(|unit_type| {
                    day.unit_type_averages
                        .iter()
                        .find(|a| &a.unit_type == unit_type)
                        .map(|a| a.average_usage)
                })
                .collect(),
        })
        .collect();

    UnitTypeBreakdown { unit_types, rows }
}

pub fn normalize_top_units(payload: &[TopUnit]) -> Vec<TopUnitRow> {
    payload
        .iter()
        .map(|unit| TopUnitRow {
            unit_id: unit.unit_id.to_string(),
            address: unit.address.clone(),
            total_energy_usage: unit.total_energy_usage,
        })
        .collect()
}

pub fn normalize_device_types(payload: &[DeviceTypeAverage]) -> Vec<DeviceTypeRecord> {
    payload
        .iter()
        .map(|d| DeviceTypeRecord {
            device_type: d.device_type.clone(),
            average_energy_usage: d.average_energy_usage,
        })
        .collect()
}
