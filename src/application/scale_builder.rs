// Scale/axis builder - derives fresh scales from each normalized dataset, nothing cached
use chrono::NaiveDate;

use crate::domain::records::{
    DailyEnergyRecord, DeviceTypeRecord, UnitTypeBreakdown, ZipEnergyGrid,
};
use crate::infrastructure::color::{OrdinalColor, SequentialColor, SET2};
use crate::infrastructure::scale::{BandScale, LinearScale, TimeScale};

/// Tick count used when niceing value axes.
pub const VALUE_TICKS: usize = 10;

/// Plot area in pixels, margins already removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

/// Linear value scale anchored at zero that covers every value. Values below
/// zero pull the low end down; an all-zero or empty set widens to `[0, 1]`.
pub fn magnitude_scale<I>(values: I, range: (f64, f64)) -> LinearScale
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let hi = if hi - lo < f64::EPSILON { lo + 1.0 } else { hi };
    LinearScale::new((lo, hi), range)
}

#[derive(Debug, Clone)]
pub struct LineScales {
    pub x: TimeScale,
    pub y: LinearScale,
    /// Distinct dates in ascending order, one x tick each.
    pub dates: Vec<NaiveDate>,
}

pub fn line_scales(records: &[DailyEnergyRecord], area: PlotArea) -> LineScales {
    let mut dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    dates.sort();
    dates.dedup();

    let extent = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => (NaiveDate::default(), NaiveDate::default()),
    };

    LineScales {
        x: TimeScale::new(extent, (0.0, area.width)),
        y: magnitude_scale(records.iter().map(|r| r.value), (area.height, 0.0)),
        dates,
    }
}

#[derive(Debug, Clone)]
pub struct HeatmapScales {
    pub x: BandScale<NaiveDate>,
    pub y: BandScale<String>,
    pub color: SequentialColor,
}

pub const HEATMAP_PADDING: f64 = 0.05;

/// Row keys: declared postal codes first, then any code only seen in records.
pub fn heatmap_rows(grid: &ZipEnergyGrid) -> Vec<String> {
    let mut rows = grid.postal_codes.clone();
    for record in &grid.records {
        if !rows.contains(&record.postal_code) {
            rows.push(record.postal_code.clone());
        }
    }
    rows
}

pub fn heatmap_scales(grid: &ZipEnergyGrid, area: PlotArea) -> HeatmapScales {
    let mut dates: Vec<NaiveDate> = grid.records.iter().map(|r| r.date).collect();
    dates.sort();
    dates.dedup();
    let rows = heatmap_rows(grid);

    let max = grid
        .records
        .iter()
        .map(|r| r.average_energy)
        .fold(0.0_f64, f64::max);

    HeatmapScales {
        x: BandScale::new(dates, (0.0, area.width), HEATMAP_PADDING),
        y: BandScale::new(rows, (0.0, area.height), HEATMAP_PADDING),
        color: SequentialColor::new((0.0, max)),
    }
}

#[derive(Debug, Clone)]
pub struct GroupedBarScales {
    /// Outer bands, one per date.
    pub x0: BandScale<String>,
    /// Inner bands, one per unit type, spanning one outer band.
    pub x1: BandScale<String>,
    pub y: LinearScale,
    pub color: OrdinalColor,
}

pub fn grouped_bar_scales(breakdown: &UnitTypeBreakdown, area: PlotArea) -> GroupedBarScales {
    let dates: Vec<String> = breakdown.rows.iter().map(|r| r.date.clone()).collect();
    let x0 = BandScale::new(dates, (0.0, area.width), 0.2);
    let x1 = BandScale::new(breakdown.unit_types.clone(), (0.0, x0.bandwidth()), 0.05);
    let values = breakdown.rows.iter().flat_map(|r| r.usage.iter().flatten().copied());
    let y = magnitude_scale(values, (area.height, 0.0)).nice(VALUE_TICKS);
    let color = OrdinalColor::new(breakdown.unit_types.clone(), &SET2);

    GroupedBarScales { x0, x1, y, color }
}

#[derive(Debug, Clone)]
pub struct FlatBarScales {
    pub x: BandScale<String>,
    pub y: LinearScale,
}

pub fn flat_bar_scales(records: &[DeviceTypeRecord], area: PlotArea) -> FlatBarScales {
    let keys: Vec<String> = records.iter().map(|r| r.device_type.clone()).collect();
    FlatBarScales {
        x: BandScale::new(keys, (0.0, area.width), 0.2),
        y: magnitude_scale(records.iter().map(|r| r.average_energy_usage), (area.height, 0.0))
            .nice(VALUE_TICKS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{PeakSeries, UnitTypeUsageRow, ZipEnergyRecord};

    const AREA: PlotArea = PlotArea {
        width: 700.0,
        height: 280.0,
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn in_range(value: f64, (a, b): (f64, f64)) -> bool {
        value >= a.min(b) - 1e-9 && value <= a.max(b) + 1e-9
    }

    #[test]
    fn test_magnitude_scale_is_zero_anchored() {
        let y = magnitude_scale([3.0, 12.5, 7.0], (280.0, 0.0));
        assert_eq!(y.domain(), (0.0, 12.5));

        let empty = magnitude_scale(std::iter::empty(), (280.0, 0.0));
        assert_eq!(empty.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_line_scales_bound_every_record() {
        let records = vec![
            DailyEnergyRecord {
                date: day(2),
                series: PeakSeries::OnPeak,
                value: 10.0,
            },
            DailyEnergyRecord {
                date: day(1),
                series: PeakSeries::OnPeak,
                value: 12.5,
            },
            DailyEnergyRecord {
                date: day(1),
                series: PeakSeries::OffPeak,
                value: 3.2,
            },
            DailyEnergyRecord {
                date: day(2),
                series: PeakSeries::OffPeak,
                value: 4.1,
            },
        ];
        let scales = line_scales(&records, AREA);

        assert_eq!(scales.dates, vec![day(1), day(2)]);
        assert_eq!(scales.y.domain().0, 0.0);
        for r in &records {
            assert!(in_range(scales.x.map(r.date), (0.0, AREA.width)));
            assert!(in_range(scales.y.map(r.value), scales.y.range()));
        }
    }

    #[test]
    fn test_heatmap_rows_include_empty_codes_and_dates_sort() {
        let grid = ZipEnergyGrid {
            postal_codes: vec!["M5V".into(), "K1A".into()],
            records: vec![
                ZipEnergyRecord {
                    postal_code: "M5V".into(),
                    date: day(3),
                    average_energy: 2.0,
                },
                ZipEnergyRecord {
                    postal_code: "M5V".into(),
                    date: day(1),
                    average_energy: 6.0,
                },
            ],
        };
        let scales = heatmap_scales(&grid, AREA);
        assert_eq!(scales.x.domain(), &[day(1), day(3)]);
        assert_eq!(scales.y.domain(), &["M5V".to_string(), "K1A".to_string()]);
        assert_eq!(scales.color.domain(), (0.0, 6.0));
    }

    #[test]
    fn test_grouped_bar_nests_inner_band_in_outer() {
        let breakdown = UnitTypeBreakdown {
            unit_types: vec!["house".into(), "condo".into()],
            rows: vec![
                UnitTypeUsageRow {
                    date: "2024-01-01".into(),
                    usage: vec![Some(9.3), Some(2.0)],
                },
                UnitTypeUsageRow {
                    date: "2024-01-02".into(),
                    usage: vec![None, Some(4.0)],
                },
            ],
        };
        let scales = grouped_bar_scales(&breakdown, AREA);

        assert_eq!(scales.y.domain(), (0.0, 10.0));
        assert_eq!(scales.x1.range(), (0.0, scales.x0.bandwidth()));
        let inner_end = scales.x1.position(&"condo".to_string()).unwrap() + scales.x1.bandwidth();
        assert!(inner_end <= scales.x0.bandwidth() + 1e-9);
    }

    #[test]
    fn test_flat_bar_value_axis_is_niced() {
        let records = vec![
            DeviceTypeRecord {
                device_type: "heat_pump".into(),
                average_energy_usage: 87.3,
            },
            DeviceTypeRecord {
                device_type: "fridge".into(),
                average_energy_usage: 12.0,
            },
        ];
        let scales = flat_bar_scales(&records, AREA);
        assert_eq!(scales.y.domain(), (0.0, 90.0));
        assert_eq!(scales.x.domain().len(), 2);
    }
}
