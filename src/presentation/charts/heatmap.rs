// Heatmap - postal code rows by date columns, filled on a sequential ramp
use crate::application::scale_builder::{heatmap_rows, heatmap_scales};
use crate::domain::records::ZipEnergyGrid;
use crate::infrastructure::svg::{fmt_px, translate, Element};
use crate::presentation::charts::axis::{self, Orient};
use crate::presentation::charts::{kwh, legend, ChartFrame, Margin};
use crate::presentation::render_target::{Highlight, HoverBinding, RenderTarget, Stroke};

const WIDTH: f64 = 1200.0;
const MIN_HEIGHT: f64 = 600.0;
const ROW_HEIGHT: f64 = 20.0;
const MARGIN: Margin = Margin {
    top: 50.0,
    right: 200.0,
    bottom: 200.0,
    left: 200.0,
};
const DATE_FORMAT: &str = "%b %d";
const TOOLTIP_OFFSET: (f64, f64) = (15.0, -20.0);

const CELL_STROKE: Stroke = Stroke {
    color: "white",
    width: 0.5,
};
const CELL_HOVER_STROKE: Stroke = Stroke {
    color: "black",
    width: 2.0,
};

/// Frame height grows with the number of postal code rows.
pub fn frame_for(rows: usize) -> ChartFrame {
    ChartFrame {
        width: WIDTH,
        height: MIN_HEIGHT.max(rows as f64 * ROW_HEIGHT),
        margin: MARGIN,
    }
}

pub fn render_heatmap(target: &mut RenderTarget, grid: &ZipEnergyGrid) {
    target.clear();

    let frame = frame_for(heatmap_rows(grid).len());
    let scales = heatmap_scales(grid, frame.plot_area());
    let area = frame.plot_area();
    let mut plot = frame.plot_group();

    let x_ticks = axis::band_ticks(&scales.x, |d| d.format(DATE_FORMAT).to_string());
    plot.push(
        axis::axis(Orient::Bottom, &x_ticks, (0.0, area.width), true)
            .attr("transform", translate(0.0, area.height)),
    );
    let y_ticks = axis::band_ticks(&scales.y, |code| code.clone());
    plot.push(axis::axis(Orient::Left, &y_ticks, (0.0, area.height), false).attr("font-size", 12));

    plot.push(axis::axis_label(
        "Dates",
        area.width / 2.0,
        area.height + frame.margin.bottom - 10.0,
        false,
    ));
    plot.push(axis::axis_label(
        "Postal Codes",
        -area.height / 2.0,
        -frame.margin.left + 20.0,
        true,
    ));

    let mut cells = Element::new("g").attr("class", "cells");
    for record in &grid.records {
        let (Some(x), Some(y)) = (
            scales.x.position(&record.date),
            scales.y.position(&record.postal_code),
        ) else {
            continue;
        };
        let mark_id = target.next_mark_id();
        cells.push(
            Element::new("rect")
                .attr("id", &mark_id)
                .attr("class", "cell")
                .attr("x", fmt_px(x))
                .attr("y", fmt_px(y))
                .attr("width", fmt_px(scales.x.bandwidth()))
                .attr("height", fmt_px(scales.y.bandwidth()))
                .attr("fill", scales.color.color(record.average_energy))
                .attr("stroke", CELL_STROKE.color)
                .attr("stroke-width", CELL_STROKE.width),
        );
        target.bind_hover(
            HoverBinding::new(
                mark_id,
                vec![
                    format!("Postal Code: {}", record.postal_code),
                    format!("Date: {}", record.date.format(DATE_FORMAT)),
                    kwh("Energy", record.average_energy),
                ],
                TOOLTIP_OFFSET,
            )
            .with_highlight(Highlight {
                hover: CELL_HOVER_STROKE,
                rest: CELL_STROKE,
            }),
        );
    }
    plot.push(cells);

    if !grid.records.is_empty() {
        let gradient_id = format!("{}-legend-gradient", target.id());
        plot.push(
            legend::color_ramp_legend(&gradient_id, scales.color.domain(), "Energy Usage (kWh)")
                .attr("transform", translate(area.width + 20.0, 0.0)),
        );
    }

    target.ensure_tooltip();
    target.append(frame.svg(plot));
    tracing::debug!(
        "Heatmap drawn into {} with {} cells",
        target.id(),
        grid.records.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::ZipEnergyRecord;
    use chrono::NaiveDate;

    fn grid() -> ZipEnergyGrid {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        ZipEnergyGrid {
            postal_codes: vec!["M5V".into(), "Unspecified Postal Code".into()],
            records: vec![
                ZipEnergyRecord {
                    postal_code: "M5V".into(),
                    date: day(1),
                    average_energy: 2.0,
                },
                ZipEnergyRecord {
                    postal_code: "M5V".into(),
                    date: day(2),
                    average_energy: 8.0,
                },
                ZipEnergyRecord {
                    postal_code: "Unspecified Postal Code".into(),
                    date: day(1),
                    average_energy: 4.0,
                },
            ],
        }
    }

    #[test]
    fn test_one_cell_per_record_with_gradient_legend() {
        let mut target = RenderTarget::new("zip-heatmap-container");
        render_heatmap(&mut target, &grid());

        assert_eq!(target.select_class("cell").len(), 3);
        assert_eq!(target.select_class("color-legend").len(), 1);
        let gradient = target.select(&|e: &Element| e.tag() == "linearGradient");
        assert_eq!(gradient[0].get_attr("id"), Some("zip-heatmap-container-legend-gradient"));
    }

    #[test]
    fn test_redraw_after_hover_is_idempotent() {
        let mut target = RenderTarget::new("zip-heatmap-container");
        render_heatmap(&mut target, &grid());
        let first = target.to_html();

        let id = target.select_class("cell")[0].get_attr("id").unwrap().to_string();
        target.hover(&id, (0.0, 0.0));
        render_heatmap(&mut target, &grid());

        assert_eq!(target.nodes().len(), 1);
        assert_eq!(target.select_class("cell").len(), 3);
        assert_eq!(target.select_class("color-legend").len(), 1);
        assert_eq!(target.bindings().len(), 3);
        assert!(!target.tooltip().unwrap().visible);
        assert_eq!(target.to_html(), first);
    }

    #[test]
    fn test_hover_thickens_border_and_shows_cell_details() {
        let mut target = RenderTarget::new("zip-heatmap-container");
        render_heatmap(&mut target, &grid());

        let id = target.select_class("cell")[2].get_attr("id").unwrap().to_string();
        let tooltip = target.hover(&id, (0.0, 0.0)).unwrap();
        assert_eq!(
            tooltip.html,
            "Postal Code: Unspecified Postal Code<br>Date: Jan 01<br>Energy: 4.00 kWh"
        );
        assert_eq!((tooltip.left, tooltip.top), (15.0, -20.0));

        let cell = target.select_class("cell")[2];
        assert_eq!(cell.get_attr("stroke"), Some("black"));
        assert_eq!(cell.get_attr("stroke-width"), Some("2"));
    }

    #[test]
    fn test_frame_grows_with_rows() {
        assert_eq!(frame_for(10).height, 600.0);
        assert_eq!(frame_for(40).height, 800.0);
    }

    #[test]
    fn test_empty_grid_draws_axes_without_legend() {
        let mut target = RenderTarget::new("zip-heatmap-container");
        render_heatmap(&mut target, &ZipEnergyGrid::default());
        assert_eq!(target.select_class("axis").len(), 2);
        assert!(target.select_class("cell").is_empty());
        assert!(target.select_class("color-legend").is_empty());
    }
}
