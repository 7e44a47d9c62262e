// Grouped bar chart - unit types side by side within each date
use crate::application::scale_builder::{grouped_bar_scales, VALUE_TICKS};
use crate::domain::records::UnitTypeBreakdown;
use crate::infrastructure::svg::{fmt_px, translate, Element};
use crate::presentation::charts::axis::{self, Orient};
use crate::presentation::charts::{kwh, legend, ChartFrame, Margin, TOOLTIP_OFFSET};
use crate::presentation::render_target::{HoverBinding, RenderTarget};

pub const FRAME: ChartFrame = ChartFrame {
    width: 900.0,
    height: 500.0,
    margin: Margin {
        top: 40.0,
        right: 50.0,
        bottom: 80.0,
        left: 60.0,
    },
};

const LEGEND_SPACING: f64 = 100.0;

pub fn render_grouped_bar_chart(target: &mut RenderTarget, breakdown: &UnitTypeBreakdown) {
    target.clear();

    let area = FRAME.plot_area();
    let scales = grouped_bar_scales(breakdown, area);
    let mut plot = FRAME.plot_group();

    let x_ticks = axis::band_ticks(&scales.x0, |date| date.clone());
    plot.push(
        axis::axis(Orient::Bottom, &x_ticks, (0.0, area.width), true)
            .attr("transform", translate(0.0, area.height)),
    );
    let y_ticks = axis::linear_ticks(&scales.y, VALUE_TICKS);
    plot.push(axis::axis(Orient::Left, &y_ticks, (area.height, 0.0), false));

    plot.push(axis::axis_label(
        "Dates",
        area.width / 2.0,
        area.height + FRAME.margin.bottom - 10.0,
        false,
    ));
    plot.push(axis::axis_label(
        "Average Energy Usage (kWh)",
        -(area.height / 2.0),
        -FRAME.margin.left + 10.0,
        true,
    ));

    let baseline = scales.y.map(0.0);
    let mut groups = Element::new("g").attr("class", "groups");
    for row in &breakdown.rows {
        let Some(x0) = scales.x0.position(&row.date) else {
            continue;
        };
        let mut group = Element::new("g")
            .attr("class", "group")
            .attr("transform", translate(x0, 0.0));

        for (unit_type, value) in breakdown.unit_types.iter().zip(&row.usage) {
            let (Some(value), Some(x1)) = (value, scales.x1.position(unit_type)) else {
                continue;
            };
            let top = scales.y.map(*value);
            let mark_id = target.next_mark_id();
            group.push(
                Element::new("rect")
                    .attr("id", &mark_id)
                    .attr("class", "bar")
                    .attr("x", fmt_px(x1))
                    .attr("y", fmt_px(top.min(baseline)))
                    .attr("width", fmt_px(scales.x1.bandwidth()))
                    .attr("height", fmt_px((baseline - top).abs()))
                    .attr("fill", scales.color.color(unit_type)),
            );
            target.bind_hover(HoverBinding::new(
                mark_id,
                vec![
                    format!("Date: {}", row.date),
                    format!("Unit Type: {}", unit_type),
                    kwh("Energy Usage", *value),
                ],
                TOOLTIP_OFFSET,
            ));
        }
        groups.push(group);
    }
    plot.push(groups);

    if breakdown.unit_types.len() > 1 {
        let entries: Vec<(String, &str)> = breakdown
            .unit_types
            .iter()
            .map(|t| (t.clone(), scales.color.color(t)))
            .collect();
        plot.push(legend::swatch_legend(&entries, LEGEND_SPACING, -10.0));
    }

    target.ensure_tooltip();
    target.append(FRAME.svg(plot));
    tracing::debug!(
        "Grouped bar chart drawn into {} with {} groups of {} unit types",
        target.id(),
        breakdown.rows.len(),
        breakdown.unit_types.len()
    );
}
