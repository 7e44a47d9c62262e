// Flat bar chart - one bar per device type
use crate::application::scale_builder::{flat_bar_scales, VALUE_TICKS};
use crate::domain::records::DeviceTypeRecord;
use crate::infrastructure::svg::{fmt_px, translate, Element};
use crate::presentation::charts::axis::{self, Orient};
use crate::presentation::charts::{kwh, ChartFrame, Margin, TOOLTIP_OFFSET};
use crate::presentation::render_target::{HoverBinding, RenderTarget};

pub const FRAME: ChartFrame = ChartFrame {
    width: 800.0,
    height: 500.0,
    margin: Margin {
        top: 40.0,
        right: 50.0,
        bottom: 80.0,
        left: 70.0,
    },
};

const BAR_COLOR: &str = "steelblue";

/// `heat_pump` -> `Heat Pump`.
pub fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_flat_bar_chart(target: &mut RenderTarget, records: &[DeviceTypeRecord]) {
    target.clear();

    let area = FRAME.plot_area();
    let scales = flat_bar_scales(records, area);
    let mut plot = FRAME.plot_group();

    let x_ticks = axis::band_ticks(&scales.x, |key| humanize(key));
    plot.push(
        axis::axis(Orient::Bottom, &x_ticks, (0.0, area.width), true)
            .attr("transform", translate(0.0, area.height)),
    );
    let y_ticks = axis::linear_ticks(&scales.y, VALUE_TICKS);
    plot.push(axis::axis(Orient::Left, &y_ticks, (area.height, 0.0), false));

    plot.push(axis::axis_label(
        "Device Types",
        area.width / 2.0,
        area.height + FRAME.margin.bottom - 10.0,
        false,
    ));
    plot.push(axis::axis_label(
        "Average Energy Usage (kWh)",
        -(area.height / 2.0),
        -FRAME.margin.left + 15.0,
        true,
    ));

    let baseline = scales.y.map(0.0);
    let mut bars = Element::new("g").attr("class", "bars");
    for record in records {
        let Some(x) = scales.x.position(&record.device_type) else {
            continue;
        };
        let top = scales.y.map(record.average_energy_usage);
        let mark_id = target.next_mark_id();
        bars.push(
            Element::new("rect")
                .attr("id", &mark_id)
                .attr("class", "bar")
                .attr("x", fmt_px(x))
                .attr("y", fmt_px(top.min(baseline)))
                .attr("width", fmt_px(scales.x.bandwidth()))
                .attr("height", fmt_px((baseline - top).abs()))
                .attr("fill", BAR_COLOR),
        );
        target.bind_hover(HoverBinding::new(
            mark_id,
            vec![
                format!("Device Type: {}", record.device_type),
                kwh("Average Usage", record.average_energy_usage),
            ],
            TOOLTIP_OFFSET,
        ));
    }
    plot.push(bars);

    target.ensure_tooltip();
    target.append(FRAME.svg(plot));
    tracing::debug!(
        "Bar chart drawn into {} with {} bars",
        target.id(),
        records.len()
    );
}
