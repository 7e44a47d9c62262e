// Line chart - one path per peak series with hoverable point markers
use crate::application::scale_builder::line_scales;
use crate::domain::records::{DailyEnergyRecord, PeakSeries};
use crate::infrastructure::svg::{fmt_px, translate, Element};
use crate::presentation::charts::axis::{self, Orient};
use crate::presentation::charts::{kwh, legend, ChartFrame, Margin, TOOLTIP_OFFSET};
use crate::presentation::render_target::{HoverBinding, RenderTarget};

pub const FRAME: ChartFrame = ChartFrame {
    width: 800.0,
    height: 400.0,
    margin: Margin {
        top: 20.0,
        right: 30.0,
        bottom: 100.0,
        left: 70.0,
    },
};

const DATE_FORMAT: &str = "%b %d";
const POINT_RADIUS: f64 = 4.0;

pub fn render_line_chart(target: &mut RenderTarget, records: &[DailyEnergyRecord]) {
    target.clear();

    let area = FRAME.plot_area();
    let scales = line_scales(records, area);
    let mut plot = FRAME.plot_group();

    let x_ticks = axis::time_ticks(&scales.x, &scales.dates, DATE_FORMAT);
    plot.push(
        axis::axis(Orient::Bottom, &x_ticks, (0.0, area.width), true)
            .attr("transform", translate(0.0, area.height)),
    );
    let y_ticks = axis::linear_ticks(&scales.y, 10);
    plot.push(axis::axis(Orient::Left, &y_ticks, (area.height, 0.0), false));

    let series: Vec<PeakSeries> = PeakSeries::ALL
        .into_iter()
        .filter(|s| records.iter().any(|r| r.series == *s))
        .collect();

    for s in &series {
        let d = records
            .iter()
            .filter(|r| r.series == *s)
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "{}{},{}",
                    if i == 0 { "M" } else { "L" },
                    fmt_px(scales.x.map(r.date)),
                    fmt_px(scales.y.map(r.value))
                )
            })
            .collect::<String>();
        plot.push(
            Element::new("path")
                .attr("class", format!("line {}", s.css_class()))
                .attr("fill", "none")
                .attr("stroke", s.color())
                .attr("stroke-width", 2)
                .attr("d", d),
        );
    }

    for record in records {
        let mark_id = target.next_mark_id();
        plot.push(
            Element::new("circle")
                .attr("id", &mark_id)
                .attr("class", format!("point {}", record.series.css_class()))
                .attr("cx", fmt_px(scales.x.map(record.date)))
                .attr("cy", fmt_px(scales.y.map(record.value)))
                .attr("r", POINT_RADIUS)
                .attr("fill", record.series.color()),
        );
        target.bind_hover(HoverBinding::new(
            mark_id,
            vec![
                format!("Date: {}", record.date.format(DATE_FORMAT)),
                kwh(record.series.label(), record.value),
            ],
            TOOLTIP_OFFSET,
        ));
    }

    plot.push(axis::axis_label(
        "Date",
        area.width / 2.0,
        area.height + FRAME.margin.bottom - 40.0,
        false,
    ));
    plot.push(axis::axis_label(
        "Energy Usage (kWh)",
        -(area.height / 2.0),
        -FRAME.margin.left + 20.0,
        true,
    ));

    if series.len() > 1 {
        let entries: Vec<(&str, &str)> = series.iter().map(|s| (s.label(), s.color())).collect();
        plot.push(legend::text_legend(&entries, area.width - 100.0, 20.0));
    }

    target.ensure_tooltip();
    target.append(FRAME.svg(plot));
    tracing::debug!(
        "Line chart drawn into {} with {} series and {} points",
        target.id(),
        series.len(),
        records.len()
    );
}
