// Legends: text, swatch and continuous colour ramp
use crate::infrastructure::color::interpolate_yl_gn_bu;
use crate::infrastructure::scale::LinearScale;
use crate::infrastructure::svg::{translate, Element};
use crate::presentation::charts::axis::{self, Orient};

/// Coloured text entries stacked vertically from `(x, y)`.
pub fn text_legend(entries: &[(&str, &str)], x: f64, y: f64) -> Element {
    entries
        .iter()
        .enumerate()
        .fold(Element::new("g").attr("class", "legend"), |g, (i, (label, color))| {
            g.child(
                Element::new("text")
                    .attr("class", "legend-entry")
                    .attr("x", x)
                    .attr("y", y + 20.0 * i as f64)
                    .attr("fill", *color)
                    .text(*label),
            )
        })
}

/// 10x10 swatch plus label per entry, laid out horizontally every `spacing` px.
pub fn swatch_legend(entries: &[(String, &str)], spacing: f64, y: f64) -> Element {
    entries
        .iter()
        .enumerate()
        .fold(Element::new("g").attr("class", "legend"), |g, (i, (label, color))| {
            g.child(
                Element::new("g")
                    .attr("class", "legend-entry")
                    .attr("transform", translate(i as f64 * spacing, y))
                    .child(
                        Element::new("rect")
                            .attr("width", 10)
                            .attr("height", 10)
                            .attr("fill", *color),
                    )
                    .child(Element::new("text").attr("x", 15).attr("y", 10).text(label.clone())),
            )
        })
}

const RAMP_WIDTH: f64 = 20.0;
const RAMP_HEIGHT: f64 = 300.0;
const RAMP_STOPS: usize = 5;

/// Vertical gradient bar for a sequential colour scale over `domain`, with a
/// 5-tick axis on its right. `gradient_id` must be unique in the page.
pub fn color_ramp_legend(gradient_id: &str, domain: (f64, f64), title: &str) -> Element {
    let gradient = (0..RAMP_STOPS).fold(
        Element::new("linearGradient")
            .attr("id", gradient_id)
            .attr("x1", "0%")
            .attr("y1", "100%")
            .attr("x2", "0%")
            .attr("y2", "0%"),
        |g, i| {
            let t = i as f64 / (RAMP_STOPS - 1) as f64;
            g.child(
                Element::new("stop")
                    .attr("offset", format!("{}%", (t * 100.0).round()))
                    .attr("stop-color", interpolate_yl_gn_bu(t)),
            )
        },
    );

    let scale = LinearScale::new(domain, (RAMP_HEIGHT, 0.0));
    let ticks = axis::linear_ticks(&scale, 5);

    Element::new("g")
        .attr("class", "legend color-legend")
        .child(Element::new("defs").child(gradient))
        .child(
            Element::new("rect")
                .attr("width", RAMP_WIDTH)
                .attr("height", RAMP_HEIGHT)
                .attr("fill", format!("url(#{})", gradient_id)),
        )
        .child(
            axis::axis(Orient::Right, &ticks, (RAMP_HEIGHT, 0.0), false)
                .attr("transform", translate(RAMP_WIDTH, 0.0)),
        )
        .child(
            Element::new("text")
                .attr("x", RAMP_WIDTH / 2.0)
                .attr("y", -10)
                .attr("text-anchor", "middle")
                .text(title),
        )
}
