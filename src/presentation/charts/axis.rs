// Axis generators
use chrono::NaiveDate;

use crate::infrastructure::scale::{BandScale, LinearScale, TimeScale};
use crate::infrastructure::svg::{fmt_px, translate, Element};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
    Right,
}

pub fn time_ticks(scale: &TimeScale, dates: &[NaiveDate], format: &str) -> Vec<Tick> {
    dates
        .iter()
        .map(|d| Tick {
            position: scale.map(*d),
            label: d.format(format).to_string(),
        })
        .collect()
}

/// One tick per band, centred in the band.
pub fn band_ticks<K, F>(scale: &BandScale<K>, label: F) -> Vec<Tick>
where
    K: PartialEq + Clone,
    F: Fn(&K) -> String,
{
    scale
        .domain()
        .iter()
        .filter_map(|k| {
            scale.center(k).map(|position| Tick {
                position,
                label: label(k),
            })
        })
        .collect()
}

pub fn linear_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    let format = scale.tick_format(count);
    scale
        .ticks(count)
        .into_iter()
        .map(|v| Tick {
            position: scale.map(v),
            label: format(v),
        })
        .collect()
}

/// Draw an axis along `range` with the given ticks. Bottom axes may rotate
/// their labels 45 degrees for long categorical keys.
pub fn axis(orient: Orient, ticks: &[Tick], range: (f64, f64), rotate_labels: bool) -> Element {
    let (r0, r1) = range;
    let (class, domain_path) = match orient {
        Orient::Bottom => (
            "axis axis-bottom",
            format!("M{},{}V0H{}V{}", fmt_px(r0), TICK_SIZE, fmt_px(r1), TICK_SIZE),
        ),
        Orient::Left => (
            "axis axis-left",
            format!("M{},{}H0V{}H{}", -TICK_SIZE, fmt_px(r0), fmt_px(r1), -TICK_SIZE),
        ),
        Orient::Right => (
            "axis axis-right",
            format!("M{},{}H0V{}H{}", TICK_SIZE, fmt_px(r0), fmt_px(r1), TICK_SIZE),
        ),
    };

    let mut group = Element::new("g")
        .attr("class", class)
        .attr("font-size", 10)
        .child(
            Element::new("path")
                .attr("class", "domain")
                .attr("stroke", "currentColor")
                .attr("fill", "none")
                .attr("d", domain_path),
        );

    for tick in ticks {
        group.push(tick_element(orient, tick, rotate_labels));
    }
    group
}

fn tick_element(orient: Orient, tick: &Tick, rotate_label: bool) -> Element {
    let offset = TICK_SIZE + TICK_PADDING;
    let (transform, line, text) = match orient {
        Orient::Bottom => {
            let text = Element::new("text")
                .attr("fill", "currentColor")
                .attr("y", offset)
                .attr("dy", "0.71em");
            let text = if rotate_label {
                text.attr("transform", "rotate(45)").attr("text-anchor", "start")
            } else {
                text.attr("text-anchor", "middle")
            };
            (
                translate(tick.position, 0.0),
                Element::new("line").attr("y2", TICK_SIZE),
                text,
            )
        }
        Orient::Left => (
            translate(0.0, tick.position),
            Element::new("line").attr("x2", -TICK_SIZE),
            Element::new("text")
                .attr("fill", "currentColor")
                .attr("x", -offset)
                .attr("dy", "0.32em")
                .attr("text-anchor", "end"),
        ),
        Orient::Right => (
            translate(0.0, tick.position),
            Element::new("line").attr("x2", TICK_SIZE),
            Element::new("text")
                .attr("fill", "currentColor")
                .attr("x", offset)
                .attr("dy", "0.32em")
                .attr("text-anchor", "start"),
        ),
    };

    Element::new("g")
        .attr("class", "tick")
        .attr("transform", transform)
        .child(line.attr("stroke", "currentColor"))
        .child(text.text(tick.label.clone()))
}

/// Axis title. `rotated` titles run bottom-to-top along a vertical axis.
pub fn axis_label(text: &str, x: f64, y: f64, rotated: bool) -> Element {
    let label = Element::new("text")
        .attr("class", "axis-label")
        .attr("x", fmt_px(x))
        .attr("y", fmt_px(y))
        .attr("text-anchor", "middle");
    let label = if rotated {
        label.attr("transform", "rotate(-90)")
    } else {
        label
    };
    label.text(text)
}
