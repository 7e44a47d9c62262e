// Chart renderers: line, heatmap, grouped bar and flat bar
pub mod axis;
pub mod flat_bar;
pub mod grouped_bar;
pub mod heatmap;
pub mod legend;
pub mod line;

use crate::application::scale_builder::PlotArea;
use crate::infrastructure::svg::{translate, Element};

/// Offset of every chart tooltip from the pointer, unless a chart overrides it.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -20.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Outer SVG size plus the margins reserved for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartFrame {
    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            width: self.width - self.margin.left - self.margin.right,
            height: self.height - self.margin.top - self.margin.bottom,
        }
    }

    /// Group translated into the plot area; marks are drawn in its coordinates.
    pub fn plot_group(&self) -> Element {
        Element::new("g")
            .attr("class", "plot")
            .attr("transform", translate(self.margin.left, self.margin.top))
    }

    pub fn svg(&self, plot: Element) -> Element {
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", self.width)
            .attr("height", self.height)
            .child(plot)
    }
}

/// Tooltip value line, e.g. `On Peak: 12.50 kWh`.
pub fn kwh(label: &str, value: f64) -> String {
    format!("{}: {:.2} kWh", label, value)
}
