// Render targets - the container a panel draws into
use crate::infrastructure::svg::{escape, fmt_px, Element};

/// Stroke applied to a mark while hovered, and restored afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub hover: Stroke,
    pub rest: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverBinding {
    pub mark_id: String,
    /// Tooltip body; `<br>` separates lines, everything else is escaped.
    pub lines: Vec<String>,
    /// Offset of the tooltip from the pointer.
    pub offset: (f64, f64),
    pub highlight: Option<Highlight>,
}

impl HoverBinding {
    pub fn new(mark_id: impl Into<String>, lines: Vec<String>, offset: (f64, f64)) -> Self {
        Self {
            mark_id: mark_id.into(),
            lines,
            offset,
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn html(&self) -> String {
        self.lines
            .iter()
            .map(|l| escape(l))
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub html: String,
    pub left: f64,
    pub top: f64,
}

/// Owns its drawn nodes, one detached tooltip element and the hover bindings
/// of its interactive marks.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    id: String,
    nodes: Vec<Element>,
    tooltip: Option<Tooltip>,
    bindings: Vec<HoverBinding>,
    next_mark: usize,
}

impl RenderTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            tooltip: None,
            bindings: Vec::new(),
            next_mark: 0,
        }
    }

    /// A target pre-populated with a hidden table skeleton.
    pub fn with_table(id: impl Into<String>, headers: &[&str]) -> Self {
        let mut target = Self::new(id);
        let header_row = headers
            .iter()
            .fold(Element::new("tr"), |row, h| row.child(Element::new("th").text(*h)));
        target.nodes.push(
            Element::new("table")
                .attr("class", "data-table hidden")
                .child(Element::new("thead").child(header_row))
                .child(Element::new("tbody")),
        );
        target
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Drops nodes, tooltip and bindings together.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.tooltip = None;
        self.bindings.clear();
        self.next_mark = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn append(&mut self, node: Element) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Element] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Element] {
        &mut self.nodes
    }

    /// Unique id for the next interactive mark in this target.
    pub fn next_mark_id(&mut self) -> String {
        let id = format!("{}-mark-{}", self.id, self.next_mark);
        self.next_mark += 1;
        id
    }

    /// Create the hidden tooltip element if this render has none yet.
    pub fn ensure_tooltip(&mut self) {
        if self.tooltip.is_none() {
            self.tooltip = Some(Tooltip {
                visible: false,
                html: String::new(),
                left: 0.0,
                top: 0.0,
            });
        }
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn bind_hover(&mut self, binding: HoverBinding) {
        self.ensure_tooltip();
        self.bindings.push(binding);
    }

    pub fn bindings(&self) -> &[HoverBinding] {
        &self.bindings
    }

    /// Pointer entered (or moved over) `mark_id` at page position `pointer`.
    pub fn hover(&mut self, mark_id: &str, pointer: (f64, f64)) -> Option<&Tooltip> {
        let binding = self.bindings.iter().find(|b| b.mark_id == mark_id)?.clone();
        if let Some(highlight) = &binding.highlight {
            self.style_mark(mark_id, &highlight.hover);
        }
        let tooltip = self.tooltip.as_mut()?;
        tooltip.visible = true;
        tooltip.html = binding.html();
        tooltip.left = pointer.0 + binding.offset.0;
        tooltip.top = pointer.1 + binding.offset.1;
        self.tooltip.as_ref()
    }

    pub fn hover_out(&mut self, mark_id: &str) {
        let highlight = self
            .bindings
            .iter()
            .find(|b| b.mark_id == mark_id)
            .and_then(|b| b.highlight.clone());
        if let Some(highlight) = highlight {
            self.style_mark(mark_id, &highlight.rest);
        }
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.visible = false;
        }
    }

    fn style_mark(&mut self, mark_id: &str, stroke: &Stroke) {
        let is_mark = |e: &Element| e.get_attr("id") == Some(mark_id);
        if let Some(mark) = self.nodes.iter_mut().find_map(|n| n.find_mut(&is_mark)) {
            mark.set_attr("stroke", stroke.color);
            mark.set_attr("stroke-width", stroke.width);
        }
    }

    /// Every drawn element matching `pred`.
    pub fn select(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        for node in &self.nodes {
            node.find_all(pred, &mut found);
        }
        found
    }

    pub fn select_class(&self, class: &str) -> Vec<&Element> {
        self.select(&|e: &Element| e.has_class(class))
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<div id=\"{}\" class=\"render-target\">", escape(&self.id));
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        if let Some(tooltip) = &self.tooltip {
            out.push_str(&format!(
                concat!(
                    "<div class=\"tooltip\" style=\"position: absolute; display: {}; ",
                    "left: {}px; top: {}px; pointer-events: none;\">{}</div>"
                ),
                if tooltip.visible { "block" } else { "none" },
                fmt_px(tooltip.left),
                fmt_px(tooltip.top),
                tooltip.html
            ));
        }
        if !self.bindings.is_empty() {
            out.push_str("<script type=\"application/json\" class=\"hover-bindings\">[");
            for (i, binding) in self.bindings.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let entry = serde_json::json!({
                    "mark": binding.mark_id,
                    "html": binding.html(),
                    "dx": binding.offset.0,
                    "dy": binding.offset.1,
                    "highlight": binding.highlight.as_ref().map(|h| serde_json::json!({
                        "hover": [h.hover.color, h.hover.width],
                        "rest": [h.rest.color, h.rest.width],
                    })),
                });
                out.push_str(&entry.to_string().replace("</", "<\\/"));
            }
            out.push_str("]</script>");
        }
        out.push_str("</div>");
        out
    }
}
