// Minimal element tree for SVG marks and HTML tables
use std::fmt::{Display, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Builder form of [`Element::set_attr`].
    pub fn attr(mut self, name: &str, value: impl Display) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Display) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(current) = self.get_attr("class") {
            let remaining: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
            let remaining = remaining.join(" ");
            if remaining.is_empty() {
                self.remove_attr("class");
            } else {
                self.set_attr("class", remaining);
            }
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// Depth-first search including `self`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.children() {
            child.find_all(pred, out);
        }
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|n| match n {
            Node::Element(e) => e.find_mut(pred),
            Node::Text(_) => None,
        })
    }

    pub fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape(v));
        }
        out.push('>');
        for node in &self.children {
            match node {
                Node::Element(e) => e.write_html(out),
                Node::Text(t) => out.push_str(&escape(t)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `translate(x,y)` transform attribute value.
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", fmt_px(x), fmt_px(y))
}

/// Pixel value with at most two decimals and no trailing zeros.
pub fn fmt_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.2}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_nested_elements_with_escaping() {
        let svg = Element::new("svg")
            .attr("width", 10)
            .child(Element::new("text").attr("class", "label").text("A & <B>"));
        assert_eq!(
            svg.to_html(),
            r#"<svg width="10"><text class="label">A &amp; &lt;B&gt;</text></svg>"#
        );
    }

    #[test]
    fn test_set_attr_replaces_existing_value() {
        let mut rect = Element::new("rect").attr("stroke", "white");
        rect.set_attr("stroke", "black");
        assert_eq!(rect.get_attr("stroke"), Some("black"));
        assert_eq!(rect.to_html(), r#"<rect stroke="black"></rect>"#);
    }

    #[test]
    fn test_remove_class_keeps_others() {
        let mut table = Element::new("table").attr("class", "data-table hidden");
        table.remove_class("hidden");
        assert!(table.has_class("data-table"));
        assert!(!table.has_class("hidden"));
    }

    #[test]
    fn test_fmt_px_trims() {
        assert_eq!(fmt_px(12.0), "12");
        assert_eq!(fmt_px(12.346), "12.35");
        assert_eq!(fmt_px(-0.001), "0");
        assert_eq!(translate(70.0, 20.5), "translate(70,20.5)");
    }
}
