//! SVG generation from the diagram graph

use crate::canvas::{CanvasNode, DiagramGraph};
use crate::layout::{BoundingBox, NodeKind, Point};
use crate::stylesheet::Stylesheet;

use super::anchor::edge_endpoints;
use super::ExportConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: ExportConfig,
    defs: Vec<String>,
    styles: Vec<String>,
    edges: Vec<String>,
    nodes: Vec<String>,
    markers: usize,
}

impl SvgBuilder {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            defs: vec![],
            styles: vec![],
            edges: vec![],
            nodes: vec![],
            markers: 0,
        }
    }

    /// Add text styles colored from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let prefix = self.prefix();
        let mut css = format!(
            ".{prefix}label {{ font-family: sans-serif; font-size: {}px; fill: {}; }}\n",
            self.config.font_size,
            stylesheet.color("text")
        );
        css.push_str(&format!(
            "    .{prefix}caption {{ font-family: sans-serif; font-size: {}px; fill: {}; }}",
            self.config.caption_font_size,
            stylesheet.color("caption")
        ));
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add an arrow marker and return its id
    ///
    /// Each edge gets its own marker so the head can take the edge color.
    fn add_arrow_marker(&mut self, color: &str) -> String {
        let id = format!("arrow-{}", self.markers);
        self.markers += 1;
        self.defs.push(format!(
            r#"<marker id="{id}" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="6" markerHeight="6" orient="auto">
      <path d="M0,0 L10,5 L0,10 Z" fill="{color}"/>
    </marker>"#
        ));
        id
    }

    /// Add a straight edge with an arrow head and an optional label
    pub fn add_edge(&mut self, from: Point, to: Point, label: &str, dashed: bool, color: &str) {
        let prefix = self.prefix();
        let marker = self.add_arrow_marker(color);
        let dash = if dashed {
            r#" stroke-dasharray="6 4""#
        } else {
            ""
        };

        self.edges.push(format!(
            r#"{}<path class="{}edge" d="M{} {} L{} {}" fill="none" stroke="{}" stroke-width="1.5"{} marker-end="url(#{})"/>"#,
            self.indent_str(),
            prefix,
            from.x,
            from.y,
            to.x,
            to.y,
            color,
            dash,
            marker
        ));

        if !label.is_empty() {
            let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
            self.edges.push(format!(
                r#"{}<text class="{}caption" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                self.indent_str(),
                prefix,
                mid.x,
                mid.y,
                escape_xml(label)
            ));
        }
    }

    /// Add a node as a rounded rectangle with its label
    pub fn add_node(&mut self, node: &CanvasNode, bounds: &BoundingBox) {
        let prefix = self.prefix();
        let indent = self.indent_str().to_string();
        let nl = self.newline().to_string();
        let kind = match node.kind {
            NodeKind::Component => "component",
            NodeKind::LayerHeader => "header",
            NodeKind::Separator => "separator",
        };

        let mut group = format!(
            r#"{indent}<g id="{}" class="{prefix}node {prefix}{kind}">{nl}"#,
            escape_xml(&node.id)
        );
        group.push_str(&format!(
            r#"{indent}{indent}<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="2"/>{nl}"#,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            node.fill,
            node.stroke,
            r = self.config.corner_radius,
        ));

        let center = bounds.center();
        match node.subtype.filter(|_| node.is_component()) {
            Some(subtype) => {
                let label_y = center.y - self.config.caption_font_size / 2.0;
                let caption_y = center.y + self.config.font_size / 2.0 + 2.0;
                group.push_str(&format!(
                    r#"{indent}{indent}<text class="{prefix}label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>{nl}"#,
                    center.x,
                    label_y,
                    escape_xml(&node.label)
                ));
                group.push_str(&format!(
                    r#"{indent}{indent}<text class="{prefix}caption" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">&#171;{}&#187;</text>{nl}"#,
                    center.x,
                    caption_y,
                    escape_xml(subtype.as_str())
                ));
            }
            None => {
                group.push_str(&format!(
                    r#"{indent}{indent}<text class="{prefix}label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>{nl}"#,
                    center.x,
                    center.y,
                    escape_xml(&node.label)
                ));
            }
        }
        group.push_str(&format!("{indent}</g>"));
        self.nodes.push(group);
    }

    /// Build the final SVG string; `viewbox` is already padded
    pub fn build(self, viewbox: BoundingBox, background: &str) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            viewbox.width, viewbox.height, viewbox.x, viewbox.y, viewbox.width, viewbox.height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            viewbox.x, viewbox.y, viewbox.width, viewbox.height, background
        ));
        svg.push_str(nl);

        // Edges first so nodes paint over their ends
        for edge in &self.edges {
            svg.push_str(edge);
            svg.push_str(nl);
        }
        for node in &self.nodes {
            svg.push_str(node);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render the exportable part of a graph
///
/// `nodes` holds the nodes to draw with their boxes; `bounds` is the padded
/// viewbox. Callers have already filtered and validated the nodes.
pub(super) fn render(
    graph: &DiagramGraph,
    nodes: &[(&CanvasNode, BoundingBox)],
    bounds: BoundingBox,
    config: &ExportConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    let edge_color = stylesheet.color("edge");
    let lookup = |id: &str| nodes.iter().find(|(n, _)| n.id == id);
    for edge in &graph.edges {
        let (Some((_, from)), Some((_, to))) = (lookup(edge.source.as_str()), lookup(edge.target.as_str()))
        else {
            continue;
        };
        let (start, end) = edge_endpoints(from, to);
        builder.add_edge(start, end, &edge.label, edge.dashed, &edge_color);
    }

    for (node, node_bounds) in nodes {
        builder.add_node(node, node_bounds);
    }

    builder.build(bounds, &stylesheet.color("background"))
}

/// Escape special XML characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("R&D <core>"), "R&amp;D &lt;core&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_each_edge_gets_its_own_marker() {
        let mut builder = SvgBuilder::new(ExportConfig::default());
        builder.add_edge(Point::new(0.0, 0.0), Point::new(0.0, 100.0), "", false, "#555");
        builder.add_edge(Point::new(0.0, 0.0), Point::new(100.0, 0.0), "uses", true, "#555");
        let svg = builder.build(BoundingBox::new(0.0, 0.0, 100.0, 100.0), "#fff");

        assert!(svg.contains(r#"<marker id="arrow-0""#));
        assert!(svg.contains(r#"<marker id="arrow-1""#));
        assert!(svg.contains(r#"marker-end="url(#arrow-1)""#));
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
        assert!(svg.contains(">uses</text>"));
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let config = ExportConfig::new().with_pretty_print(false).with_standalone(false);
        let builder = SvgBuilder::new(config);
        let svg = builder.build(BoundingBox::new(0.0, 0.0, 10.0, 10.0), "#fff");

        assert!(!svg.contains('\n'));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_text_styles_use_stylesheet_colors() {
        let stylesheet = Stylesheet::from_str(
            r##"
[colors]
text = "#101010"
"##,
        )
        .unwrap();
        let mut builder = SvgBuilder::new(ExportConfig::default());
        builder.add_stylesheet(&stylesheet);
        let svg = builder.build(BoundingBox::new(0.0, 0.0, 10.0, 10.0), "#fff");

        assert!(svg.contains(".av-label { font-family: sans-serif; font-size: 14px; fill: #101010; }"));
        assert!(svg.contains("fill: #666666; }"));
        assert!(!svg.contains(":root"));
    }
}
