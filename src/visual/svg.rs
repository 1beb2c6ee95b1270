// src/visual/svg.rs
//! Static SVG rendering of a [`VisualizationGraph`].

use std::collections::HashMap;
use std::fmt::{self, Display, Write};

use quick_xml::escape::escape;

use super::{VisualEdge, VisualNode, VisualizationGraph};
use crate::model::{ElementKind, KindFamily};

const MIN_WIDTH: i64 = 800;
const MIN_HEIGHT: i64 = 600;
const STROKE: &str = "#333";

/// Renders the graph as a standalone SVG document.
#[must_use]
pub fn render_svg(graph: &VisualizationGraph) -> String {
    Svg(graph).to_string()
}

struct Svg<'a>(&'a VisualizationGraph);

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        let width = graph.nodes.iter().map(|n| n.x + 150).fold(MIN_WIDTH, i64::max);
        let height = graph.nodes.iter().map(|n| n.y + 100).fold(MIN_HEIGHT, i64::max);

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
        )?;
        writeln!(f, r##"<rect width="100%" height="100%" fill="#f8f9fa"/>"##)?;
        writeln!(
            f,
            r#"<defs><marker id="arrowhead" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{STROKE}"/></marker></defs>"#
        )?;

        let by_id: HashMap<&str, &VisualNode> =
            graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        for edge in &graph.edges {
            if let (Some(from), Some(to)) = (
                by_id.get(edge.source.as_str()),
                by_id.get(edge.target.as_str()),
            ) {
                write_edge(f, edge, from, to)?;
            }
        }
        for node in &graph.nodes {
            write_node(f, node)?;
        }
        writeln!(f, "</svg>")
    }
}

fn write_node(out: &mut impl Write, node: &VisualNode) -> fmt::Result {
    let (x, y, fill) = (node.x, node.y, node.color);
    match node.kind {
        ElementKind::StartEvent => writeln!(
            out,
            r#"<circle cx="{x}" cy="{y}" r="20" fill="{fill}" stroke="{STROKE}" stroke-width="2"/>"#
        )?,
        ElementKind::EndEvent => writeln!(
            out,
            r#"<circle cx="{x}" cy="{y}" r="20" fill="{fill}" stroke="{STROKE}" stroke-width="3"/>"#
        )?,
        kind if kind.family() == KindFamily::Event => {
            writeln!(
                out,
                r#"<circle cx="{x}" cy="{y}" r="20" fill="{fill}" stroke="{STROKE}" stroke-width="1"/>"#
            )?;
            writeln!(
                out,
                r#"<circle cx="{x}" cy="{y}" r="16" fill="none" stroke="{STROKE}" stroke-width="1"/>"#
            )?;
        }
        kind if kind.family() == KindFamily::Gateway => writeln!(
            out,
            r#"<polygon points="{x},{top} {right},{y} {x},{bottom} {left},{y}" fill="{fill}" stroke="{STROKE}" stroke-width="2"/>"#,
            top = y - 30,
            right = x + 30,
            bottom = y + 30,
            left = x - 30,
        )?,
        _ => writeln!(
            out,
            r#"<rect x="{rx}" y="{ry}" width="100" height="50" rx="5" fill="{fill}" stroke="{STROKE}" stroke-width="2"/>"#,
            rx = x - 50,
            ry = y - 25,
        )?,
    }
    writeln!(
        out,
        r#"<text x="{x}" y="{ty}" text-anchor="middle" font-family="Arial" font-size="12">{label}</text>"#,
        ty = y + 50,
        label = escape(node.label.as_str()),
    )
}

fn write_edge(
    out: &mut impl Write,
    edge: &VisualEdge,
    from: &VisualNode,
    to: &VisualNode,
) -> fmt::Result {
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2" marker-end="url(#arrowhead)"/>"#,
        from.x, from.y, to.x, to.y, edge.color
    )?;
    if !edge.label.is_empty() {
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial" font-size="10">{}</text>"#,
            (from.x + to.x) / 2,
            (from.y + to.y) / 2 - 5,
            escape(edge.label.as_str()),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlowKind;
    use crate::types::ComplexityBucket;
    use crate::visual::VisualMetrics;

    fn node(id: &str, kind: ElementKind, x: i64, y: i64) -> VisualNode {
        VisualNode {
            id: id.into(),
            label: format!("{id} <&>"),
            kind,
            color: "#000000",
            x,
            y,
        }
    }

    fn sample() -> VisualizationGraph {
        VisualizationGraph {
            nodes: vec![
                node("s", ElementKind::StartEvent, 100, 100),
                node("g", ElementKind::ExclusiveGateway, 300, 100),
                node("t", ElementKind::UserTask, 500, 100),
            ],
            edges: vec![VisualEdge {
                id: "f".into(),
                source: "s".into(),
                target: "g".into(),
                label: String::new(),
                kind: FlowKind::Sequence,
                color: "#6c757d",
            }],
            metrics: VisualMetrics {
                node_count: 3,
                edge_count: 1,
                complexity_bucket: ComplexityBucket::Low,
            },
        }
    }

    #[test]
    fn shapes_per_kind() {
        let svg = render_svg(&sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<circle cx="100" cy="100" r="20""#));
        assert!(svg.contains(r#"points="300,70 330,100 300,130 270,100""#));
        assert!(svg.contains(r#"<rect x="450" y="75" width="100" height="50" rx="5""#));
        assert!(svg.contains(r#"marker-end="url(#arrowhead)""#));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = render_svg(&sample());
        assert!(svg.contains("s &lt;&amp;&gt;"));
        assert!(!svg.contains("s <&>"));
    }
}
