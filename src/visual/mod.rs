// src/visual/mod.rs
//! Display graph: nodes on a fixed grid, edges colored from the palette.

pub mod palette;
mod svg;

pub use palette::{color_of, element_color, flow_color, DisplayKind, FALLBACK_COLOR};
pub use svg::render_svg;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::graph::LinkedGraph;
use crate::model::{ElementKind, FlowKind};
use crate::types::ComplexityBucket;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualNode {
    pub id: String,
    pub label: String,
    pub kind: ElementKind,
    pub color: &'static str,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub kind: FlowKind,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMetrics {
    pub node_count: usize,
    pub edge_count: usize,
    pub complexity_bucket: ComplexityBucket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub metrics: VisualMetrics,
}

impl VisualizationGraph {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// One node per element in document order, one edge per flow whose endpoints
/// both exist. The bucket is carried through as given.
#[must_use]
pub fn project(
    linked: &LinkedGraph,
    bucket: ComplexityBucket,
    layout: &LayoutConfig,
) -> VisualizationGraph {
    let graph = linked.graph();

    let nodes: Vec<VisualNode> = graph
        .elements
        .iter()
        .enumerate()
        .map(|(index, e)| {
            let (x, y) = grid_position(index, layout);
            VisualNode {
                id: e.id.clone(),
                label: e.name.clone(),
                kind: e.kind,
                color: element_color(e.kind),
                x,
                y,
            }
        })
        .collect();

    let edges: Vec<VisualEdge> = graph
        .flows
        .iter()
        .filter(|f| !linked.is_dangling(&f.id))
        .map(|f| VisualEdge {
            id: f.id.clone(),
            source: f.source_ref.clone(),
            target: f.target_ref.clone(),
            label: f.name.clone().unwrap_or_default(),
            kind: f.kind,
            color: flow_color(f.kind),
        })
        .collect();

    VisualizationGraph {
        metrics: VisualMetrics {
            node_count: nodes.len(),
            edge_count: edges.len(),
            complexity_bucket: bucket,
        },
        nodes,
        edges,
    }
}

/// Row-major cell centre for the `index`th node.
#[must_use]
pub fn grid_position(index: usize, layout: &LayoutConfig) -> (i64, i64) {
    let columns = layout.columns.max(1);
    let col = i64::try_from(index % columns).unwrap_or(i64::MAX);
    let row = i64::try_from(index / columns).unwrap_or(i64::MAX);
    (
        layout
            .origin_x
            .saturating_add(col.saturating_mul(layout.cell_width)),
        layout
            .origin_y
            .saturating_add(row.saturating_mul(layout.cell_height)),
    )
}
