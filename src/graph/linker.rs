// src/graph/linker.rs
//! Derives element adjacency from the flow list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::FlowIndex;
use crate::model::{Element, ProcessGraph};

/// A flow whose endpoints are not all present in the element set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingFlow {
    pub flow_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_target: Option<String>,
}

/// A process graph with adjacency filled in and dangling flows identified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedGraph {
    graph: ProcessGraph,
    dangling: Vec<DanglingFlow>,
    /// Element id -> arena position; the first element wins on duplicates.
    #[serde(skip)]
    positions: HashMap<String, usize>,
    #[serde(skip)]
    dangling_ids: HashSet<String>,
}

impl LinkedGraph {
    #[must_use]
    pub fn graph(&self) -> &ProcessGraph {
        &self.graph
    }

    #[must_use]
    pub fn dangling(&self) -> &[DanglingFlow] {
        &self.dangling
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.positions.get(id).map(|&i| &self.graph.elements[i])
    }

    #[must_use]
    pub fn is_dangling(&self, flow_id: &str) -> bool {
        self.dangling_ids.contains(flow_id)
    }

    #[must_use]
    pub fn into_graph(self) -> ProcessGraph {
        self.graph
    }
}

/// Recomputes `incoming`/`outgoing` for every element from `graph.flows`.
///
/// Whatever adjacency the input carried is discarded, so linking an already
/// linked graph yields the same lists. Dangling flows stay in the flow list.
#[must_use]
pub fn link(mut graph: ProcessGraph) -> LinkedGraph {
    let (adjacency, dangling) = {
        let index = FlowIndex::build(&graph.flows);
        let adjacency: Vec<(Vec<String>, Vec<String>)> = graph
            .elements
            .iter()
            .map(|e| (owned(index.incoming(&e.id)), owned(index.outgoing(&e.id))))
            .collect();
        (adjacency, find_dangling(&graph))
    };

    for (element, (incoming, outgoing)) in graph.elements.iter_mut().zip(adjacency) {
        element.set_adjacency(incoming, outgoing);
    }

    for d in &dangling {
        debug!(
            flow = %d.flow_id,
            source = ?d.missing_source,
            target = ?d.missing_target,
            "dangling flow"
        );
    }

    let mut positions = HashMap::with_capacity(graph.elements.len());
    for (i, element) in graph.elements.iter().enumerate() {
        positions.entry(element.id.clone()).or_insert(i);
    }
    let dangling_ids = dangling.iter().map(|d| d.flow_id.clone()).collect();

    LinkedGraph {
        graph,
        dangling,
        positions,
        dangling_ids,
    }
}

fn find_dangling(graph: &ProcessGraph) -> Vec<DanglingFlow> {
    let ids: HashSet<&str> = graph.elements.iter().map(|e| e.id.as_str()).collect();
    graph
        .flows
        .iter()
        .filter_map(|f| {
            let missing_source =
                (!ids.contains(f.source_ref.as_str())).then(|| f.source_ref.clone());
            let missing_target =
                (!ids.contains(f.target_ref.as_str())).then(|| f.target_ref.clone());
            (missing_source.is_some() || missing_target.is_some()).then(|| DanglingFlow {
                flow_id: f.id.clone(),
                missing_source,
                missing_target,
            })
        })
        .collect()
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, ElementKind, Flow, ProcessMetadata, Provenance};

    fn graph(elements: Vec<Element>, flows: Vec<Flow>) -> ProcessGraph {
        ProcessGraph {
            metadata: ProcessMetadata::default(),
            elements,
            flows,
            provenance: Provenance::default(),
        }
    }

    #[test]
    fn fills_adjacency() {
        let linked = link(graph(
            vec![
                Element::new("a", ElementKind::StartEvent),
                Element::new("b", ElementKind::EndEvent),
            ],
            vec![Flow::new("f", "a", "b")],
        ));
        let g = linked.graph();
        assert_eq!(g.elements[0].outgoing(), ["f".to_string()]);
        assert_eq!(g.elements[1].incoming(), ["f".to_string()]);
        assert!(linked.dangling().is_empty());
    }

    #[test]
    fn dangling_flow_is_kept_and_reported() {
        let linked = link(graph(
            vec![Element::new("a", ElementKind::StartEvent)],
            vec![Flow::new("f", "a", "ghost")],
        ));
        assert_eq!(linked.graph().flows.len(), 1);
        assert_eq!(linked.graph().elements[0].outgoing(), ["f".to_string()]);
        assert_eq!(
            linked.dangling(),
            [DanglingFlow {
                flow_id: "f".into(),
                missing_source: None,
                missing_target: Some("ghost".into()),
            }]
        );
        assert!(linked.is_dangling("f"));
        assert!(!linked.is_dangling("a"));
    }

    #[test]
    fn element_lookup_prefers_first_duplicate() {
        let linked = link(graph(
            vec![
                Element::new("a", ElementKind::StartEvent),
                Element::new("a", ElementKind::EndEvent),
            ],
            Vec::new(),
        ));
        assert_eq!(linked.element("a").map(|e| e.kind), Some(ElementKind::StartEvent));
        assert!(linked.element("b").is_none());
    }
}
