// src/graph/index.rs
//! Element id -> flow ids, built once over the flow arena.

use std::collections::HashMap;

use crate::model::Flow;

#[derive(Debug, Default, Clone)]
struct Adjacency<'a> {
    incoming: Vec<&'a str>,
    outgoing: Vec<&'a str>,
}

/// Adjacency lookup over a flow list. Lists keep flow order.
#[derive(Debug, Default, Clone)]
pub struct FlowIndex<'a> {
    by_element: HashMap<&'a str, Adjacency<'a>>,
}

impl<'a> FlowIndex<'a> {
    #[must_use]
    pub fn build(flows: &'a [Flow]) -> Self {
        let mut by_element: HashMap<&'a str, Adjacency<'a>> = HashMap::new();
        for flow in flows {
            by_element
                .entry(flow.source_ref.as_str())
                .or_default()
                .outgoing
                .push(flow.id.as_str());
            by_element
                .entry(flow.target_ref.as_str())
                .or_default()
                .incoming
                .push(flow.id.as_str());
        }
        Self { by_element }
    }

    #[must_use]
    pub fn incoming(&self, element_id: &str) -> &[&'a str] {
        self.by_element
            .get(element_id)
            .map(|a| a.incoming.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn outgoing(&self, element_id: &str) -> &[&'a str] {
        self.by_element
            .get(element_id)
            .map(|a| a.outgoing.as_slice())
            .unwrap_or_default()
    }
}
