// src/model/mod.rs
//! The process graph: flat arenas of elements and flows addressed by id.

mod attributes;
mod kind;

pub use attributes::Attributes;
pub(crate) use attributes::KnownAttribute;
pub use kind::{ElementKind, KindFamily};

use serde::Serialize;
use std::collections::BTreeMap;

/// Root aggregate produced by the extractor.
///
/// Elements and flows keep document order. Adjacency on elements is always
/// derived from `flows` by [`crate::graph::link`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessGraph {
    pub metadata: ProcessMetadata,
    pub elements: Vec<Element>,
    pub flows: Vec<Flow>,
    pub provenance: Provenance,
}

impl ProcessGraph {
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.id == id)
    }

    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    #[must_use]
    pub fn count_family(&self, family: KindFamily) -> usize {
        self.elements
            .iter()
            .filter(|e| e.kind.family() == family)
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetadata {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
    pub is_executable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// A node in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Enclosing sub-process, when the element is nested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    incoming: Vec<String>,
    outgoing: Vec<String>,
}

impl Element {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        let id = id.into();
        Self {
            name: fallback_name(kind, &id),
            id,
            kind,
            description: None,
            attributes: Attributes::default(),
            parent_id: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Ids of flows targeting this element.
    #[must_use]
    pub fn incoming(&self) -> &[String] {
        &self.incoming
    }

    /// Ids of flows leaving this element.
    #[must_use]
    pub fn outgoing(&self) -> &[String] {
        &self.outgoing
    }

    /// True when the diagram gave no name and the label is the generated fallback.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name.trim().is_empty() || self.name == fallback_name(self.kind, &self.id)
    }

    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }

    pub(crate) fn set_adjacency(&mut self, incoming: Vec<String>, outgoing: Vec<String>) {
        self.incoming = incoming;
        self.outgoing = outgoing;
    }
}

fn fallback_name(kind: ElementKind, id: &str) -> String {
    format!("{}_{id}", kind.label())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FlowKind {
    #[default]
    #[serde(rename = "sequenceFlow")]
    Sequence,
}

/// A directed connector between two element ids. Either id may be dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: FlowKind,
    pub source_ref: String,
    pub target_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Flow {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind: FlowKind::Sequence,
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
            condition: None,
            description: None,
        }
    }

    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.condition
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

/// Non-fatal irregularities noticed while extracting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub issues: Vec<ExtractionIssue>,
}

impl Provenance {
    pub fn malformed_flows(&self) -> impl Iterator<Item = &ExtractionIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ExtractionIssue::MalformedFlow { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExtractionIssue {
    /// A `sequenceFlow` lacked `sourceRef` or `targetRef` and was skipped.
    #[serde(rename_all = "camelCase")]
    MalformedFlow {
        flow_id: Option<String>,
        /// Position among the document's `sequenceFlow` tags.
        index: usize,
        missing: Vec<&'static str>,
    },
    /// A BPMN-namespace child of the process with no known kind.
    UnrecognizedElement { tag: String },
    /// Only the first `process` is analyzed.
    #[serde(rename_all = "camelCase")]
    AdditionalProcessIgnored { process_id: Option<String> },
    /// A second element reused an id; the first one wins.
    DuplicateElementId { id: String },
    /// A recognized element without an `id` attribute.
    MissingElementId { tag: String },
}

impl ExtractionIssue {
    /// Subject used in `MALFORMED_FLOW:<subject>` issue keys.
    #[must_use]
    pub fn subject(&self) -> String {
        match self {
            Self::MalformedFlow { flow_id, index, .. } => flow_id
                .clone()
                .unwrap_or_else(|| format!("#{index}")),
            Self::UnrecognizedElement { tag } | Self::MissingElementId { tag } => tag.clone(),
            Self::AdditionalProcessIgnored { process_id } => {
                process_id.clone().unwrap_or_default()
            }
            Self::DuplicateElementId { id } => id.clone(),
        }
    }
}
