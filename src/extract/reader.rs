// src/extract/reader.rs
//! Pull-parser state machine over a BPMN document.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use tracing::{debug, warn};

use super::BPMN_MODEL_NS;
use crate::error::ParseError;
use crate::model::{
    Attributes, Element, ElementKind, ExtractionIssue, Flow, KnownAttribute, ProcessGraph,
    ProcessMetadata, Provenance,
};

/// Prefixes accepted as BPMN when a document forgot to declare them.
const LENIENT_PREFIXES: &[&[u8]] = &[b"bpmn", b"bpmn2", b"model"];

/// Children of the process that are structural noise, not skipped nodes.
const QUIET_CHILDREN: &[&str] = &[
    "documentation",
    "extensionElements",
    "incoming",
    "outgoing",
    "ioSpecification",
    "property",
    "dataInputAssociation",
    "dataOutputAssociation",
    "multiInstanceLoopCharacteristics",
    "standardLoopCharacteristics",
];

#[derive(Debug, Clone, Copy)]
enum DocTarget {
    Process,
    Element(usize),
    Flow(usize),
}

#[derive(Debug, Clone, Copy)]
enum Ctx {
    Definitions,
    Process { primary: bool },
    Element(usize),
    /// A duplicate of the element at this index; its children still nest under that id.
    Shadowed(usize),
    Flow(usize),
    Documentation(DocTarget),
    Script(usize),
    Condition(usize),
    Other,
}

struct Frame {
    ctx: Ctx,
    text: String,
}

struct Attr {
    qualified: String,
    local: String,
    value: String,
}

#[derive(Default)]
struct PendingFlow {
    index: usize,
    id: Option<String>,
    name: Option<String>,
    source: Option<String>,
    target: Option<String>,
    condition: Option<String>,
    description: Option<String>,
}

pub(super) struct Extractor<'a> {
    reader: NsReader<&'a [u8]>,
    stack: Vec<Frame>,
    saw_root: bool,
    target_namespace: Option<String>,
    metadata: Option<ProcessMetadata>,
    elements: Vec<Element>,
    element_ids: HashMap<String, usize>,
    pending: Vec<PendingFlow>,
    flows: Vec<Flow>,
    flow_tags: usize,
    issues: Vec<ExtractionIssue>,
}

impl<'a> Extractor<'a> {
    pub(super) fn new(document: &'a str) -> Self {
        Self {
            reader: NsReader::from_str(document),
            stack: Vec::new(),
            saw_root: false,
            target_namespace: None,
            metadata: None,
            elements: Vec::new(),
            element_ids: HashMap::new(),
            pending: Vec::new(),
            flows: Vec::new(),
            flow_tags: 0,
            issues: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> Result<ProcessGraph, ParseError> {
        loop {
            let position = self.position();
            let (bpmn, event) = match self.reader.read_resolved_event() {
                Ok((ns, event)) => (is_bpmn(&ns), event),
                Err(e) => return Err(ParseError::malformed(position, e.to_string())),
            };
            match event {
                Event::Start(e) => self.open(bpmn, &e)?,
                Event::Empty(e) => {
                    self.open(bpmn, &e)?;
                    self.close();
                }
                Event::End(_) => self.close(),
                Event::Text(t) => {
                    if self.collecting() {
                        let text = t
                            .unescape()
                            .map_err(|e| ParseError::malformed(position, e.to_string()))?;
                        self.push_text(&text);
                    }
                }
                Event::CData(c) => {
                    if self.collecting() {
                        let raw = c.into_inner();
                        self.push_text(&String::from_utf8_lossy(&raw));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        self.finish()
    }

    fn finish(self) -> Result<ProcessGraph, ParseError> {
        if !self.saw_root {
            return Err(ParseError::malformed(0, "document has no root element"));
        }
        if !self.stack.is_empty() {
            return Err(ParseError::malformed(
                self.position(),
                format!("unexpected end of document: {} element(s) left open", self.stack.len()),
            ));
        }
        let mut metadata = self.metadata.ok_or(ParseError::MissingProcessDefinition)?;
        metadata.target_namespace = self.target_namespace;

        Ok(ProcessGraph {
            metadata,
            elements: self.elements,
            flows: self.flows,
            provenance: Provenance {
                issues: self.issues,
            },
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn open(&mut self, bpmn: bool, e: &BytesStart) -> Result<(), ParseError> {
        self.saw_root = true;
        let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let ctx = if bpmn {
            self.classify(&local, e)?
        } else {
            Ctx::Other
        };
        self.stack.push(Frame {
            ctx,
            text: String::new(),
        });
        Ok(())
    }

    fn classify(&mut self, local: &str, e: &BytesStart) -> Result<Ctx, ParseError> {
        let parent = self.stack.last().map(|f| f.ctx);

        if local == "definitions" {
            let attrs = self.attributes(e)?;
            self.target_namespace = find(&attrs, "targetNamespace");
            return Ok(Ctx::Definitions);
        }
        if local == "process" {
            let attrs = self.attributes(e)?;
            return Ok(self.open_process(attrs));
        }
        if !self.in_primary_process() {
            return Ok(Ctx::Other);
        }

        let ctx = match (local, parent) {
            ("documentation", Some(Ctx::Process { primary: true })) => {
                Ctx::Documentation(DocTarget::Process)
            }
            ("documentation", Some(Ctx::Element(i))) => Ctx::Documentation(DocTarget::Element(i)),
            ("documentation", Some(Ctx::Flow(p))) => Ctx::Documentation(DocTarget::Flow(p)),
            ("script", Some(Ctx::Element(i)))
                if self.elements[i].kind == ElementKind::ScriptTask =>
            {
                Ctx::Script(i)
            }
            ("conditionExpression", Some(Ctx::Flow(p))) => Ctx::Condition(p),
            ("sequenceFlow", _) => {
                let attrs = self.attributes(e)?;
                self.open_flow(attrs)
            }
            _ => match ElementKind::from_tag(local) {
                Some(kind) => {
                    let attrs = self.attributes(e)?;
                    self.open_element(local, kind, attrs)
                }
                None => {
                    self.note_unrecognized(local, parent);
                    Ctx::Other
                }
            },
        };
        Ok(ctx)
    }

    fn open_process(&mut self, attrs: Vec<Attr>) -> Ctx {
        if self.metadata.is_some() {
            let process_id = find(&attrs, "id");
            debug!(?process_id, "ignoring additional process definition");
            self.issues
                .push(ExtractionIssue::AdditionalProcessIgnored { process_id });
            return Ctx::Process { primary: false };
        }

        let mut metadata = ProcessMetadata {
            name: "Unnamed Process".to_string(),
            ..ProcessMetadata::default()
        };
        for attr in attrs {
            match attr.qualified.as_str() {
                "id" => metadata.id = attr.value,
                "name" if !attr.value.trim().is_empty() => metadata.name = attr.value,
                "isExecutable" => metadata.is_executable = attr.value.trim() == "true",
                _ => {
                    metadata.attributes.insert(attr.qualified, attr.value);
                }
            }
        }
        self.metadata = Some(metadata);
        Ctx::Process { primary: true }
    }

    fn open_element(&mut self, tag: &str, kind: ElementKind, attrs: Vec<Attr>) -> Ctx {
        let mut id = None;
        let mut name = None;
        let mut attributes = Attributes::default();

        for attr in attrs {
            match attr.qualified.as_str() {
                "id" => id = Some(attr.value),
                "name" => name = Some(attr.value),
                _ => match KnownAttribute::from_local_name(&attr.local) {
                    Some(known) if kind.is_task() => attributes.set_known(known, attr.value),
                    _ => {
                        attributes.other.insert(attr.qualified, attr.value);
                    }
                },
            }
        }

        let Some(id) = id.filter(|i| !i.trim().is_empty()) else {
            warn!(tag, "element without id skipped");
            self.issues.push(ExtractionIssue::MissingElementId {
                tag: tag.to_string(),
            });
            return Ctx::Other;
        };
        if let Some(&first) = self.element_ids.get(&id) {
            warn!(%id, "duplicate element id skipped");
            self.issues.push(ExtractionIssue::DuplicateElementId { id });
            return Ctx::Shadowed(first);
        }
        self.element_ids.insert(id.clone(), self.elements.len());

        let mut element = Element::new(id, kind).with_attributes(attributes);
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            element = element.with_name(name);
        }
        element.parent_id = self.enclosing_element().map(|i| self.elements[i].id.clone());

        self.elements.push(element);
        Ctx::Element(self.elements.len() - 1)
    }

    fn open_flow(&mut self, attrs: Vec<Attr>) -> Ctx {
        let mut flow = PendingFlow {
            index: self.flow_tags,
            ..PendingFlow::default()
        };
        self.flow_tags += 1;

        for attr in attrs {
            let value = Some(attr.value).filter(|v| !v.trim().is_empty());
            match attr.qualified.as_str() {
                "id" => flow.id = value,
                "name" => flow.name = value,
                "sourceRef" => flow.source = value,
                "targetRef" => flow.target = value,
                _ => {}
            }
        }
        self.pending.push(flow);
        Ctx::Flow(self.pending.len() - 1)
    }

    fn note_unrecognized(&mut self, local: &str, parent: Option<Ctx>) {
        let structural_parent = match parent {
            Some(Ctx::Process { primary: true }) => true,
            Some(Ctx::Element(i)) => self.elements[i].kind == ElementKind::SubProcess,
            _ => false,
        };
        if structural_parent && !QUIET_CHILDREN.contains(&local) {
            debug!(tag = local, "unrecognized element kind skipped");
            self.issues.push(ExtractionIssue::UnrecognizedElement {
                tag: local.to_string(),
            });
        }
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let text = frame.text.trim();
        let text = (!text.is_empty()).then(|| text.to_string());

        match frame.ctx {
            Ctx::Documentation(DocTarget::Process) => {
                if let Some(meta) = self.metadata.as_mut() {
                    if meta.documentation.is_none() {
                        meta.documentation = text;
                    }
                }
            }
            Ctx::Documentation(DocTarget::Element(i)) => {
                let element = &mut self.elements[i];
                if element.description.is_none() {
                    element.description = text;
                }
            }
            Ctx::Documentation(DocTarget::Flow(p)) => {
                let flow = &mut self.pending[p];
                if flow.description.is_none() {
                    flow.description = text;
                }
            }
            Ctx::Script(i) => self.elements[i].attributes.script_body = text,
            Ctx::Condition(p) => self.pending[p].condition = text,
            Ctx::Flow(p) => self.finish_flow(p),
            Ctx::Definitions
            | Ctx::Process { .. }
            | Ctx::Element(_)
            | Ctx::Shadowed(_)
            | Ctx::Other => {}
        }
    }

    fn finish_flow(&mut self, p: usize) {
        let pending = std::mem::take(&mut self.pending[p]);
        match (pending.id, pending.source, pending.target) {
            (Some(id), Some(source), Some(target)) => {
                let mut flow = Flow::new(id, source, target);
                flow.name = pending.name;
                flow.condition = pending.condition;
                flow.description = pending.description;
                self.flows.push(flow);
            }
            (id, source, target) => {
                let missing: Vec<&'static str> = [
                    ("id", id.is_none()),
                    ("sourceRef", source.is_none()),
                    ("targetRef", target.is_none()),
                ]
                .into_iter()
                .filter_map(|(attr, absent)| absent.then_some(attr))
                .collect();
                warn!(?id, index = pending.index, ?missing, "malformed sequence flow skipped");
                self.issues.push(ExtractionIssue::MalformedFlow {
                    flow_id: id,
                    index: pending.index,
                    missing,
                });
            }
        }
    }

    fn collecting(&self) -> bool {
        matches!(
            self.stack.last().map(|f| f.ctx),
            Some(Ctx::Documentation(_) | Ctx::Script(_) | Ctx::Condition(_))
        )
    }

    fn push_text(&mut self, text: &str) {
        if let Some(frame) = self.stack.last_mut() {
            frame.text.push_str(text);
        }
    }

    fn in_primary_process(&self) -> bool {
        self.stack
            .iter()
            .any(|f| matches!(f.ctx, Ctx::Process { primary: true }))
    }

    fn enclosing_element(&self) -> Option<usize> {
        self.stack.iter().rev().find_map(|f| match f.ctx {
            Ctx::Element(i) | Ctx::Shadowed(i) => Some(i),
            _ => None,
        })
    }

    fn attributes(&self, e: &BytesStart) -> Result<Vec<Attr>, ParseError> {
        let position = self.position();
        let mut out = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| ParseError::malformed(position, err.to_string()))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let value = attr
                .unescape_value()
                .map_err(|err| ParseError::malformed(position, err.to_string()))?
                .into_owned();
            out.push(Attr {
                qualified: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                local: String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
                value,
            });
        }
        Ok(out)
    }
}

fn is_bpmn(ns: &ResolveResult) -> bool {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => *uri == BPMN_MODEL_NS.as_bytes(),
        ResolveResult::Unbound => true,
        ResolveResult::Unknown(prefix) => LENIENT_PREFIXES.contains(&prefix.as_slice()),
    }
}

fn find(attrs: &[Attr], qualified: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| a.qualified == qualified)
        .map(|a| a.value.clone())
}
