// src/model/kind.rs
//! Closed set of BPMN element kinds and the tag lookup table.

use serde::Serialize;
use std::fmt;

/// Every BPMN node type the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    StartEvent,
    EndEvent,
    UserTask,
    ServiceTask,
    ScriptTask,
    BusinessRuleTask,
    SendTask,
    ReceiveTask,
    Task,
    ExclusiveGateway,
    ParallelGateway,
    InclusiveGateway,
    EventBasedGateway,
    ComplexGateway,
    SubProcess,
    CallActivity,
    BoundaryEvent,
    IntermediateThrowEvent,
    IntermediateCatchEvent,
}

/// Coarse grouping used by metrics, rules and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindFamily {
    Event,
    Task,
    Gateway,
    Activity,
}

/// Local tag name -> kind. Anything not listed here is not an element.
const TAG_TABLE: &[(&str, ElementKind)] = &[
    ("startEvent", ElementKind::StartEvent),
    ("endEvent", ElementKind::EndEvent),
    ("userTask", ElementKind::UserTask),
    ("serviceTask", ElementKind::ServiceTask),
    ("scriptTask", ElementKind::ScriptTask),
    ("businessRuleTask", ElementKind::BusinessRuleTask),
    ("sendTask", ElementKind::SendTask),
    ("receiveTask", ElementKind::ReceiveTask),
    ("task", ElementKind::Task),
    ("exclusiveGateway", ElementKind::ExclusiveGateway),
    ("parallelGateway", ElementKind::ParallelGateway),
    ("inclusiveGateway", ElementKind::InclusiveGateway),
    ("eventBasedGateway", ElementKind::EventBasedGateway),
    ("complexGateway", ElementKind::ComplexGateway),
    ("subProcess", ElementKind::SubProcess),
    ("callActivity", ElementKind::CallActivity),
    ("boundaryEvent", ElementKind::BoundaryEvent),
    ("intermediateThrowEvent", ElementKind::IntermediateThrowEvent),
    ("intermediateCatchEvent", ElementKind::IntermediateCatchEvent),
];

impl ElementKind {
    /// Looks up a kind by its local (unprefixed) tag name.
    #[must_use]
    pub fn from_tag(local_name: &str) -> Option<Self> {
        TAG_TABLE
            .iter()
            .find(|(tag, _)| *tag == local_name)
            .map(|(_, kind)| *kind)
    }

    /// The BPMN tag spelling, e.g. `userTask`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        TAG_TABLE
            .iter()
            .find(|(_, kind)| *kind == self)
            .map_or("task", |(tag, _)| tag)
    }

    #[must_use]
    pub fn family(self) -> KindFamily {
        match self {
            Self::StartEvent
            | Self::EndEvent
            | Self::BoundaryEvent
            | Self::IntermediateThrowEvent
            | Self::IntermediateCatchEvent => KindFamily::Event,
            Self::UserTask
            | Self::ServiceTask
            | Self::ScriptTask
            | Self::BusinessRuleTask
            | Self::SendTask
            | Self::ReceiveTask
            | Self::Task => KindFamily::Task,
            Self::ExclusiveGateway
            | Self::ParallelGateway
            | Self::InclusiveGateway
            | Self::EventBasedGateway
            | Self::ComplexGateway => KindFamily::Gateway,
            Self::SubProcess | Self::CallActivity => KindFamily::Activity,
        }
    }

    #[must_use]
    pub fn is_task(self) -> bool {
        self.family() == KindFamily::Task
    }

    #[must_use]
    pub fn is_gateway(self) -> bool {
        self.family() == KindFamily::Gateway
    }

    #[must_use]
    pub fn is_event(self) -> bool {
        self.family() == KindFamily::Event
    }

    /// Type name used for fallback element names (`UserTask_t1`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::StartEvent => "StartEvent",
            Self::EndEvent => "EndEvent",
            Self::UserTask => "UserTask",
            Self::ServiceTask => "ServiceTask",
            Self::ScriptTask => "ScriptTask",
            Self::BusinessRuleTask => "BusinessRuleTask",
            Self::SendTask => "SendTask",
            Self::ReceiveTask => "ReceiveTask",
            Self::Task => "Task",
            Self::ExclusiveGateway => "ExclusiveGateway",
            Self::ParallelGateway => "ParallelGateway",
            Self::InclusiveGateway => "InclusiveGateway",
            Self::EventBasedGateway => "EventBasedGateway",
            Self::ComplexGateway => "ComplexGateway",
            Self::SubProcess => "SubProcess",
            Self::CallActivity => "CallActivity",
            Self::BoundaryEvent => "BoundaryEvent",
            Self::IntermediateThrowEvent => "IntermediateThrowEvent",
            Self::IntermediateCatchEvent => "IntermediateCatchEvent",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
