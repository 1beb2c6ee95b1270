use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ComplexityBucket {
    Low,
    Medium,
    High,
}

impl ComplexityBucket {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for ComplexityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    NoStartEvent,
    NoEndEvent,
    OrphanElement,
    DanglingFlow,
    MalformedFlow,
    ExcessiveGateways,
    DeepNesting,
    ComplexCondition,
    UnnamedElement,
}

impl IssueCode {
    /// The stable prefix consumers filter on.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoStartEvent => "NO_START_EVENT",
            Self::NoEndEvent => "NO_END_EVENT",
            Self::OrphanElement => "ORPHAN_ELEMENT",
            Self::DanglingFlow => "DANGLING_FLOW",
            Self::MalformedFlow => "MALFORMED_FLOW",
            Self::ExcessiveGateways => "EXCESSIVE_GATEWAYS",
            Self::DeepNesting => "DEEP_NESTING",
            Self::ComplexCondition => "COMPLEX_CONDITION",
            Self::UnnamedElement => "UNNAMED_ELEMENT",
        }
    }
}

/// A structural finding: `key` is `CODE` or `CODE:<id>`, `detail` is for humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub key: String,
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub detail: String,
}

impl Issue {
    #[must_use]
    pub fn new(code: IssueCode, subject: Option<String>, detail: impl Into<String>) -> Self {
        let key = match &subject {
            Some(s) => format!("{}:{s}", code.as_str()),
            None => code.as_str().to_string(),
        };
        Self {
            key,
            code,
            subject,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.key, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralReport {
    pub element_count: usize,
    pub flow_count: usize,
    pub gateway_count: usize,
    pub task_count: usize,
    pub conditional_flow_count: usize,
    pub has_start_event: bool,
    pub has_end_event: bool,
    pub orphan_elements: Vec<String>,
    pub unconnected_elements: Vec<String>,
    /// Flows leading into a non-end element that has no way out.
    pub dead_paths: Vec<String>,
    pub complexity_score: f64,
    pub complexity_bucket: ComplexityBucket,
    pub flow_complexity: usize,
    /// Levels of process nesting: 1 for a flat process, 2 with a sub-process.
    pub nesting_depth: usize,
    pub issues: Vec<Issue>,
    pub is_valid_structure: bool,
}

impl StructuralReport {
    /// True when an issue with exactly this key exists (`DANGLING_FLOW:f3`).
    #[must_use]
    pub fn has_issue(&self, key: &str) -> bool {
        self.issues.iter().any(|i| i.key == key)
    }

    pub fn issues_with(&self, code: IssueCode) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.code == code)
    }

    /// Issue keys in report order.
    #[must_use]
    pub fn issue_keys(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.key.as_str()).collect()
    }
}
