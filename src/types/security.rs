use serde::Serialize;
use std::fmt;

/// Severity of a finding. Ordered: `None < Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Parses a label case-insensitively (`high`, `HIGH`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "NONE" => Some(Self::None),
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VulnerabilityCategory {
    UnassignedTask,
    ExpressionInjection,
    CodeInjection,
    /// A rule failed while evaluating; the element was not fully checked.
    Internal,
    /// Raised by a rule registered outside this crate.
    Custom,
}

impl VulnerabilityCategory {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::UnassignedTask => "unassigned task",
            Self::ExpressionInjection => "expression injection risk",
            Self::CodeInjection => "code injection risk",
            Self::Internal => "internal rule failure",
            Self::Custom => "custom finding",
        }
    }
}

/// A single security finding on one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub rule: &'static str,
    pub category: VulnerabilityCategory,
    pub element_id: String,
    pub element_name: String,
    pub severity: Severity,
    pub description: String,
}

/// Record that a rule inspected an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCheck {
    pub rule: &'static str,
    pub element_id: String,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub vulnerabilities: Vec<Vulnerability>,
    pub checks: Vec<SecurityCheck>,
    pub aggregate_risk_level: Severity,
    pub security_score: u32,
}

impl SecurityReport {
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.vulnerabilities
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.vulnerabilities.is_empty()
    }

    pub fn for_element<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Vulnerability> {
        self.vulnerabilities.iter().filter(move |v| v.element_id == id)
    }
}
