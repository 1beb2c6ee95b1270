// src/analysis/security/rules.rs
//! Built-in rules. They only match text; nothing they inspect is ever run.

use regex::Regex;

use crate::error::{BpmnError, RuleError};
use crate::model::{Element, ElementKind};
use crate::types::{Severity, Vulnerability, VulnerabilityCategory};

/// One per-element heuristic. Implementations must be stateless across calls.
pub trait SecurityRule: Send + Sync {
    /// Stable rule identifier, used in checks and findings.
    fn id(&self) -> &'static str;

    fn applies_to(&self, element: &Element) -> bool;

    /// Yields at most one finding for the element.
    ///
    /// # Errors
    /// Returns an error when the rule cannot evaluate this element. The
    /// analyzer records it as a LOW internal finding and continues.
    fn evaluate(&self, element: &Element) -> Result<Option<Vulnerability>, RuleError>;
}

/// Builds a finding attributed to `element`.
#[must_use]
pub fn finding(
    rule: &'static str,
    category: VulnerabilityCategory,
    element: &Element,
    severity: Severity,
    description: impl Into<String>,
) -> Vulnerability {
    Vulnerability {
        rule,
        category,
        element_id: element.id.clone(),
        element_name: element.name.clone(),
        severity,
        description: description.into(),
    }
}

/// User tasks must name an assignee or candidate users.
#[derive(Debug, Default)]
pub struct UnassignedTask;

impl SecurityRule for UnassignedTask {
    fn id(&self) -> &'static str {
        "UNASSIGNED_TASK"
    }

    fn applies_to(&self, element: &Element) -> bool {
        element.kind == ElementKind::UserTask
    }

    fn evaluate(&self, element: &Element) -> Result<Option<Vulnerability>, RuleError> {
        if element.attributes.has_assignment() {
            return Ok(None);
        }
        Ok(Some(finding(
            self.id(),
            VulnerabilityCategory::UnassignedTask,
            element,
            Severity::Medium,
            format!(
                "user task '{}' has neither an assignee nor candidate users",
                element.name
            ),
        )))
    }
}

/// Service task delegate expressions must not interpolate runtime values.
#[derive(Debug)]
pub struct ExpressionInjection {
    markers: Vec<String>,
}

impl ExpressionInjection {
    /// Empty markers are dropped; they would match every expression.
    #[must_use]
    pub fn new(markers: &[String]) -> Self {
        Self {
            markers: markers.iter().filter(|m| !m.is_empty()).cloned().collect(),
        }
    }
}

impl SecurityRule for ExpressionInjection {
    fn id(&self) -> &'static str {
        "EXPRESSION_INJECTION"
    }

    fn applies_to(&self, element: &Element) -> bool {
        element.kind == ElementKind::ServiceTask
    }

    fn evaluate(&self, element: &Element) -> Result<Option<Vulnerability>, RuleError> {
        let Some(expr) = element.attributes.delegate_expression.as_deref() else {
            return Ok(None);
        };
        let Some(marker) = self.markers.iter().find(|m| expr.contains(m.as_str())) else {
            return Ok(None);
        };
        Ok(Some(finding(
            self.id(),
            VulnerabilityCategory::ExpressionInjection,
            element,
            Severity::High,
            format!("delegate expression '{expr}' interpolates with '{marker}'"),
        )))
    }
}

/// Script bodies must not call eval-style functions.
#[derive(Debug)]
pub struct CodeInjection {
    pattern: Regex,
}

impl CodeInjection {
    /// Matches any of `tokens` invoked anywhere in the text: a direct call
    /// (`eval(`, `myeval(`), `.call(`/`.apply(`, or a quoted member access
    /// (`window['eval'](`).
    ///
    /// # Errors
    /// Returns an error if `tokens` is empty or the pattern fails to compile.
    pub fn new(tokens: &[String]) -> Result<Self, BpmnError> {
        let alternatives: Vec<String> = tokens
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| regex::escape(t.trim()))
            .collect();
        if alternatives.is_empty() {
            return Err(BpmnError::Other(
                "rules.eval_tokens must name at least one token".into(),
            ));
        }
        let pattern = Regex::new(&format!(
            r#"(?P<token>{})(?:\s*\(|\s*\.\s*(?:call|apply)\s*\(|['"`]\s*\]\s*\()"#,
            alternatives.join("|")
        ))?;
        Ok(Self { pattern })
    }
}

impl SecurityRule for CodeInjection {
    fn id(&self) -> &'static str {
        "CODE_INJECTION"
    }

    fn applies_to(&self, element: &Element) -> bool {
        element.kind == ElementKind::ScriptTask
    }

    fn evaluate(&self, element: &Element) -> Result<Option<Vulnerability>, RuleError> {
        let Some(body) = element.attributes.script_body.as_deref() else {
            return Ok(None);
        };
        let Some(hit) = self.pattern.captures(body) else {
            return Ok(None);
        };
        let Some(token) = hit.name("token") else {
            return Err(RuleError::new(self.id(), &element.id, "pattern matched without a token"));
        };
        Ok(Some(finding(
            self.id(),
            VulnerabilityCategory::CodeInjection,
            element,
            Severity::Critical,
            format!("script calls '{}' at offset {}", token.as_str(), token.start()),
        )))
    }
}
