// src/analysis/security/mod.rs
//! Security heuristics over element attributes.

mod rules;
mod scoring;

pub use rules::{finding, CodeInjection, ExpressionInjection, SecurityRule, UnassignedTask};
pub use scoring::{aggregate_risk, penalty, security_score};

use std::fmt;

use tracing::warn;

use crate::config::{RuleConfig, ScoringConfig};
use crate::error::Result;
use crate::graph::LinkedGraph;
use crate::model::Element;
use crate::types::{
    SecurityCheck, SecurityReport, Severity, Vulnerability, VulnerabilityCategory,
};

/// Runs every registered rule against every element it applies to.
///
/// The analyzer holds no per-scan state; one instance can scan any number of
/// graphs, from any number of threads.
pub struct SecurityAnalyzer {
    rules: Vec<Box<dyn SecurityRule>>,
    scoring: ScoringConfig,
}

impl SecurityAnalyzer {
    /// An analyzer with no rules. Every scan is clean.
    #[must_use]
    pub fn empty(scoring: ScoringConfig) -> Self {
        Self {
            rules: Vec::new(),
            scoring,
        }
    }

    /// The built-in rules enabled in `rules`.
    ///
    /// # Errors
    /// Returns an error when the eval-token pattern cannot be built.
    pub fn from_config(rules: &RuleConfig, scoring: &ScoringConfig) -> Result<Self> {
        let mut analyzer = Self::empty(scoring.clone());
        if rules.unassigned_task {
            analyzer = analyzer.with_rule(UnassignedTask);
        }
        if rules.expression_injection {
            analyzer = analyzer.with_rule(ExpressionInjection::new(&rules.interpolation_markers));
        }
        if rules.code_injection {
            analyzer = analyzer.with_rule(CodeInjection::new(&rules.eval_tokens)?);
        }
        Ok(analyzer)
    }

    /// Registers an extra rule. Rules run in registration order.
    #[must_use]
    pub fn with_rule(mut self, rule: impl SecurityRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.id())
    }

    /// Scans the graph. The graph is only read.
    #[must_use]
    pub fn scan(&self, linked: &LinkedGraph) -> SecurityReport {
        let mut vulnerabilities = Vec::new();
        let mut checks = Vec::new();

        for element in &linked.graph().elements {
            for rule in self.rules.iter().filter(|r| r.applies_to(element)) {
                let found = match rule.evaluate(element) {
                    Ok(found) => found,
                    Err(e) => {
                        warn!(rule = rule.id(), element = %element.id, error = %e, "rule failed");
                        Some(internal_failure(rule.id(), element, &e.to_string()))
                    }
                };
                checks.push(SecurityCheck {
                    rule: rule.id(),
                    element_id: element.id.clone(),
                    passed: found.is_none(),
                });
                vulnerabilities.extend(found);
            }
        }

        SecurityReport {
            aggregate_risk_level: aggregate_risk(&vulnerabilities),
            security_score: security_score(&vulnerabilities, &self.scoring),
            vulnerabilities,
            checks,
        }
    }
}

impl fmt::Debug for SecurityAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityAnalyzer")
            .field("rules", &self.rule_ids().collect::<Vec<_>>())
            .field("scoring", &self.scoring)
            .finish()
    }
}

fn internal_failure(rule: &'static str, element: &Element, message: &str) -> Vulnerability {
    finding(
        rule,
        VulnerabilityCategory::Internal,
        element,
        Severity::Low,
        format!("rule could not evaluate this element: {message}"),
    )
}
