//! Report types produced by the analyzers. All are built once and read-only after.

use serde::Serialize;

mod security;
mod structural;

pub use security::{
    SecurityCheck, SecurityReport, Severity, Vulnerability, VulnerabilityCategory,
};
pub use structural::{ComplexityBucket, Issue, IssueCode, StructuralReport};

use crate::error::ParseError;
use crate::graph::LinkedGraph;
use crate::visual::VisualizationGraph;

/// Everything the pipeline produces for one successfully parsed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAnalysis {
    pub graph: LinkedGraph,
    pub structural: StructuralReport,
    pub security: SecurityReport,
    pub visualization: VisualizationGraph,
}

impl ProcessAnalysis {
    /// Count of structural issues plus vulnerabilities.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.structural.issues.len() + self.security.vulnerabilities.len()
    }
}

/// Result for one document in a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Outcome {
    Analyzed { analysis: Box<ProcessAnalysis> },
    Failed { error: FailureInfo },
    /// Not started because the batch was cancelled.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureInfo {
    pub code: &'static str,
    pub message: String,
}

impl From<&ParseError> for FailureInfo {
    fn from(e: &ParseError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutcome {
    /// Caller-assigned label, usually a path.
    pub source: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl DocumentOutcome {
    #[must_use]
    pub fn analysis(&self) -> Option<&ProcessAnalysis> {
        match &self.outcome {
            Outcome::Analyzed { analysis } => Some(&**analysis),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped)
    }
}

/// Aggregated results from analyzing multiple documents.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
    pub duration_ms: u128,
}

impl BatchReport {
    #[must_use]
    pub fn analyzed_count(&self) -> usize {
        self.documents.iter().filter(|d| d.analysis().is_some()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_failed()).count()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_skipped()).count()
    }

    /// Highest aggregate risk across analyzed documents.
    #[must_use]
    pub fn worst_risk(&self) -> Severity {
        self.documents
            .iter()
            .filter_map(DocumentOutcome::analysis)
            .map(|a| a.security.aggregate_risk_level)
            .max()
            .unwrap_or_default()
    }
}
