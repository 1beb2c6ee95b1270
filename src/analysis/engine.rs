//! Pipeline entry points: one document, or a batch in parallel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ParseError, Result};
use crate::graph::LinkedGraph;
use crate::types::{BatchReport, DocumentOutcome, FailureInfo, Outcome, ProcessAnalysis};
use crate::{extract, graph, visual};

use super::security::SecurityAnalyzer;
use super::structural;

/// Raw input for batch analysis. Content is bytes so that non-UTF-8 input
/// fails per document instead of before the batch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Caller-assigned label, carried into the outcome.
    pub source: String,
    pub content: Vec<u8>,
}

impl Document {
    #[must_use]
    pub fn new(source: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }
}

/// The analysis engine. Holds configuration and the rule set only; every call
/// builds its own graph and reports.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    security: SecurityAnalyzer,
}

impl Engine {
    /// Builds an engine with the built-in rules enabled in `config`.
    ///
    /// # Errors
    /// Returns an error when the configured rule patterns are invalid.
    pub fn new(config: Config) -> Result<Self> {
        let security = SecurityAnalyzer::from_config(&config.rules, &config.scoring)?;
        Ok(Self { config, security })
    }

    /// Replaces the rule set, e.g. one with extra registered rules.
    #[must_use]
    pub fn with_analyzer(mut self, security: SecurityAnalyzer) -> Self {
        self.security = security;
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract, link, then validate and scan side by side, then project.
    ///
    /// # Errors
    /// Returns the extraction failure; no partial analysis is produced.
    pub fn analyze(&self, document: &str) -> std::result::Result<ProcessAnalysis, ParseError> {
        let linked = graph::link(extract::parse(document)?);
        Ok(self.analyze_linked(linked))
    }

    /// Same as [`Engine::analyze`] for a byte stream.
    ///
    /// # Errors
    /// Returns `MalformedDocument` for non-UTF-8 input, otherwise as `analyze`.
    pub fn analyze_bytes(&self, document: &[u8]) -> std::result::Result<ProcessAnalysis, ParseError> {
        let linked = graph::link(extract::parse_bytes(document)?);
        Ok(self.analyze_linked(linked))
    }

    fn analyze_linked(&self, linked: LinkedGraph) -> ProcessAnalysis {
        let (structural, security) = rayon::join(
            || structural::validate(&linked, &self.config.complexity),
            || self.security.scan(&linked),
        );
        let visualization =
            visual::project(&linked, structural.complexity_bucket, &self.config.layout);
        ProcessAnalysis {
            graph: linked,
            structural,
            security,
            visualization,
        }
    }

    /// Analyzes every document in parallel. Outcomes keep input order.
    #[must_use]
    pub fn analyze_batch(&self, documents: &[Document]) -> BatchReport {
        self.analyze_batch_with_cancel(documents, &AtomicBool::new(false))
    }

    /// Like [`Engine::analyze_batch`], but once `cancel` is set no further
    /// document is started. Those are reported as skipped; documents already
    /// running finish normally.
    #[must_use]
    pub fn analyze_batch_with_cancel(
        &self,
        documents: &[Document],
        cancel: &AtomicBool,
    ) -> BatchReport {
        let start = Instant::now();

        let outcomes: Vec<DocumentOutcome> = documents
            .par_iter()
            .map(|doc| DocumentOutcome {
                source: doc.source.clone(),
                outcome: self.run_one(doc, cancel),
            })
            .collect();

        let report = BatchReport {
            documents: outcomes,
            duration_ms: start.elapsed().as_millis(),
        };
        info!(
            analyzed = report.analyzed_count(),
            failed = report.failed_count(),
            skipped = report.skipped_count(),
            duration_ms = %report.duration_ms,
            "batch complete"
        );
        report
    }

    fn run_one(&self, doc: &Document, cancel: &AtomicBool) -> Outcome {
        if cancel.load(Ordering::Relaxed) {
            debug!(source = %doc.source, "skipped after cancellation");
            return Outcome::Skipped;
        }
        match self.analyze_bytes(&doc.content) {
            Ok(analysis) => {
                debug!(
                    source = %doc.source,
                    findings = analysis.finding_count(),
                    "document analyzed"
                );
                Outcome::Analyzed {
                    analysis: Box::new(analysis),
                }
            }
            Err(e) => {
                debug!(source = %doc.source, error = %e, "document failed");
                Outcome::Failed {
                    error: FailureInfo::from(&e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">
        <process id="p">
          <startEvent id="s"/><endEvent id="e"/>
          <sequenceFlow id="f" sourceRef="s" targetRef="e"/>
        </process></definitions>"#;

    fn engine() -> Engine {
        Engine::new(Config::default()).unwrap_or_else(|e| panic!("engine: {e}"))
    }

    #[test]
    fn preset_cancel_skips_everything() {
        let docs = vec![Document::new("a", MINIMAL), Document::new("b", MINIMAL)];
        let report = engine().analyze_batch_with_cancel(&docs, &AtomicBool::new(true));
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.analyzed_count(), 0);
    }

    #[test]
    fn batch_keeps_order_and_failures() {
        let docs = vec![
            Document::new("ok", MINIMAL),
            Document::new("broken", "<definitions><process id=\"p\">"),
            Document::new("empty", "<definitions/>"),
        ];
        let report = engine().analyze_batch(&docs);
        let sources: Vec<_> = report.documents.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, ["ok", "broken", "empty"]);
        assert_eq!(report.analyzed_count(), 1);
        assert_eq!(report.failed_count(), 2);
        match &report.documents[2].outcome {
            Outcome::Failed { error } => assert_eq!(error.code, "MissingProcessDefinition"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
