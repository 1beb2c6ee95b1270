//! Colored terminal output. Structural issues first, then security findings,
//! then a one-line verdict per document and a batch summary.

use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::reporting::shared::{duration, pluralize};
use crate::types::{
    BatchReport, DocumentOutcome, IssueCode, Outcome, ProcessAnalysis, Severity,
};

/// Prints the batch to stdout.
pub fn print_report(report: &BatchReport) {
    print!("{}", render_report(report));
}

/// Renders the batch as colored text.
#[must_use]
pub fn render_report(report: &BatchReport) -> String {
    let mut out = String::new();
    for doc in &report.documents {
        write_document(&mut out, doc);
    }
    write_summary(&mut out, report);
    out
}

fn write_document(out: &mut String, doc: &DocumentOutcome) {
    match &doc.outcome {
        Outcome::Analyzed { analysis } => write_analysis(out, &doc.source, analysis),
        Outcome::Failed { error } => {
            let _ = writeln!(
                out,
                "{} {}: {} ({})",
                "X".red().bold(),
                doc.source.bold(),
                error.message,
                error.code.dimmed()
            );
            let _ = writeln!(out);
        }
        Outcome::Skipped => {
            let _ = writeln!(out, "{}", format!("- {} (skipped)", doc.source).dimmed());
        }
    }
}

fn write_analysis(out: &mut String, source: &str, analysis: &ProcessAnalysis) {
    let meta = &analysis.graph.graph().metadata;
    let s = &analysis.structural;
    let sec = &analysis.security;

    let _ = writeln!(out, "{} {}", source.bold(), format!("[{}]", meta.name).dimmed());
    let _ = writeln!(
        out,
        "  {} {} {}, {} {}, complexity {:.1} ({}), flow complexity {}",
        "=".blue(),
        s.element_count,
        pluralize("element", s.element_count),
        s.flow_count,
        pluralize("flow", s.flow_count),
        s.complexity_score,
        s.complexity_bucket,
        s.flow_complexity
    );

    for issue in &s.issues {
        let line = issue.to_string();
        let styled = match issue.code {
            IssueCode::NoStartEvent | IssueCode::NoEndEvent | IssueCode::OrphanElement => {
                line.red()
            }
            IssueCode::UnnamedElement => line.dimmed(),
            _ => line.yellow(),
        };
        let _ = writeln!(out, "  {} {styled}", "-->".blue());
    }

    for v in &sec.vulnerabilities {
        let tag = severity_style(v.severity, &format!("[{}]", v.severity));
        let _ = writeln!(
            out,
            "  {} {tag} {} ({}): {}",
            "-->".blue(),
            v.element_id,
            v.element_name,
            v.description
        );
    }

    let verdict = if s.is_valid_structure {
        "structure ok".green()
    } else {
        "structure invalid".red().bold()
    };
    let _ = writeln!(
        out,
        "  {} {verdict}, security score {}/100, risk {}",
        "=".blue(),
        sec.security_score,
        severity_style(sec.aggregate_risk_level, sec.aggregate_risk_level.label())
    );
    let _ = writeln!(out);
}

fn severity_style(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::High => text.red(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.dimmed(),
        Severity::None => text.green(),
    }
}

fn write_summary(out: &mut String, report: &BatchReport) {
    let duration = duration(report);
    let analyzed = report.analyzed_count();
    let failed = report.failed_count();
    let skipped = report.skipped_count();
    let findings: usize = report
        .documents
        .iter()
        .filter_map(DocumentOutcome::analysis)
        .map(ProcessAnalysis::finding_count)
        .sum();

    let mut parts = vec![format!("{analyzed} {}", pluralize("document", analyzed))];
    if findings > 0 {
        parts.push(format!("{findings} {}", pluralize("finding", findings)));
    }
    if failed > 0 {
        parts.push(format!("{failed} failed"));
    }
    if skipped > 0 {
        parts.push(format!("{skipped} skipped"));
    }
    let summary = parts.join(", ");

    let mark = if failed > 0 {
        "X".red().bold()
    } else if findings > 0 {
        "~".yellow().bold()
    } else {
        "OK".green().bold()
    };
    let _ = writeln!(out, "{mark} bpmnscope analyzed {summary} ({duration:?}).");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FailureInfo;

    #[test]
    fn summary_counts_failures() {
        colored::control::set_override(false);
        let report = BatchReport {
            documents: vec![
                DocumentOutcome {
                    source: "bad.bpmn".into(),
                    outcome: Outcome::Failed {
                        error: FailureInfo {
                            code: "MalformedDocument",
                            message: "malformed document at byte 3: eof".into(),
                        },
                    },
                },
                DocumentOutcome {
                    source: "late.bpmn".into(),
                    outcome: Outcome::Skipped,
                },
            ],
            duration_ms: 0,
        };
        let text = render_report(&report);
        assert!(text.contains("X bad.bpmn: malformed document at byte 3: eof (MalformedDocument)"));
        assert!(text.contains("- late.bpmn (skipped)"));
        assert!(text.contains("0 documents, 1 failed, 1 skipped"));
    }
}
