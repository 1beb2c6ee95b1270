// src/analysis/structural.rs
//! Structural soundness metrics over a linked graph.

use crate::config::ComplexityConfig;
use crate::graph::LinkedGraph;
use crate::model::{Element, ElementKind, ExtractionIssue, KindFamily};
use crate::types::{ComplexityBucket, Issue, IssueCode, StructuralReport};

/// Builds the structural report. Pure: the same graph and config always give
/// the same report.
#[must_use]
pub fn validate(linked: &LinkedGraph, config: &ComplexityConfig) -> StructuralReport {
    let graph = linked.graph();

    let element_count = graph.elements.len();
    let flow_count = graph.flows.len();
    let gateway_count = graph.count_family(KindFamily::Gateway);
    let task_count = graph.count_family(KindFamily::Task);
    let conditional_flow_count = graph.flows.iter().filter(|f| f.is_conditional()).count();

    let has_start_event = graph.elements_of(ElementKind::StartEvent).next().is_some();
    let has_end_event = graph.elements_of(ElementKind::EndEvent).next().is_some();

    let orphan_elements: Vec<String> = graph
        .elements
        .iter()
        .filter(|e| e.is_orphan())
        .map(|e| e.id.clone())
        .collect();
    let unconnected_elements: Vec<String> = graph
        .elements
        .iter()
        .filter(|e| is_unconnected(e))
        .map(|e| e.id.clone())
        .collect();
    let dead_paths = dead_paths(linked);
    let levels = nesting_levels(linked);
    let nesting_depth = levels.iter().copied().max().unwrap_or(0) + 1;

    let complexity_score = complexity_score(element_count, gateway_count, task_count, config);
    let flow_complexity = (flow_count + 2 * conditional_flow_count + 3 * gateway_count)
        .min(config.flow_complexity_cap);

    let mut issues = Vec::new();
    if !has_start_event {
        issues.push(Issue::new(
            IssueCode::NoStartEvent,
            None,
            "process has no start event",
        ));
    }
    if !has_end_event {
        issues.push(Issue::new(IssueCode::NoEndEvent, None, "process has no end event"));
    }
    for id in &orphan_elements {
        issues.push(Issue::new(
            IssueCode::OrphanElement,
            Some(id.clone()),
            "element has neither incoming nor outgoing flows",
        ));
    }
    for d in linked.dangling() {
        let detail = match (&d.missing_source, &d.missing_target) {
            (Some(s), Some(t)) => format!("source '{s}' and target '{t}' do not exist"),
            (Some(s), None) => format!("source '{s}' does not exist"),
            (None, Some(t)) => format!("target '{t}' does not exist"),
            (None, None) => "flow references an unknown element".to_string(),
        };
        issues.push(Issue::new(
            IssueCode::DanglingFlow,
            Some(d.flow_id.clone()),
            detail,
        ));
    }
    for malformed in graph.provenance.malformed_flows() {
        let detail = match malformed {
            ExtractionIssue::MalformedFlow { missing, .. } => {
                format!("sequence flow skipped, missing {}", missing.join(", "))
            }
            _ => "sequence flow skipped".to_string(),
        };
        issues.push(Issue::new(
            IssueCode::MalformedFlow,
            Some(malformed.subject()),
            detail,
        ));
    }
    if gateway_count > config.max_gateways {
        issues.push(Issue::new(
            IssueCode::ExcessiveGateways,
            None,
            format!(
                "{gateway_count} gateways (limit {}) may indicate an overly complex process",
                config.max_gateways
            ),
        ));
    }

    for (element, &level) in graph.elements.iter().zip(&levels) {
        let inner = level + 2;
        if element.kind == ElementKind::SubProcess && inner > config.max_nesting_depth {
            issues.push(Issue::new(
                IssueCode::DeepNesting,
                Some(element.id.clone()),
                format!(
                    "contents sit at nesting depth {inner} (limit {})",
                    config.max_nesting_depth
                ),
            ));
        }
    }
    for flow in &graph.flows {
        let operators = flow.condition.as_deref().map_or(0, condition_operators);
        if operators > config.max_condition_operators {
            issues.push(Issue::new(
                IssueCode::ComplexCondition,
                Some(flow.id.clone()),
                format!(
                    "condition joins {operators} logical operators (limit {})",
                    config.max_condition_operators
                ),
            ));
        }
    }
    if config.flag_unnamed_elements {
        for element in graph.elements.iter().filter(|e| needs_name(e) && e.is_unnamed()) {
            issues.push(Issue::new(
                IssueCode::UnnamedElement,
                Some(element.id.clone()),
                format!("{} has no name", element.kind.label()),
            ));
        }
    }

    let is_valid_structure = has_start_event && has_end_event && orphan_elements.is_empty();

    StructuralReport {
        element_count,
        flow_count,
        gateway_count,
        task_count,
        conditional_flow_count,
        has_start_event,
        has_end_event,
        orphan_elements,
        unconnected_elements,
        dead_paths,
        complexity_score,
        complexity_bucket: bucket(complexity_score, config),
        flow_complexity,
        nesting_depth,
        issues,
        is_valid_structure,
    }
}

/// `element_weight·elements + gateway_weight·gateways + task_weight·tasks`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn complexity_score(
    elements: usize,
    gateways: usize,
    tasks: usize,
    config: &ComplexityConfig,
) -> f64 {
    config.element_weight * elements as f64
        + config.gateway_weight * gateways as f64
        + config.task_weight * tasks as f64
}

#[must_use]
pub fn bucket(score: f64, config: &ComplexityConfig) -> ComplexityBucket {
    if score < config.low_below {
        ComplexityBucket::Low
    } else if score < config.medium_below {
        ComplexityBucket::Medium
    } else {
        ComplexityBucket::High
    }
}

fn is_unconnected(e: &Element) -> bool {
    if e.is_orphan() {
        return false;
    }
    let needs_incoming = !matches!(e.kind, ElementKind::StartEvent | ElementKind::BoundaryEvent);
    let needs_outgoing = e.kind != ElementKind::EndEvent;
    (needs_incoming && e.incoming().is_empty()) || (needs_outgoing && e.outgoing().is_empty())
}

fn dead_paths(linked: &LinkedGraph) -> Vec<String> {
    linked
        .graph()
        .flows
        .iter()
        .filter(|f| {
            linked.element(&f.target_ref).is_some_and(|target| {
                target.kind != ElementKind::EndEvent && target.outgoing().is_empty()
            })
        })
        .map(|f| f.id.clone())
        .collect()
}

/// Number of enclosing sub-processes per element, in arena order.
fn nesting_levels(linked: &LinkedGraph) -> Vec<usize> {
    let elements = &linked.graph().elements;
    elements
        .iter()
        .map(|e| {
            let mut level = 0;
            let mut parent = e.parent_id.as_deref();
            // bounded so a hand-built parent cycle cannot spin forever
            while let Some(p) = parent.filter(|_| level < elements.len()) {
                level += 1;
                parent = linked.element(p).and_then(|pe| pe.parent_id.as_deref());
            }
            level
        })
        .collect()
}

fn condition_operators(condition: &str) -> usize {
    let symbolic = condition.matches("&&").count() + condition.matches("||").count();
    let words = condition
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| w.eq_ignore_ascii_case("and") || w.eq_ignore_ascii_case("or"))
        .count();
    symbolic + words
}

fn needs_name(e: &Element) -> bool {
    matches!(e.kind.family(), KindFamily::Task | KindFamily::Gateway)
        || matches!(
            e.kind,
            ElementKind::StartEvent | ElementKind::EndEvent | ElementKind::SubProcess
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_uses_weights() {
        let cfg = ComplexityConfig::default();
        // 0.5*6 + 2*2 + 1*3
        assert!((complexity_score(6, 2, 3, &cfg) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bucket_thresholds_are_exclusive() {
        let cfg = ComplexityConfig::default();
        assert_eq!(bucket(9.5, &cfg), ComplexityBucket::Low);
        assert_eq!(bucket(10.0, &cfg), ComplexityBucket::Medium);
        assert_eq!(bucket(24.9, &cfg), ComplexityBucket::Medium);
        assert_eq!(bucket(25.0, &cfg), ComplexityBucket::High);
    }

    #[test]
    fn custom_weights_change_the_score() {
        let cfg = ComplexityConfig {
            element_weight: 1.0,
            gateway_weight: 0.0,
            task_weight: 0.0,
            ..ComplexityConfig::default()
        };
        assert!((complexity_score(4, 3, 1, &cfg) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn condition_operators_counts_symbols_and_words() {
        assert_eq!(condition_operators("${a > 1}"), 0);
        assert_eq!(condition_operators("${a && b || c}"), 2);
        assert_eq!(condition_operators("${x and y OR z}"), 2);
        assert_eq!(condition_operators("${order.brand}"), 0);
    }
}
