// tests/unit_security.rs
use bpmnscope_core::analysis::security::{finding, SecurityAnalyzer, SecurityRule};
use bpmnscope_core::config::{RuleConfig, ScoringConfig};
use bpmnscope_core::error::RuleError;
use bpmnscope_core::graph::{link, LinkedGraph};
use bpmnscope_core::model::{Element, ElementKind};
use bpmnscope_core::parse;
use bpmnscope_core::types::{Severity, Vulnerability, VulnerabilityCategory};

fn analyzer() -> SecurityAnalyzer {
    SecurityAnalyzer::from_config(&RuleConfig::default(), &ScoringConfig::default()).unwrap()
}

fn linked(body: &str) -> LinkedGraph {
    let doc = format!(
        r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL"
                        xmlns:camunda="http://camunda.org/schema/1.0/bpmn">
             <process id="p">{body}</process>
           </definitions>"#
    );
    link(parse(&doc).unwrap())
}

#[test]
fn test_unassigned_user_task_is_medium() {
    let g = linked(r#"<userTask id="t1" name="Approve"/>"#);
    let r = analyzer().scan(&g);
    assert_eq!(r.vulnerabilities.len(), 1);
    let v = &r.vulnerabilities[0];
    assert_eq!(v.element_id, "t1");
    assert_eq!(v.element_name, "Approve");
    assert_eq!(v.severity, Severity::Medium);
    assert_eq!(v.category, VulnerabilityCategory::UnassignedTask);
    assert_eq!(r.security_score, 90);
    assert_eq!(r.aggregate_risk_level, Severity::Medium);
}

#[test]
fn test_blank_assignee_still_counts_as_unassigned() {
    let g = linked(r#"<userTask id="t1" camunda:assignee="  "/>"#);
    assert_eq!(analyzer().scan(&g).count(Severity::Medium), 1);
}

#[test]
fn test_candidate_users_satisfy_assignment() {
    let g = linked(r#"<userTask id="t1" camunda:candidateUsers="alice"/>"#);
    assert!(analyzer().scan(&g).is_clean());
}

#[test]
fn test_interpolated_delegate_is_high() {
    let g = linked(r#"<serviceTask id="svc" camunda:delegateExpression="${userSuppliedBean}"/>"#);
    let r = analyzer().scan(&g);
    assert_eq!(r.aggregate_risk_level, Severity::High);
    assert_eq!(r.security_score, 80);
    assert_eq!(r.vulnerabilities[0].category, VulnerabilityCategory::ExpressionInjection);
}

#[test]
fn test_eval_script_is_critical() {
    let g = linked(
        r#"<scriptTask id="sc" scriptFormat="javascript"><script>var r = eval(input);</script></scriptTask>"#,
    );
    let r = analyzer().scan(&g);
    assert_eq!(r.aggregate_risk_level, Severity::Critical);
    assert_eq!(r.security_score, 70);
}

#[test]
fn test_script_is_never_executed_only_matched() {
    // A body that would loop forever if run must still scan instantly.
    let g = linked(r#"<scriptTask id="sc"><script>while(true){}</script></scriptTask>"#);
    assert!(analyzer().scan(&g).is_clean());
}

#[test]
fn test_score_floors_at_zero() {
    let scripts: String = (0..5)
        .map(|i| format!(r#"<scriptTask id="s{i}"><script>exec(x)</script></scriptTask>"#))
        .collect();
    let r = analyzer().scan(&linked(&scripts));
    assert_eq!(r.count(Severity::Critical), 5);
    assert_eq!(r.security_score, 0);
}

#[test]
fn test_scan_does_not_mutate_graph() {
    let g = linked(
        r##"<userTask id="t1"/><serviceTask id="svc" camunda:delegateExpression="#{x}"/>"##,
    );
    let before = g.clone();
    let _ = analyzer().scan(&g);
    assert_eq!(g, before);
}

#[test]
fn test_custom_penalties() {
    let scoring = ScoringConfig {
        medium: 25,
        ..ScoringConfig::default()
    };
    let a = SecurityAnalyzer::from_config(&RuleConfig::default(), &scoring).unwrap();
    let r = a.scan(&linked(r#"<userTask id="a"/><userTask id="b"/>"#));
    assert_eq!(r.security_score, 50);
}

struct NoSendTasks;

impl SecurityRule for NoSendTasks {
    fn id(&self) -> &'static str {
        "NO_SEND_TASKS"
    }

    fn applies_to(&self, element: &Element) -> bool {
        element.kind == ElementKind::SendTask
    }

    fn evaluate(&self, element: &Element) -> Result<Option<Vulnerability>, RuleError> {
        if element.attributes.get("camunda:class").is_none() {
            return Err(RuleError::new(self.id(), &element.id, "no implementation class"));
        }
        Ok(Some(finding(
            self.id(),
            VulnerabilityCategory::Custom,
            element,
            Severity::High,
            "send task leaves the process boundary",
        )))
    }
}

#[test]
fn test_registered_rule_runs_and_errors_are_contained() {
    let a = analyzer().with_rule(NoSendTasks);
    let g = linked(
        r#"<sendTask id="ok" camunda:class="com.acme.Mailer"/>
           <sendTask id="bad"/>
           <userTask id="u" camunda:assignee="bob"/>"#,
    );
    let r = a.scan(&g);

    assert_eq!(r.vulnerabilities.len(), 2);
    assert_eq!(r.vulnerabilities[0].category, VulnerabilityCategory::Custom);
    assert_eq!(r.vulnerabilities[1].category, VulnerabilityCategory::Internal);
    assert_eq!(r.vulnerabilities[1].severity, Severity::Low);
    assert_eq!(r.vulnerabilities[1].element_id, "bad");
    assert_eq!(r.aggregate_risk_level, Severity::High);
    assert_eq!(r.security_score, 80);

    let failed: Vec<_> = r.checks.iter().filter(|c| !c.passed).map(|c| c.element_id.as_str()).collect();
    assert_eq!(failed, ["ok", "bad"]);
    assert_eq!(r.checks.len(), 3);
}
