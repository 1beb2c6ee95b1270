// tests/cli_exit.rs - Exit code and discovery tests
use std::fs;
use std::path::PathBuf;

use bpmnscope_core::cli::handlers::{handle_init, scan_exit};
use bpmnscope_core::config::Config;
use bpmnscope_core::discovery::discover;
use bpmnscope_core::exit::BpmnScopeExit;
use bpmnscope_core::types::Severity;
use bpmnscope_core::{Document, Engine};

const CLEAN: &str = r#"<definitions><process id="p">
  <startEvent id="s"/><endEvent id="e"/>
  <sequenceFlow id="f" sourceRef="s" targetRef="e"/>
</process></definitions>"#;

const RISKY: &str = r#"<definitions><process id="p">
  <startEvent id="s"/><serviceTask id="svc" delegateExpression="${x}"/><endEvent id="e"/>
  <sequenceFlow id="f1" sourceRef="s" targetRef="svc"/>
  <sequenceFlow id="f2" sourceRef="svc" targetRef="e"/>
</process></definitions>"#;

fn batch(docs: &[(&str, &str)]) -> bpmnscope_core::BatchReport {
    let docs: Vec<Document> = docs.iter().map(|(s, c)| Document::new(*s, *c)).collect();
    Engine::new(Config::default()).unwrap().analyze_batch(&docs)
}

#[test]
fn test_exit_0_clean() {
    let report = batch(&[("a", CLEAN)]);
    assert_eq!(scan_exit(&report, Some(Severity::Low)), BpmnScopeExit::Success);
}

#[test]
fn test_exit_3_threshold_reached() {
    let report = batch(&[("a", CLEAN), ("b", RISKY)]);
    assert_eq!(scan_exit(&report, Some(Severity::High)), BpmnScopeExit::RiskThreshold);
    assert_eq!(scan_exit(&report, Some(Severity::Critical)), BpmnScopeExit::Success);
    assert_eq!(scan_exit(&report, None), BpmnScopeExit::Success);
}

#[test]
fn test_exit_2_parse_failure_wins() {
    let report = batch(&[("b", RISKY), ("bad", "<definitions>")]);
    assert_eq!(scan_exit(&report, Some(Severity::Low)), BpmnScopeExit::ParseFailure);
}

#[test]
fn test_exit_codes_distinct() {
    let codes = [
        BpmnScopeExit::Success.code(),
        BpmnScopeExit::Error.code(),
        BpmnScopeExit::ParseFailure.code(),
        BpmnScopeExit::RiskThreshold.code(),
    ];
    assert_eq!(codes, [0, 1, 2, 3]);
}

#[test]
fn test_discover_walks_directories() {
    let d = tempfile::tempdir().unwrap();
    let root = d.path();
    fs::create_dir_all(root.join("flows/nested")).unwrap();
    fs::create_dir_all(root.join("target")).unwrap();
    fs::create_dir_all(root.join(".hidden")).unwrap();
    fs::write(root.join("flows/order.bpmn"), CLEAN).unwrap();
    fs::write(root.join("flows/nested/pay.bpmn20.xml"), CLEAN).unwrap();
    fs::write(root.join("flows/readme.md"), "#").unwrap();
    fs::write(root.join("target/built.bpmn"), CLEAN).unwrap();
    fs::write(root.join(".hidden/secret.bpmn"), CLEAN).unwrap();

    let found = discover(&[root.to_path_buf()]).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["order.bpmn", "pay.bpmn20.xml"]);
}

#[test]
fn test_discover_keeps_explicit_files_and_dedups() {
    let d = tempfile::tempdir().unwrap();
    let file = d.path().join("diagram.txt");
    fs::write(&file, CLEAN).unwrap();
    let found = discover(&[file.clone(), file.clone()]).unwrap();
    assert_eq!(found, [file]);
}

#[test]
fn test_discover_missing_path_errors() {
    assert!(discover(&[PathBuf::from("/definitely/not/here")]).is_err());
}

#[test]
fn test_init_writes_and_refuses_overwrite() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("bpmnscope.toml");
    assert_eq!(handle_init(Some(&path), false).unwrap(), BpmnScopeExit::Success);
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.scoring, Config::default().scoring);

    assert!(handle_init(Some(&path), false).is_err());
    assert!(handle_init(Some(&path), true).is_ok());
}
