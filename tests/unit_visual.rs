// tests/unit_visual.rs
use bpmnscope_core::config::LayoutConfig;
use bpmnscope_core::graph::link;
use bpmnscope_core::model::{Element, ElementKind, Flow, ProcessGraph, ProcessMetadata, Provenance};
use bpmnscope_core::types::ComplexityBucket;
use bpmnscope_core::visual::{element_color, project, render_svg, FALLBACK_COLOR};

fn sample() -> ProcessGraph {
    let mut named = Flow::new("f2", "gw", "svc");
    named.name = Some("a < b & c".into());
    ProcessGraph {
        metadata: ProcessMetadata::default(),
        elements: vec![
            Element::new("s", ElementKind::StartEvent),
            Element::new("gw", ElementKind::ExclusiveGateway),
            Element::new("svc", ElementKind::ServiceTask).with_name("Charge card"),
            Element::new("e", ElementKind::EndEvent),
            Element::new("timer", ElementKind::IntermediateCatchEvent),
        ],
        flows: vec![
            Flow::new("f1", "s", "gw"),
            named,
            Flow::new("f3", "svc", "e"),
            Flow::new("f4", "svc", "missing"),
        ],
        provenance: Provenance::default(),
    }
}

#[test]
fn test_one_node_per_element_and_edges_skip_dangling() {
    let linked = link(sample());
    let v = project(&linked, ComplexityBucket::Medium, &LayoutConfig::default());
    assert_eq!(v.nodes.len(), 5);
    assert_eq!(v.edges.len(), 3);
    assert_eq!(v.metrics.node_count, 5);
    assert_eq!(v.metrics.edge_count, 3);
    assert_eq!(v.metrics.complexity_bucket, ComplexityBucket::Medium);
    assert!(v.edges.iter().all(|e| e.id != "f4"));
}

#[test]
fn test_grid_placement() {
    let v = project(&link(sample()), ComplexityBucket::Low, &LayoutConfig::default());
    let pos: Vec<(i64, i64)> = v.nodes.iter().map(|n| (n.x, n.y)).collect();
    assert_eq!(pos, [(100, 100), (300, 100), (500, 100), (100, 250), (300, 250)]);
}

#[test]
fn test_layout_is_configurable() {
    let layout = LayoutConfig {
        columns: 2,
        origin_x: 0,
        origin_y: 0,
        cell_width: 10,
        cell_height: 20,
    };
    let v = project(&link(sample()), ComplexityBucket::Low, &layout);
    assert_eq!((v.nodes[2].x, v.nodes[2].y), (0, 20));
    assert_eq!((v.nodes[3].x, v.nodes[3].y), (10, 20));
}

#[test]
fn test_colors_come_from_palette() {
    let v = project(&link(sample()), ComplexityBucket::Low, &LayoutConfig::default());
    assert_eq!(v.node("s").unwrap().color, "#28a745");
    assert_eq!(v.node("gw").unwrap().color, "#fd7e14");
    assert_eq!(v.node("svc").unwrap().color, "#007bff");
    assert_eq!(v.node("e").unwrap().color, "#dc3545");
    assert_eq!(v.node("timer").unwrap().color, FALLBACK_COLOR);
    assert!(v.edges.iter().all(|e| e.color == "#6c757d"));
    for n in &v.nodes {
        assert_eq!(n.color, element_color(n.kind));
    }
}

#[test]
fn test_labels_and_edge_names() {
    let v = project(&link(sample()), ComplexityBucket::Low, &LayoutConfig::default());
    assert_eq!(v.node("svc").unwrap().label, "Charge card");
    assert_eq!(v.node("s").unwrap().label, "StartEvent_s");
    assert_eq!(v.edges[1].label, "a < b & c");
    assert_eq!(v.edges[0].label, "");
}

#[test]
fn test_svg_output() {
    let v = project(&link(sample()), ComplexityBucket::Low, &LayoutConfig::default());
    let svg = render_svg(&v);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
    assert_eq!(svg.matches("<line ").count(), 3);
    // start, end, and a double ring for the intermediate event
    assert_eq!(svg.matches("<circle ").count(), 4);
    assert_eq!(svg.matches("<rect ").count(), 2);
    assert!(svg.contains(r#"stroke-width="3""#));
    assert!(svg.contains("a &lt; b &amp; c"));
    assert!(svg.contains(">Charge card</text>"));
}

#[test]
fn test_projection_is_pure() {
    let linked = link(sample());
    let a = project(&linked, ComplexityBucket::High, &LayoutConfig::default());
    let b = project(&linked, ComplexityBucket::High, &LayoutConfig::default());
    assert_eq!(a, b);
    assert_eq!(render_svg(&a), render_svg(&b));
}
