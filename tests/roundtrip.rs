//! Tests for the spec ⇄ graph round trip: the lossless embedded-snapshot
//! path and the lossy synthesis fallback.
mod common;
use common::*;
use flowspec::prelude::*;
use serde_json::json;

fn graph_with_everything() -> CanvasGraph {
    let mut graph = branching_graph();
    graph.nodes.push(node(
        "in",
        NodeKind::Input,
        -260.0,
        0.0,
        "Input",
        json!({ "fields": [{ "name": "pr_id", "type": "string", "required": true }] }),
    ));
    graph.nodes.push(node(
        "hook",
        NodeKind::Trigger,
        -260.0,
        200.0,
        "Webhook",
        json!({ "provider": "webhook" }),
    ));
    graph.edges.push(edge("e-in", "in", "check"));
    graph
}

#[test]
fn snapshot_path_reproduces_the_graph_exactly() {
    let graph = graph_with_everything();
    let spec = graph_to_workflow_spec(&graph, None).expect("failed to compile");

    assert!(spec.meta.contains_key(CANVAS_META_KEY));
    let restored = workflow_spec_to_graph(&spec);
    assert_eq!(restored, graph);
}

#[test]
fn snapshot_survives_spec_serialization() {
    let graph = loop_graph();
    let spec = graph_to_workflow_spec(&graph, None).unwrap();

    let json = spec.to_json_string().unwrap();
    let reloaded = WorkflowSpec::from_json_str(&json).unwrap();
    assert_eq!(reloaded, spec);
    assert_eq!(workflow_spec_to_graph(&reloaded), graph);
}

#[test]
fn recompiling_a_restored_graph_is_stable() {
    let spec = graph_to_workflow_spec(&graph_with_everything(), None).unwrap();
    let recompiled = graph_to_workflow_spec(&workflow_spec_to_graph(&spec), Some(&spec)).unwrap();
    assert_eq!(recompiled, spec);
}

#[test]
fn fallback_synthesizes_layout_without_snapshot() {
    let graph = review_graph();
    let mut spec = graph_to_workflow_spec(&graph, None).unwrap();
    spec.inputs.insert(
        "pr_id".to_string(),
        InputDef {
            field_type: "string".to_string(),
            required: true,
            default: None,
            description: None,
        },
    );
    spec.meta.remove(CANVAS_META_KEY);

    let restored = workflow_spec_to_graph(&spec);

    // One input block plus one node per root-level spec node.
    assert_eq!(restored.nodes.len(), 3);
    assert_eq!(restored.nodes[0].kind, NodeKind::Input);
    assert_eq!(restored.nodes[1].id, "A");
    assert_eq!(restored.nodes[2].id, "B");

    // Left-to-right layout, plain sequential edges.
    assert_eq!(restored.nodes[1].position.x, 260.0);
    assert_eq!(restored.nodes[2].position.x, 520.0);
    assert_eq!(restored.edges.len(), 2);
    assert!(restored.edges.iter().all(|e| e.data.is_none()));

    // Placeholders come back in builder syntax.
    assert_eq!(
        restored.nodes[1].data.config["parameters"]["id"],
        json!("{{pr_id}}")
    );
    assert_eq!(
        restored.nodes[2].data.config["user_prompt"],
        json!("Summarize {{A.out}}")
    );
}

#[test]
fn malformed_snapshot_falls_back_to_synthesis() {
    let mut spec = graph_to_workflow_spec(&review_graph(), None).unwrap();
    spec.meta.insert(CANVAS_META_KEY.to_string(), json!(42));

    let restored = workflow_spec_to_graph(&spec);
    assert_eq!(restored.nodes.len(), 2);
    assert_eq!(restored.nodes[0].id, "A");
}

#[test]
fn fallback_does_not_invent_out_aliases() {
    let mut spec = graph_to_workflow_spec(&review_graph(), None).unwrap();
    spec.meta.remove(CANVAS_META_KEY);

    // Synthesized nodes carry no label, so recompiling derives no implicit
    // alias the specification never had.
    let restored = workflow_spec_to_graph(&spec);
    assert!(restored.nodes.iter().all(|n| n.data.label.is_empty()));

    let recompiled = graph_to_workflow_spec(&restored, Some(&spec)).unwrap();
    for (original, redone) in spec.nodes.iter().zip(&recompiled.nodes) {
        assert_eq!(redone.out(), original.out());
    }
}

#[test]
fn fallback_keeps_loop_source_in_builder_syntax() {
    let mut spec = graph_to_workflow_spec(&loop_graph(), None).unwrap();
    spec.meta.remove(CANVAS_META_KEY);

    let restored = workflow_spec_to_graph(&spec);
    let each = restored.nodes.iter().find(|n| n.id == "each").unwrap();
    assert_eq!(each.kind, NodeKind::ForLoop);
    assert_eq!(each.data.config["mode"], json!("variable"));
    assert_eq!(each.data.config["source"], json!("{{A.out}}"));
    assert_eq!(each.data.config["item_var"], json!("file"));
}
