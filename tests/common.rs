//! Common test utilities for building canvas graphs.
use flowspec::prelude::*;
use serde_json::{Value, json};

#[allow(dead_code)]
pub fn node(id: &str, kind: NodeKind, x: f64, y: f64, label: &str, config: Value) -> CanvasNode {
    CanvasNode {
        id: id.to_string(),
        kind: kind.clone(),
        position: Position { x, y },
        data: NodeData {
            kind,
            label: label.to_string(),
            config,
        },
    }
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> CanvasEdge {
    CanvasEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: None,
        target_handle: None,
        data: None,
    }
}

#[allow(dead_code)]
pub fn branch_edge(id: &str, source: &str, target: &str, tag: BranchTag) -> CanvasEdge {
    CanvasEdge {
        data: Some(EdgeData { branch: Some(tag) }),
        ..edge(id, source, target)
    }
}

#[allow(dead_code)]
pub fn tool_node(id: &str, x: f64, tool_name: &str) -> CanvasNode {
    node(
        id,
        NodeKind::Tool,
        x,
        0.0,
        "",
        json!({ "tool_name": tool_name }),
    )
}

/// The two-block review graph:
/// `[tool fetch_pr] --(default)--> [llm "Summarize {{A.out}}"]`.
#[allow(dead_code)]
pub fn review_graph() -> CanvasGraph {
    CanvasGraph {
        nodes: vec![
            node(
                "A",
                NodeKind::Tool,
                0.0,
                0.0,
                "",
                json!({
                    "tool_name": "fetch_pr",
                    "parameters": { "id": "{{pr_id}}" },
                }),
            ),
            node(
                "B",
                NodeKind::Llm,
                260.0,
                0.0,
                "",
                json!({
                    "model": "gpt-4o",
                    "user_prompt": "Summarize {{A.out}}",
                }),
            ),
        ],
        edges: vec![edge("e1", "A", "B")],
    }
}

/// A conditional fanning out into a two-node `true` chain and a one-node
/// `false` chain:
///
/// ```text
///            ┌─(true)──> t1 ──> t2
/// check ─────┤
///            └─(false)─> f1
/// ```
#[allow(dead_code)]
pub fn branching_graph() -> CanvasGraph {
    CanvasGraph {
        nodes: vec![
            node(
                "check",
                NodeKind::IfElse,
                0.0,
                100.0,
                "Check size",
                json!({ "condition": "{{A.out}} > 3" }),
            ),
            tool_node("t1", 260.0, "notify"),
            node(
                "t2",
                NodeKind::Tool,
                520.0,
                0.0,
                "",
                json!({ "tool_name": "archive" }),
            ),
            node(
                "f1",
                NodeKind::Tool,
                260.0,
                200.0,
                "",
                json!({ "tool_name": "escalate" }),
            ),
        ],
        edges: vec![
            branch_edge("e1", "check", "t1", BranchTag::True),
            edge("e2", "t1", "t2"),
            branch_edge("e3", "check", "f1", BranchTag::False),
        ],
    }
}

/// A loop whose body is one tool call and whose `exit` edge continues to a
/// final tool call:
///
/// ```text
/// each ──(loop)──> body
///   └───(exit)──> done
/// ```
#[allow(dead_code)]
pub fn loop_graph() -> CanvasGraph {
    CanvasGraph {
        nodes: vec![
            node(
                "each",
                NodeKind::ForLoop,
                0.0,
                0.0,
                "",
                json!({
                    "mode": "variable",
                    "source": "{{A.out}}",
                    "item_var": "file",
                    "index_var": "i",
                }),
            ),
            tool_node("body", 260.0, "lint_file"),
            tool_node("done", 520.0, "report"),
        ],
        edges: vec![
            branch_edge("e1", "each", "body", BranchTag::Loop),
            branch_edge("e2", "each", "done", BranchTag::Exit),
        ],
    }
}
