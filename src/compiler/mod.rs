//! The bidirectional graph ⇄ specification compiler.
//!
//! [`graph_to_workflow_spec`] lowers the flat, branch-tagged canvas diagram
//! into the recursively nested specification consumed by the execution
//! engine, embedding a canvas snapshot in `meta` for lossless reconstruction.
//! [`workflow_spec_to_graph`] prefers that snapshot and otherwise synthesizes
//! a minimal layout from the specification nodes alone.
//!
//! Both directions are synchronous and pure with respect to their inputs:
//! no I/O, no shared state, safe to call on every autosave tick.

mod convert;
mod index;
mod walker;

use crate::canvas::{CanvasEdge, CanvasGraph, CanvasNode, InputConfig, NodeData, NodeKind, Position};
use crate::error::CompileError;
use crate::spec::{CANVAS_META_KEY, SPEC_VERSION, WorkflowSpec};
use index::GraphIndex;
use serde_json::Value;
use tracing::debug;
use walker::ChainWalker;

/// Horizontal spacing between synthesized nodes on the fallback path.
const LAYOUT_SPACING_X: f64 = 260.0;

/// Compiles a canvas graph into a workflow specification.
///
/// Input blocks contribute the `inputs` map (falling back to `existing`'s
/// inputs when the graph declares none); trigger blocks are excluded
/// entirely. The `output` expression and any unrelated `meta` entries are
/// carried over from `existing`, and the full visual graph is embedded under
/// `meta["canvas"]` so the reverse direction is lossless.
pub fn graph_to_workflow_spec(
    graph: &CanvasGraph,
    existing: Option<&WorkflowSpec>,
) -> Result<WorkflowSpec, CompileError> {
    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "compiling canvas graph"
    );

    let index = GraphIndex::new(graph);
    let nodes = ChainWalker::new(&index).walk()?;

    let mut inputs = convert::collect_inputs(&graph.nodes)?;
    if inputs.is_empty() {
        if let Some(existing) = existing {
            inputs = existing.inputs.clone();
        }
    }

    let mut meta = existing.map(|spec| spec.meta.clone()).unwrap_or_default();
    meta.insert(CANVAS_META_KEY.to_string(), canvas_snapshot(graph));

    debug!(spec_nodes = nodes.len(), inputs = inputs.len(), "graph compiled");
    Ok(WorkflowSpec {
        version: SPEC_VERSION.to_string(),
        inputs,
        nodes,
        output: existing.and_then(|spec| spec.output.clone()),
        meta,
    })
}

/// Reconstructs a canvas graph from a workflow specification.
///
/// When the specification embeds a canvas snapshot it is deserialized
/// verbatim, preserving layout and node configuration exactly. Otherwise a
/// minimal graph is synthesized: one input block when inputs are declared,
/// remaining root-level nodes laid out left-to-right with plain sequential
/// edges. The synthesis path does not reconstruct nested branch bodies.
pub fn workflow_spec_to_graph(spec: &WorkflowSpec) -> CanvasGraph {
    if let Some(snapshot) = spec.meta.get(CANVAS_META_KEY) {
        match serde_json::from_value::<CanvasGraph>(snapshot.clone()) {
            Ok(graph) => return graph,
            Err(e) => {
                debug!(error = %e, "embedded canvas snapshot is malformed; synthesizing layout");
            }
        }
    }
    synthesize_graph(spec)
}

/// Serializes the visual graph for embedding in `meta`. The typed canvas
/// model carries only plain data, so sanitization amounts to re-serializing
/// through it: anything a UI layer may have attached beyond the wire shape
/// does not survive the round trip through `CanvasGraph`.
fn canvas_snapshot(graph: &CanvasGraph) -> Value {
    serde_json::to_value(graph).unwrap_or(Value::Null)
}

fn synthesize_graph(spec: &WorkflowSpec) -> CanvasGraph {
    let mut nodes: Vec<CanvasNode> = Vec::new();
    let mut edges: Vec<CanvasEdge> = Vec::new();

    if !spec.inputs.is_empty() {
        let config = InputConfig {
            fields: convert::inputs_to_fields(&spec.inputs),
        };
        nodes.push(CanvasNode {
            id: "input".to_string(),
            kind: NodeKind::Input,
            position: Position { x: 0.0, y: 0.0 },
            data: NodeData {
                kind: NodeKind::Input,
                label: "Input".to_string(),
                config: serde_json::to_value(config).unwrap_or(Value::Null),
            },
        });
    }

    for spec_node in &spec.nodes {
        let position = Position {
            x: nodes.len() as f64 * LAYOUT_SPACING_X,
            y: 0.0,
        };
        let node = convert::spec_node_to_canvas(spec_node, position);
        if let Some(previous) = nodes.last() {
            edges.push(CanvasEdge {
                id: format!("e-{}-{}", previous.id, node.id),
                source: previous.id.clone(),
                target: node.id.clone(),
                source_handle: None,
                target_handle: None,
                data: None,
            });
        }
        nodes.push(node);
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "synthesized canvas graph from specification"
    );
    CanvasGraph { nodes, edges }
}
