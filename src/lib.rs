//! # Flowspec - Workflow Graph ⇄ Specification Compiler
//!
//! **Flowspec** converts the free-form node/edge diagram a user draws on a
//! workflow canvas (tool calls, LLM calls, if/else branches, for-loops,
//! input blocks, triggers) into the recursively nested specification an
//! execution engine consumes, and reconstructs the diagram from that
//! specification.
//!
//! ## Core Workflow
//!
//! 1. **Snapshot the canvas**: the canvas state collaborator hands over a
//!    [`canvas::CanvasGraph`] (nodes with typed configs, edges with optional
//!    branch tags).
//! 2. **Compile**: [`compiler::graph_to_workflow_spec`] indexes the graph,
//!    walks each chain in deterministic order, converts every node and
//!    translates embedded `{{ expr }}` placeholders to the engine's
//!    `${ expr }` convention.
//! 3. **Round-trip**: the compiled [`spec::WorkflowSpec`] embeds a canvas
//!    snapshot in its `meta` bag, so [`compiler::workflow_spec_to_graph`]
//!    restores the diagram pixel-perfect; without a snapshot it synthesizes
//!    a minimal left-to-right layout.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowspec::prelude::*;
//! use serde_json::json;
//!
//! let graph = CanvasGraph {
//!     nodes: vec![CanvasNode {
//!         id: "fetch".to_string(),
//!         kind: NodeKind::Tool,
//!         position: Position { x: 0.0, y: 0.0 },
//!         data: NodeData {
//!             kind: NodeKind::Tool,
//!             label: "Fetch PR".to_string(),
//!             config: json!({
//!                 "tool_name": "fetch_pr",
//!                 "parameters": { "id": "{{pr_id}}" },
//!             }),
//!         },
//!     }],
//!     edges: vec![],
//! };
//!
//! let spec = graph_to_workflow_spec(&graph, None)?;
//! assert_eq!(spec.nodes.len(), 1);
//!
//! // The embedded snapshot makes the reverse direction lossless.
//! let restored = workflow_spec_to_graph(&spec);
//! assert_eq!(restored, graph);
//! # Ok::<(), flowspec::error::CompileError>(())
//! ```

pub mod canvas;
pub mod compiler;
pub mod error;
pub mod prelude;
pub mod spec;
pub mod template;
