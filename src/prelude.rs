//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the flowspec
//! crate. Import this module to get access to the core functionality without
//! having to import each type individually.

// Core compilation entry points
pub use crate::compiler::{graph_to_workflow_spec, workflow_spec_to_graph};

// Canvas (visual graph) types
pub use crate::canvas::{
    BranchTag, CanvasEdge, CanvasGraph, CanvasNode, EdgeData, NodeData, NodeKind, Position,
};

// Specification types
pub use crate::spec::{
    CANVAS_META_KEY, InlineSchema, InputDef, SPEC_VERSION, SpecNode, WorkflowSpec,
};

// Template translation
pub use crate::template::{Direction, translate, translate_value};

// Error types
pub use crate::error::CompileError;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
