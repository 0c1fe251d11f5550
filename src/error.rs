use thiserror::Error;

/// Errors that can occur while compiling a canvas graph into a workflow
/// specification.
///
/// Every failure is a deterministic function of the input graph: resubmitting
/// the same graph fails the same way until the offending block is edited, so
/// nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A node is missing a required configuration field (tool selection,
    /// prompt, condition, loop source). Surfaced to the user as a validation
    /// message naming the offending block.
    #[error("node '{node_id}' has invalid configuration: {message}")]
    Configuration { node_id: String, message: String },

    /// A node carries a `type` the compiler has no converter for. This is a
    /// data-model drift (a block type added to the canvas without a matching
    /// converter), not a user error.
    #[error("node '{node_id}' has an unsupported node type: '{type_name}'")]
    UnsupportedNodeType { node_id: String, type_name: String },
}
