use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of block a canvas node represents.
///
/// Unknown kinds are preserved verbatim rather than rejected at
/// deserialization time, so that a block type added to the canvas without a
/// matching converter surfaces as a compile error naming the node instead of
/// a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Tool,
    Llm,
    IfElse,
    ForLoop,
    Input,
    Trigger,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Tool => "tool",
            NodeKind::Llm => "llm",
            NodeKind::IfElse => "if_else",
            NodeKind::ForLoop => "for_loop",
            NodeKind::Input => "input",
            NodeKind::Trigger => "trigger",
            NodeKind::Other(name) => name,
        }
    }

    /// Whether this node participates in the executable node sequence.
    ///
    /// Input blocks contribute only to the specification's `inputs` map and
    /// triggers are persisted separately as subscriptions; neither appears in
    /// the compiled node sequence.
    pub fn is_executable(&self) -> bool {
        !matches!(self, NodeKind::Input | NodeKind::Trigger)
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "tool" => NodeKind::Tool,
            "llm" => NodeKind::Llm,
            "if_else" => NodeKind::IfElse,
            "for_loop" => NodeKind::ForLoop,
            "input" => NodeKind::Input,
            "trigger" => NodeKind::Trigger,
            _ => NodeKind::Other(value),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A canvas coordinate. Presentational only; the compiler uses it solely for
/// deterministic edge ordering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The payload a canvas node carries alongside its id and position.
///
/// `config` stays free-form JSON at this layer; the per-kind typed configs in
/// [`crate::canvas::config`] are parsed from it when a node is converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub config: Value,
}

/// One block on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
}

/// The branch of a conditional or loop node an edge continues.
///
/// An edge with no tag is the unconditional default continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchTag {
    True,
    False,
    Loop,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchTag>,
}

/// A directed connection between two canvas nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        alias = "source_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        default,
        rename = "targetHandle",
        alias = "target_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl CanvasEdge {
    /// The branch tag, if any. Edges out of a conditional node are
    /// distinguished by this tag rather than by handle position.
    pub fn branch(&self) -> Option<BranchTag> {
        self.data.as_ref().and_then(|data| data.branch)
    }
}

/// A snapshot of the node/edge diagram as edited on the canvas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasGraph {
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub edges: Vec<CanvasEdge>,
}

impl CanvasGraph {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
