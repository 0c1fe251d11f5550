use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Version stamped on every specification this compiler produces.
pub const SPEC_VERSION: &str = "1";

/// The `meta` key under which the serialized canvas snapshot is embedded for
/// lossless round-tripping.
pub const CANVAS_META_KEY: &str = "canvas";

/// A JSON Schema object embedded directly in a specification node,
/// describing expected structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineSchema {
    pub schema: Value,
}

/// Declaration of one workflow input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDef {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_item_var() -> String {
    "item".to_string()
}

fn default_index_var() -> String {
    "index".to_string()
}

/// The backend-facing, recursively nested instruction representation.
///
/// The canvas graph is flat with branch-tagged edges; here `then`, `else` and
/// `body` are ordered sequences of nested nodes. That asymmetry is the core
/// transformation the compiler performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecNode {
    Tool {
        id: String,
        tool: String,
        #[serde(default, rename = "in", skip_serializing_if = "Map::is_empty")]
        inputs: Map<String, Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<InlineSchema>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        out: Option<String>,
    },
    Llm {
        id: String,
        model: String,
        prompt: String,
        #[serde(default, rename = "in", skip_serializing_if = "Map::is_empty")]
        inputs: Map<String, Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<InlineSchema>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_tokens: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        out: Option<String>,
    },
    If {
        id: String,
        condition: String,
        #[serde(default)]
        then: Vec<SpecNode>,
        #[serde(default, rename = "else")]
        otherwise: Vec<SpecNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        out: Option<String>,
    },
    ForEach {
        id: String,
        /// Either a literal JSON array or a `${…}` reference string.
        items: Value,
        #[serde(default = "default_item_var")]
        item: String,
        #[serde(default = "default_index_var")]
        index: String,
        #[serde(default)]
        body: Vec<SpecNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        out: Option<String>,
    },
}

impl SpecNode {
    /// The id mirrored from the originating canvas node.
    pub fn id(&self) -> &str {
        match self {
            SpecNode::Tool { id, .. }
            | SpecNode::Llm { id, .. }
            | SpecNode::If { id, .. }
            | SpecNode::ForEach { id, .. } => id,
        }
    }

    /// The alias other nodes may reference this node's output by.
    pub fn out(&self) -> Option<&str> {
        match self {
            SpecNode::Tool { out, .. }
            | SpecNode::Llm { out, .. }
            | SpecNode::If { out, .. }
            | SpecNode::ForEach { out, .. } => out.as_deref(),
        }
    }
}

/// Top-level container consumed by the workflow execution engine.
///
/// Maps are `BTreeMap` so that serializing the same specification twice is
/// byte-identical; the compiler's output must be stable for diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSpec {
    pub version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, InputDef>,
    #[serde(default)]
    pub nodes: Vec<SpecNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Value>,
}

impl WorkflowSpec {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
