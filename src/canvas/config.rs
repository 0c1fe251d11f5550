//! Typed views over the free-form `data.config` JSON each node carries.
//!
//! The canvas collaborator stores configuration as loose key/value maps; the
//! compiler parses them into these structs once, at conversion time, so that
//! "is this config valid" is a parse step instead of scattered null checks.
//! Parsing itself is lenient (every field has a default); required-field
//! validation lives in the node converters, where a missing field becomes a
//! `CompileError::Configuration` naming the block.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The builder seeds new LLM blocks with this prompt text; it counts as
/// "unset" when deciding whether a node has a usable prompt.
pub const PROMPT_PLACEHOLDER: &str = "Enter your prompt here...";

/// Configuration of a `tool` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    #[serde(alias = "toolName")]
    pub tool_name: String,
    pub parameters: Map<String, Value>,
    #[serde(alias = "outputSchema")]
    pub output_schema: Value,
    pub out: Option<String>,
}

/// Configuration of an `llm` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    #[serde(alias = "systemPrompt")]
    pub system_prompt: String,
    #[serde(alias = "userPrompt")]
    pub user_prompt: String,
    pub inputs: Map<String, Value>,
    #[serde(alias = "outputSchema")]
    pub output_schema: Value,
    /// Raw JSON so string-typed form values coerce the same way numbers do.
    pub temperature: Value,
    #[serde(alias = "maxTokens")]
    pub max_tokens: Value,
    pub out: Option<String>,
}

/// Configuration of an `if_else` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionConfig {
    pub condition: String,
    pub out: Option<String>,
}

/// Where a `for_loop` block finds its iterable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Iterate a literal array stored in the config.
    Literal,
    /// Iterate the value of a referenced expression.
    #[default]
    Variable,
}

/// Configuration of a `for_loop` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub mode: LoopMode,
    pub items: Vec<Value>,
    pub source: String,
    #[serde(alias = "itemVar")]
    pub item_var: String,
    #[serde(alias = "indexVar")]
    pub index_var: String,
    pub out: Option<String>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            mode: LoopMode::default(),
            items: Vec::new(),
            source: String::new(),
            item_var: "item".to_string(),
            index_var: "index".to_string(),
            out: None,
        }
    }
}

/// One field declared by an `input` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFieldDef {
    pub name: String,
    #[serde(rename = "type", alias = "field_type")]
    pub field_type: String,
    pub required: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

/// Configuration of an `input` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub fields: Vec<InputFieldDef>,
}
