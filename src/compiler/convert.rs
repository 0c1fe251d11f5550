//! Per-kind translation between the canvas node shape and the specification
//! node shape.
//!
//! Forward converters validate required fields and raise
//! [`CompileError::Configuration`] naming the block; numeric fields that fail
//! to coerce to a finite value are dropped rather than raised. The reverse
//! converters serve the synthesis fallback in
//! [`crate::compiler::workflow_spec_to_graph`] and are deliberately lossy for
//! nested branch bodies.

use crate::canvas::{
    CanvasNode, ConditionConfig, InputConfig, InputFieldDef, LlmConfig, LoopConfig, LoopMode,
    NodeData, NodeKind, Position, PROMPT_PLACEHOLDER, ToolConfig,
};
use crate::error::CompileError;
use crate::spec::{InlineSchema, InputDef, SpecNode};
use crate::template::{Direction, translate, translate_value};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

pub(crate) fn parse_config<T>(node: &CanvasNode) -> Result<T, CompileError>
where
    T: DeserializeOwned + Default,
{
    if node.data.config.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(node.data.config.clone()).map_err(|e| CompileError::Configuration {
        node_id: node.id.clone(),
        message: format!("invalid configuration: {e}"),
    })
}

fn configuration_error(node: &CanvasNode, message: &str) -> CompileError {
    CompileError::Configuration {
        node_id: node.id.clone(),
        message: message.to_string(),
    }
}

/// Reduces a label or explicit alias to a valid identifier: alphanumerics
/// kept (lowercased), every other run collapsed to a single underscore.
pub(crate) fn sanitize_identifier(raw: &str) -> String {
    let mut ident = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !ident.is_empty() {
                ident.push('_');
            }
            pending_separator = false;
            ident.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Derives the optional `out` alias: an explicit config value (sanitized)
/// takes precedence over the implicit alias derived from the node's label.
pub(crate) fn derive_out(explicit: Option<&str>, label: &str) -> Option<String> {
    if let Some(explicit) = explicit {
        let ident = sanitize_identifier(explicit);
        if !ident.is_empty() {
            return Some(ident);
        }
    }
    let implicit = sanitize_identifier(label);
    (!implicit.is_empty()).then_some(implicit)
}

/// Coerces a config value to a finite number, accepting both JSON numbers
/// and string-typed form input. Anything else is `None`.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Wraps a schema value into an inline-schema descriptor, only if non-empty.
pub(crate) fn inline_schema(schema: Value) -> Option<InlineSchema> {
    match &schema {
        Value::Null => None,
        Value::Object(entries) if entries.is_empty() => None,
        Value::String(s) if s.trim().is_empty() => None,
        _ => Some(InlineSchema { schema }),
    }
}

fn translate_bindings(bindings: Map<String, Value>) -> Map<String, Value> {
    bindings
        .into_iter()
        .map(|(key, value)| (key, translate_value(value, Direction::ToCompiler)))
        .collect()
}

pub(crate) fn convert_tool(node: &CanvasNode) -> Result<SpecNode, CompileError> {
    let cfg: ToolConfig = parse_config(node)?;
    if cfg.tool_name.trim().is_empty() {
        return Err(configuration_error(node, "missing tool selection"));
    }
    Ok(SpecNode::Tool {
        id: node.id.clone(),
        tool: cfg.tool_name.trim().to_string(),
        inputs: translate_bindings(cfg.parameters),
        expect: inline_schema(cfg.output_schema),
        out: derive_out(cfg.out.as_deref(), &node.data.label),
    })
}

fn usable_prompt(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty() && trimmed != PROMPT_PLACEHOLDER).then_some(trimmed)
}

pub(crate) fn convert_llm(node: &CanvasNode) -> Result<SpecNode, CompileError> {
    let cfg: LlmConfig = parse_config(node)?;
    let segments: Vec<&str> = [
        usable_prompt(&cfg.system_prompt),
        usable_prompt(&cfg.user_prompt),
    ]
    .into_iter()
    .flatten()
    .collect();
    if segments.is_empty() {
        return Err(configuration_error(node, "requires a prompt"));
    }
    Ok(SpecNode::Llm {
        id: node.id.clone(),
        model: cfg.model.trim().to_string(),
        prompt: translate(&segments.join("\n\n"), Direction::ToCompiler),
        inputs: translate_bindings(cfg.inputs),
        schema: inline_schema(cfg.output_schema),
        temperature: coerce_number(&cfg.temperature),
        max_tokens: coerce_number(&cfg.max_tokens)
            .filter(|n| *n >= 0.0)
            .map(|n| n as u64),
        out: derive_out(cfg.out.as_deref(), &node.data.label),
    })
}

/// Validated pieces of an `if_else` node; the walker supplies the branch
/// sequences.
pub(crate) struct ConditionParts {
    pub condition: String,
    pub out: Option<String>,
}

pub(crate) fn convert_condition(node: &CanvasNode) -> Result<ConditionParts, CompileError> {
    let cfg: ConditionConfig = parse_config(node)?;
    if cfg.condition.trim().is_empty() {
        return Err(configuration_error(node, "requires a condition"));
    }
    Ok(ConditionParts {
        condition: translate(cfg.condition.trim(), Direction::ToCompiler),
        out: derive_out(cfg.out.as_deref(), &node.data.label),
    })
}

/// Validated pieces of a `for_loop` node; the walker supplies the body.
pub(crate) struct LoopParts {
    pub items: Value,
    pub item: String,
    pub index: String,
    pub out: Option<String>,
}

pub(crate) fn convert_loop(node: &CanvasNode) -> Result<LoopParts, CompileError> {
    let cfg: LoopConfig = parse_config(node)?;
    let items = match cfg.mode {
        LoopMode::Literal => Value::Array(
            cfg.items
                .into_iter()
                .map(|item| translate_value(item, Direction::ToCompiler))
                .collect(),
        ),
        LoopMode::Variable => {
            if cfg.source.trim().is_empty() {
                return Err(configuration_error(node, "requires an array reference"));
            }
            Value::String(translate(cfg.source.trim(), Direction::ToCompiler))
        }
    };
    Ok(LoopParts {
        items,
        item: cfg.item_var,
        index: cfg.index_var,
        out: derive_out(cfg.out.as_deref(), &node.data.label),
    })
}

/// Collects the `inputs` map from every input block on the canvas. Fields
/// with an empty name are skipped; an empty declared type defaults to
/// `string`.
pub(crate) fn collect_inputs(
    nodes: &[CanvasNode],
) -> Result<BTreeMap<String, InputDef>, CompileError> {
    let mut inputs = BTreeMap::new();
    for node in nodes.iter().filter(|n| n.kind == NodeKind::Input) {
        let cfg: InputConfig = parse_config(node)?;
        for field in cfg.fields {
            let name = field.name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            let field_type = if field.field_type.trim().is_empty() {
                "string".to_string()
            } else {
                field.field_type.trim().to_string()
            };
            inputs.insert(
                name,
                InputDef {
                    field_type,
                    required: field.required,
                    default: field.default,
                    description: field.description,
                },
            );
        }
    }
    Ok(inputs)
}

/// Synthesizes a canvas node from a root-level specification node. Nested
/// `then`/`else`/`body` sequences are not reconstructed on this path, and
/// labels are left empty: a synthesized label would derive an implicit `out`
/// alias on recompilation that the specification never carried.
pub(crate) fn spec_node_to_canvas(spec: &SpecNode, position: Position) -> CanvasNode {
    let (kind, config) = match spec {
        SpecNode::Tool {
            tool,
            inputs,
            expect,
            out,
            ..
        } => (
            NodeKind::Tool,
            json!({
                "tool_name": tool,
                "parameters": translate_value(Value::Object(inputs.clone()), Direction::ToBuilder),
                "output_schema": expect.as_ref().map(|s| s.schema.clone()).unwrap_or(Value::Null),
                "out": out,
            }),
        ),
        SpecNode::Llm {
            model,
            prompt,
            inputs,
            schema,
            temperature,
            max_tokens,
            out,
            ..
        } => (
            NodeKind::Llm,
            json!({
                "model": model,
                // The system/user split is not recoverable from the joined
                // prompt; the whole text lands in the user prompt field.
                "system_prompt": "",
                "user_prompt": translate(prompt, Direction::ToBuilder),
                "inputs": translate_value(Value::Object(inputs.clone()), Direction::ToBuilder),
                "output_schema": schema.as_ref().map(|s| s.schema.clone()).unwrap_or(Value::Null),
                "temperature": temperature,
                "max_tokens": max_tokens,
                "out": out,
            }),
        ),
        SpecNode::If {
            condition, out, ..
        } => (
            NodeKind::IfElse,
            json!({
                "condition": translate(condition, Direction::ToBuilder),
                "out": out,
            }),
        ),
        SpecNode::ForEach {
            items,
            item,
            index,
            out,
            ..
        } => {
            let config = match items {
                Value::String(source) => json!({
                    "mode": "variable",
                    "source": translate(source, Direction::ToBuilder),
                    "item_var": item,
                    "index_var": index,
                    "out": out,
                }),
                other => json!({
                    "mode": "literal",
                    "items": translate_value(other.clone(), Direction::ToBuilder),
                    "item_var": item,
                    "index_var": index,
                    "out": out,
                }),
            };
            (NodeKind::ForLoop, config)
        }
    };

    CanvasNode {
        id: spec.id().to_string(),
        kind: kind.clone(),
        position,
        data: NodeData {
            kind,
            label: String::new(),
            config,
        },
    }
}

/// Synthesizes the canvas config of an input block from declared inputs.
pub(crate) fn inputs_to_fields(inputs: &BTreeMap<String, InputDef>) -> Vec<InputFieldDef> {
    inputs
        .iter()
        .map(|(name, def)| InputFieldDef {
            name: name.clone(),
            field_type: def.field_type.clone(),
            required: def.required,
            default: def.default.clone(),
            description: def.description.clone(),
        })
        .collect()
}
