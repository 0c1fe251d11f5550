//! Translation between the two expression-interpolation conventions.
//!
//! The canvas builder writes placeholders as `{{ expr }}`; the execution
//! engine consumes `${ expr }`. Translation is a pure regex substitution with
//! whitespace-trimmed expression bodies and no validation of the expression
//! itself: text that matches neither delimiter style passes through
//! unchanged. Canonical emission carries no inner padding (`${expr}`,
//! `{{expr}}`), which makes each direction idempotent: once a string uses
//! the target style, the source pattern no longer matches.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static BUILDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(.+?)\s*\}\}").expect("builder placeholder pattern"));

static COMPILER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{\s*(.+?)\s*\}").expect("compiler placeholder pattern"));

/// Which delimiter convention to translate *into*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `{{ expr }}` -> `${expr}`
    ToCompiler,
    /// `${ expr }` -> `{{expr}}`
    ToBuilder,
}

/// Rewrites every placeholder in `input` to the target convention.
pub fn translate(input: &str, direction: Direction) -> String {
    match direction {
        Direction::ToCompiler => BUILDER_PATTERN.replace_all(input, "$${${1}}").into_owned(),
        Direction::ToBuilder => COMPILER_PATTERN.replace_all(input, "{{${1}}}").into_owned(),
    }
}

/// Applies [`translate`] to every string reachable inside a JSON value.
///
/// Arrays and objects are walked recursively; numbers, booleans and nulls are
/// returned untouched.
pub fn translate_value(value: Value, direction: Direction) -> Value {
    match value {
        Value::String(s) => Value::String(translate(&s, direction)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| translate_value(item, direction))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, translate_value(item, direction)))
                .collect(),
        ),
        other => other,
    }
}
