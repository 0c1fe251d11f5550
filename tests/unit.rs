//! Unit tests for the template translator, wire representations and errors.
use flowspec::prelude::*;
use serde_json::json;

#[test]
fn translates_builder_placeholders_to_compiler() {
    assert_eq!(
        translate("Summarize {{ A.out }} for {{pr_id}}", Direction::ToCompiler),
        "Summarize ${A.out} for ${pr_id}"
    );
}

#[test]
fn translates_compiler_placeholders_to_builder() {
    assert_eq!(
        translate("Summarize ${ A.out } for ${pr_id}", Direction::ToBuilder),
        "Summarize {{A.out}} for {{pr_id}}"
    );
}

#[test]
fn translation_is_idempotent_per_direction() {
    let once = translate("{{ a }} + {{b}}", Direction::ToCompiler);
    let twice = translate(&once, Direction::ToCompiler);
    assert_eq!(once, twice);

    let back = translate("${ a } + ${b}", Direction::ToBuilder);
    assert_eq!(back, translate(&back, Direction::ToBuilder));
}

#[test]
fn translation_round_trips_canonical_placeholders() {
    let builder = "Summarize {{A.out}} for {{pr_id}}";
    let compiler = translate(builder, Direction::ToCompiler);
    assert_eq!(translate(&compiler, Direction::ToBuilder), builder);

    let compiler = "run(${items}, ${i})";
    let builder = translate(compiler, Direction::ToBuilder);
    assert_eq!(translate(&builder, Direction::ToCompiler), compiler);
}

#[test]
fn malformed_placeholders_pass_through() {
    for s in ["{{ unclosed", "lone }} brace", "$not_a_ref", "plain text"] {
        assert_eq!(translate(s, Direction::ToCompiler), s);
        assert_eq!(translate(s, Direction::ToBuilder), s);
    }
}

#[test]
fn translate_value_recurses_and_leaves_non_strings_alone() {
    let value = json!({
        "id": "{{pr_id}}",
        "count": 3,
        "flags": [true, "{{ flag }}", null],
        "nested": { "expr": "{{ a.b }}" },
    });
    let translated = translate_value(value, Direction::ToCompiler);
    assert_eq!(
        translated,
        json!({
            "id": "${pr_id}",
            "count": 3,
            "flags": [true, "${flag}", null],
            "nested": { "expr": "${a.b}" },
        })
    );
}

#[test]
fn branch_tags_serialize_lowercase() {
    assert_eq!(serde_json::to_value(BranchTag::True).unwrap(), json!("true"));
    assert_eq!(serde_json::to_value(BranchTag::Exit).unwrap(), json!("exit"));
    let tag: BranchTag = serde_json::from_value(json!("loop")).unwrap();
    assert_eq!(tag, BranchTag::Loop);
}

#[test]
fn node_kind_preserves_unknown_types() {
    let kind: NodeKind = serde_json::from_value(json!("if_else")).unwrap();
    assert_eq!(kind, NodeKind::IfElse);

    let kind: NodeKind = serde_json::from_value(json!("gadget")).unwrap();
    assert_eq!(kind, NodeKind::Other("gadget".to_string()));
    assert_eq!(serde_json::to_value(&kind).unwrap(), json!("gadget"));
    assert!(kind.is_executable());
    assert!(!NodeKind::Trigger.is_executable());
}

#[test]
fn spec_node_wire_shape_uses_in_and_else_keys() {
    let node = SpecNode::If {
        id: "check".to_string(),
        condition: "${n} > 1".to_string(),
        then: vec![SpecNode::Tool {
            id: "A".to_string(),
            tool: "notify".to_string(),
            inputs: [("msg".to_string(), json!("${n}"))].into_iter().collect(),
            expect: None,
            out: None,
        }],
        otherwise: vec![],
        out: None,
    };

    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["type"], json!("if"));
    assert_eq!(value["else"], json!([]));
    assert_eq!(value["then"][0]["type"], json!("tool"));
    assert_eq!(value["then"][0]["in"]["msg"], json!("${n}"));

    let parsed: SpecNode = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, node);
}

#[test]
fn canvas_edge_wire_shape_uses_camel_case_handles() {
    let edge = CanvasEdge {
        id: "e1".to_string(),
        source: "A".to_string(),
        target: "B".to_string(),
        source_handle: Some("out-0".to_string()),
        target_handle: None,
        data: Some(EdgeData {
            branch: Some(BranchTag::True),
        }),
    };
    let value = serde_json::to_value(&edge).unwrap();
    assert_eq!(value["sourceHandle"], json!("out-0"));
    assert!(value.get("targetHandle").is_none());
    assert_eq!(value["data"]["branch"], json!("true"));
}

#[test]
fn error_display_names_the_block() {
    let err = CompileError::Configuration {
        node_id: "summarize".to_string(),
        message: "requires a prompt".to_string(),
    };
    assert!(err.to_string().contains("summarize"));
    assert!(err.to_string().contains("requires a prompt"));

    let err = CompileError::UnsupportedNodeType {
        node_id: "weird".to_string(),
        type_name: "gadget".to_string(),
    };
    assert!(err.to_string().contains("weird"));
    assert!(err.to_string().contains("gadget"));
}
