//! Shape-style cluster coercion and array splicing

use attrkit_coerce::{merge_array, CoerceError, Coercer, Schema, SchemaLeaf};
use attrkit_path::Node;
use attrkit_test_utils::{coerce_shape, font_schema, init_tracing};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn partial_rectangle_is_completed_on_input() {
    init_tracing();
    let coercer = Coercer::new();
    let mut input = Node::from(json!({"x0": 2, "y1": "5", "line": {"width": -1}}));

    let output = coerce_shape(&coercer, &mut input).unwrap();

    assert_eq!(
        output,
        Node::from(json!({
            "visible": true,
            "type": "rect",
            "xref": "x",
            "yref": "y",
            "x0": 2,
            "x1": 1,
            "y0": 0,
            "y1": 5,
            "opacity": 1,
            "line": {"color": "#444", "width": 2},
            "fillcolor": "rgba(0,0,0,0)"
        }))
    );
    assert_eq!(
        input,
        Node::from(json!({"x0": 2, "y1": "5", "line": {"width": -1}, "x1": 1, "y0": 0}))
    );
}

#[test]
fn rectangle_without_corners_keeps_input_untouched() {
    let coercer = Coercer::new();
    let mut input = Node::from(json!({"xref": "x3", "type": "circle"}));
    let output = coerce_shape(&coercer, &mut input).unwrap();

    assert_eq!(input, Node::from(json!({"xref": "x3", "type": "circle"})));
    assert_eq!(output.get_key("xref"), Some(&Node::from("x3")));
    assert_eq!(output.get_key("type"), Some(&Node::from("circle")));
}

#[test]
fn font_defaults_apply_per_member() {
    let coercer = Coercer::new();
    let schema = font_schema();
    let input = Node::from(json!({"font": {"color": "not-a-color", "size": 20}}));
    let mut output = Node::empty_map();

    coercer.coerce(&input, &mut output, &schema, "font", None).unwrap();
    assert_eq!(
        output,
        Node::from(json!({"font": {"family": "Arial", "size": 20, "color": "#444"}}))
    );
}

#[test]
fn merge_array_splices_per_point_overrides() {
    let mut points = vec![
        Node::from(json!({"x": 0})),
        Node::from(json!({"x": 1})),
        Node::from(json!({"x": 2})),
    ];
    let trace = Node::from(json!({"text": ["first", "second"]}));
    merge_array(trace.get_key("text"), &mut points, "text");

    assert_eq!(
        points,
        vec![
            Node::from(json!({"x": 0, "text": "first"})),
            Node::from(json!({"x": 1, "text": "second"})),
            Node::from(json!({"x": 2})),
        ]
    );
}

#[test]
fn unknown_type_fails_fast() {
    let schema = Schema::group([("glow", SchemaLeaf::new("sparkle").with_default(1).into())]);
    let coercer = Coercer::new();
    let mut output = Node::empty_map();

    let err = coercer
        .coerce(&Node::empty_map(), &mut output, &schema, "glow", None)
        .unwrap_err();
    assert!(matches!(err, CoerceError::UnknownType(ref tag) if tag == "sparkle"));
    assert_eq!(output, Node::empty_map());
}
