//! Testing utilities for attrkit workspace
//!
//! Shared fixtures, schemas and tracing setup.

#![allow(missing_docs)]

use attrkit_coerce::{none_or_all, CoerceError, Coercer, Schema, SchemaLeaf};
use attrkit_path::Node;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honoring `RUST_LOG`; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const SHAPE_CORNERS: &[&str] = &["x0", "x1", "y0", "y1"];

/// Rectangle-like schema whose corners must be all present or all absent
pub fn shape_schema() -> Schema {
    let corner = |dflt: f64| Schema::from(SchemaLeaf::new("number").with_default(dflt));
    Schema::group([
        ("visible", SchemaLeaf::new("boolean").with_default(true).into()),
        (
            "type",
            SchemaLeaf::new("enumerated")
                .with_values(["rect", "circle", "line"])
                .with_default("rect")
                .into(),
        ),
        ("xref", SchemaLeaf::new("axisid").with_default("x").into()),
        ("yref", SchemaLeaf::new("axisid").with_default("y").into()),
        ("x0", corner(0.0)),
        ("x1", corner(1.0)),
        ("y0", corner(0.0)),
        ("y1", corner(1.0)),
        ("opacity", SchemaLeaf::new("number").with_min(0.0).with_max(1.0).with_default(1).into()),
        (
            "line",
            Schema::group([
                ("color", SchemaLeaf::new("color").with_default("#444").into()),
                ("width", SchemaLeaf::new("number").with_min(0.0).with_default(2).into()),
            ]),
        ),
        ("fillcolor", SchemaLeaf::new("color").with_default("rgba(0,0,0,0)").into()),
    ])
}

/// Coerce one shape the way a layout module would
///
/// Corners are coerced, then the input cluster is completed so a partial
/// rectangle reads back consistently.
pub fn coerce_shape(coercer: &Coercer, input: &mut Node) -> Result<Node, CoerceError> {
    let schema = shape_schema();
    let mut output = Node::empty_map();
    {
        let mut attrs = coercer.bind(input, &mut output, &schema);
        for attr in [
            "visible", "type", "xref", "yref", "x0", "x1", "y0", "y1", "opacity", "line.color",
            "line.width", "fillcolor",
        ] {
            attrs.coerce(attr)?;
        }
    }
    none_or_all(input, &output, SHAPE_CORNERS);
    Ok(output)
}

/// Schema holding a single font attribute
pub fn font_schema() -> Schema {
    Schema::group([(
        "font",
        SchemaLeaf::new("font")
            .with_default(Node::from(json!({"family": "Arial", "size": 12, "color": "#444"})))
            .into(),
    )])
}

/// Scatter-like schema with per-point arrays and flaglists
pub fn scatter_schema() -> Schema {
    Schema::from_yaml(SCATTER_YAML).expect("fixture schema is valid")
}

const SCATTER_YAML: &str = r##"
x: { type: data_array }
y: { type: data_array }
mode:
  type: flaglist
  flags: [lines, markers, text]
  extras: [none]
  dflt: markers
hoverinfo:
  type: flaglist
  flags: [x, y, text, name]
  extras: [all, none, skip]
  dflt: all
text: { type: string, arrayOk: true, dflt: "" }
name: { type: string, noBlank: true }
opacity: { type: number, min: 0, max: 1, dflt: 1 }
xaxis: { type: axisid, dflt: x }
yaxis: { type: axisid, dflt: y }
scene: { type: sceneid, dflt: scene }
marker:
  size: { type: number, min: 0, dflt: 6, arrayOk: true }
  color: { type: color, arrayOk: true, dflt: "#1f77b4" }
  symbol: { type: enumerated, values: [circle, square, diamond], dflt: circle }
  colorscale: { type: colorscale, dflt: RdBu }
  showscale: { type: boolean, dflt: false }
  angle: { type: angle, dflt: 0 }
line:
  width: { type: number, min: 0, dflt: 2 }
  dash: { type: enumerated, values: [solid, dot, dash], dflt: solid }
textfont: { type: font, dflt: { family: "Open Sans", size: 12, color: "#444" } }
"##;

/// Every attribute path of [`scatter_schema`]
pub fn scatter_attrs() -> Vec<String> {
    scatter_schema().leaves().into_iter().map(|(path, _)| path).collect()
}

/// Coerce every scatter attribute
pub fn coerce_scatter(coercer: &Coercer, input: &Node) -> Result<Node, CoerceError> {
    let schema = scatter_schema();
    let mut output = Node::empty_map();
    let mut attrs = coercer.bind(input, &mut output, &schema);
    for attr in scatter_attrs() {
        attrs.coerce(&attr)?;
    }
    Ok(output)
}

/// A messy scatter input mixing valid and invalid values
pub fn messy_scatter_input() -> Node {
    Node::from(json!({
        "x": [1, 2, 3],
        "y": "not an array",
        "mode": "lines+bogus+lines+markers",
        "hoverinfo": "none",
        "text": ["a", "b", "c"],
        "name": "   ",
        "opacity": "0.5",
        "xaxis": "x2",
        "yaxis": "y1",
        "scene": "scene4",
        "marker": {
            "size": -1,
            "color": ["red", "green"],
            "symbol": "star",
            "colorscale": "Jet",
            "showscale": "yes",
            "angle": 540
        },
        "line": {"width": "3", "dash": "dot"},
        "textfont": {"family": "", "size": 0.5, "color": "chartreuse"}
    }))
}
