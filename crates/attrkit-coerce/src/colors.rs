//! Color syntax and colorscales
//!
//! [`is_valid_color`] accepts CSS color names, hex notation and the
//! functional `rgb/rgba/hsl/hsla/hsv/hsva(...)` forms. Colorscale lookup is
//! pluggable through [`ColorscaleResolver`]; [`BuiltinColorscales`] knows a
//! handful of named scales and validates explicit stop lists.

use attrkit_path::Node;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Named scale used when neither input nor default resolves
pub const DEFAULT_SCALE: &str = "RdBu";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?(?:[0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})$")
        .expect("static regex is valid")
});

static FUNCTIONAL_COLOR: Lazy<Regex> = Lazy::new(|| {
    let num = r"\s*[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)%?\s*";
    Regex::new(&format!(
        r"^(?:rgb|hsl|hsv)a?\({num},{num},{num}(?:,{num})?\)$"
    ))
    .expect("static regex is valid")
});

static NAMED_COLORS: Lazy<HashSet<&'static str>> = Lazy::new(|| CSS_COLOR_NAMES.iter().copied().collect());

const CSS_COLOR_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen",
    "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue",
    "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

type Stops = &'static [(f64, &'static str)];

const NAMED_SCALES: &[(&str, Stops)] = &[
    ("Greys", &[(0.0, "rgb(0,0,0)"), (1.0, "rgb(255,255,255)")]),
    ("Bluered", &[(0.0, "rgb(0,0,255)"), (1.0, "rgb(255,0,0)")]),
    (
        "RdBu",
        &[
            (0.0, "rgb(5,10,172)"),
            (0.35, "rgb(106,137,247)"),
            (0.5, "rgb(190,190,190)"),
            (0.6, "rgb(220,170,132)"),
            (0.7, "rgb(230,145,90)"),
            (1.0, "rgb(178,10,28)"),
        ],
    ),
    (
        "Reds",
        &[
            (0.0, "rgb(220,220,220)"),
            (0.2, "rgb(245,195,157)"),
            (0.4, "rgb(245,160,105)"),
            (1.0, "rgb(178,10,28)"),
        ],
    ),
    (
        "Blues",
        &[
            (0.0, "rgb(5,10,172)"),
            (0.35, "rgb(40,60,190)"),
            (0.5, "rgb(70,100,245)"),
            (0.6, "rgb(90,120,245)"),
            (0.7, "rgb(106,137,247)"),
            (1.0, "rgb(220,220,220)"),
        ],
    ),
    (
        "Greens",
        &[
            (0.0, "rgb(0,68,27)"),
            (0.125, "rgb(0,109,44)"),
            (0.25, "rgb(35,139,69)"),
            (0.375, "rgb(65,171,93)"),
            (0.5, "rgb(116,196,118)"),
            (0.625, "rgb(161,217,155)"),
            (0.75, "rgb(199,233,192)"),
            (0.875, "rgb(229,245,224)"),
            (1.0, "rgb(247,252,245)"),
        ],
    ),
    (
        "Jet",
        &[
            (0.0, "rgb(0,0,131)"),
            (0.125, "rgb(0,60,170)"),
            (0.375, "rgb(5,255,255)"),
            (0.625, "rgb(255,255,0)"),
            (0.875, "rgb(250,0,0)"),
            (1.0, "rgb(128,0,0)"),
        ],
    ),
    (
        "Hot",
        &[
            (0.0, "rgb(0,0,0)"),
            (0.3, "rgb(230,0,0)"),
            (0.6, "rgb(255,210,0)"),
            (1.0, "rgb(255,255,255)"),
        ],
    ),
];

/// Check a string against the accepted color syntax (case-insensitive)
#[must_use]
pub fn is_valid_color(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower == "transparent"
        || NAMED_COLORS.contains(lower.as_str())
        || HEX_COLOR.is_match(&lower)
        || FUNCTIONAL_COLOR.is_match(&lower)
}

/// Check that a node is a usable stop list
///
/// At least two `[fraction, color]` pairs, fractions non-decreasing within
/// `[0, 1]`, starting at 0 and ending at 1.
#[must_use]
pub fn is_valid_scale(scale: &Node) -> bool {
    let Some(stops) = scale.as_seq() else {
        return false;
    };
    if stops.len() < 2 {
        return false;
    }

    let mut fractions = Vec::with_capacity(stops.len());
    for stop in stops {
        let Some([fraction, color]) = stop.as_seq() else {
            return false;
        };
        let Some(fraction) = fraction.as_f64() else {
            return false;
        };
        if !(0.0..=1.0).contains(&fraction) || !color.as_str().is_some_and(is_valid_color) {
            return false;
        }
        fractions.push(fraction);
    }

    fractions.windows(2).all(|w| w[0] <= w[1])
        && fractions.first() == Some(&0.0)
        && fractions.last() == Some(&1.0)
}

/// Named colorscale as a stop list
#[must_use]
pub fn named_scale(name: &str) -> Option<Node> {
    NAMED_SCALES
        .iter()
        .find(|(scale, _)| *scale == name)
        .map(|(_, stops)| {
            Node::Seq(
                stops
                    .iter()
                    .map(|&(fraction, color)| Node::Seq(vec![Node::Float(fraction), Node::from(color)]))
                    .collect(),
            )
        })
}

/// Names of the built-in scales
#[must_use]
pub fn scale_names() -> Vec<&'static str> {
    NAMED_SCALES.iter().map(|(name, _)| *name).collect()
}

/// Resolves colorscale input to a concrete stop list
pub trait ColorscaleResolver: Send + Sync + 'static {
    /// Resolve raw input, falling back to the default
    ///
    /// Always produces a usable stop list.
    fn resolve(&self, raw: Option<&Node>, dflt: Option<&Node>) -> Node;
}

/// Built-in named scales plus explicit stop lists
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinColorscales;

impl BuiltinColorscales {
    /// Resolve a single value
    ///
    /// Accepts a scale name, a JSON-encoded stop list, or a stop list.
    #[must_use]
    pub fn lookup(&self, value: &Node) -> Option<Node> {
        match value {
            Node::Str(s) => named_scale(s).or_else(|| {
                serde_json::from_str::<Node>(s)
                    .ok()
                    .filter(is_valid_scale)
            }),
            other => is_valid_scale(other).then(|| other.clone()),
        }
    }
}

impl ColorscaleResolver for BuiltinColorscales {
    fn resolve(&self, raw: Option<&Node>, dflt: Option<&Node>) -> Node {
        raw.and_then(|r| self.lookup(r))
            .or_else(|| dflt.and_then(|d| self.lookup(d)))
            .or_else(|| named_scale(DEFAULT_SCALE))
            .unwrap_or_else(Node::empty_seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_named_and_hex_colors() {
        for ok in ["red", "Red", "REBECCAPURPLE", "transparent", "#fff", "#FFFA", "ff0000", "#ff000080"] {
            assert!(is_valid_color(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn accepts_functional_colors() {
        for ok in [
            "rgb(255,0,0)",
            "rgba(255, 0, 0, 0.5)",
            "hsl(120, 100%, 50%)",
            "HSVA(0,0%,100%,.3)",
        ] {
            assert!(is_valid_color(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "reddish", "#ff", "#12345", "rgb(1,2)", "rgb(1,2,3,4,5)", "cmyk(1,2,3)"] {
            assert!(!is_valid_color(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn scale_validity() {
        assert!(is_valid_scale(&Node::from(json!([[0, "red"], [1, "blue"]]))));
        assert!(is_valid_scale(&Node::from(json!([[0, "red"], [0.5, "#0f0"], [0.5, "lime"], [1, "blue"]]))));
        assert!(!is_valid_scale(&Node::from(json!([[0, "red"]]))));
        assert!(!is_valid_scale(&Node::from(json!([[0.1, "red"], [1, "blue"]]))));
        assert!(!is_valid_scale(&Node::from(json!([[0, "red"], [0.9, "blue"]]))));
        assert!(!is_valid_scale(&Node::from(json!([[0, "red"], [0.7, "green"], [0.4, "x"], [1, "blue"]]))));
        assert!(!is_valid_scale(&Node::from(json!([[0, "nope"], [1, "blue"]]))));
    }

    #[test]
    fn every_builtin_scale_is_valid() {
        for name in scale_names() {
            let scale = named_scale(name).unwrap();
            assert!(is_valid_scale(&scale), "{name} should be a valid scale");
        }
    }

    #[test]
    fn resolver_prefers_raw_then_default_then_fallback() {
        let resolver = BuiltinColorscales;
        let greys = named_scale("Greys").unwrap();
        let jet = named_scale("Jet").unwrap();

        assert_eq!(resolver.resolve(Some(&Node::from("Greys")), None), greys);
        assert_eq!(
            resolver.resolve(Some(&Node::from("bogus")), Some(&Node::from("Jet"))),
            jet
        );
        assert_eq!(resolver.resolve(None, None), named_scale(DEFAULT_SCALE).unwrap());
    }

    #[test]
    fn resolver_decodes_json_text() {
        let resolver = BuiltinColorscales;
        let text = Node::from(r#"[[0, "red"], [1, "blue"]]"#);
        assert_eq!(
            resolver.resolve(Some(&text), None),
            Node::from(json!([[0, "red"], [1, "blue"]]))
        );
    }
}
