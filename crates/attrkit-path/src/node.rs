//! Tagged container nodes
//!
//! Provides [`Node`], the tree every path operation walks. A node is a
//! mapping, a sequence or a scalar leaf; "absent" is modelled as
//! `Option::<Node>::None` and never stored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use std::fmt::{self, Display, Formatter};

/// String-keyed mapping
///
/// Semantically unordered; insertion order is kept for serialization only.
pub type Mapping = IndexMap<String, Node>;

/// Node of an attribute tree
///
/// # Examples
/// - `{"line": {"width": 2}}` → `Map { line: Map { width: Int(2) } }`
/// - `[1, "a", null]` → `Seq [Int(1), Str("a"), Null]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Explicit null (also used as a placeholder inside sequences)
    #[default]
    Null,

    /// Boolean scalar
    Bool(bool),

    /// Integer scalar
    Int(i64),

    /// Floating point scalar
    Float(f64),

    /// Text scalar
    Str(String),

    /// Integer-indexed, ordered container
    Seq(Vec<Node>),

    /// String-keyed container
    Map(Mapping),
}

impl Node {
    /// New empty mapping
    #[inline]
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(Mapping::new())
    }

    /// New empty sequence
    #[inline]
    #[must_use]
    pub fn empty_seq() -> Self {
        Self::Seq(Vec::new())
    }

    /// Check for explicit null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if node is a mapping or a sequence
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Seq(_))
    }

    /// Emptiness test used by `set` and pruning
    ///
    /// Null, the empty string, and containers whose members are all empty
    /// (recursively) are empty. `false`, `0` and `NaN` are not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            Self::Seq(items) => items.iter().all(Self::is_empty),
            Self::Map(map) => map.values().all(Self::is_empty),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Boolean value, if this is a boolean
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value of an `Int` or `Float`
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text value, if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Sequence members, if this is a sequence
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Node]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable sequence, if this is a sequence
    #[inline]
    pub fn as_seq_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping, if this is a mapping
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable mapping, if this is a mapping
    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Member of a mapping by key
    #[inline]
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Permissive numeric probe
    ///
    /// Finite numbers, and strings that trim to a finite decimal number,
    /// are numeric. Booleans, null and containers are not.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        let value = match self {
            Self::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            other => other.as_f64()?,
        };
        value.is_finite().then_some(value)
    }

    /// Text rendering of a scalar; `None` for containers
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(format_float(*f)),
            Self::Str(s) => Some(s.clone()),
            Self::Seq(_) | Self::Map(_) => None,
        }
    }

    /// Short name of the node kind, for diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Str(_) => "string",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "mapping",
        }
    }
}

/// Emptiness of a possibly absent value
#[inline]
#[must_use]
pub fn is_empty_value(value: Option<&Node>) -> bool {
    value.map_or(true, Node::is_empty)
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

impl PartialEq for Node {
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => (*a as f64) == *b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Seq(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Self::Map(map)
    }
}

impl From<JsonValue> for Node {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            JsonValue::String(s) => Self::Str(s),
            JsonValue::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(obj) => {
                Self::Map(obj.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Node> for JsonValue {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => JsonValue::Null,
            Node::Bool(b) => JsonValue::Bool(b),
            Node::Int(n) => JsonValue::Number(Number::from(n)),
            Node::Float(f) => Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
            Node::Str(s) => JsonValue::String(s),
            Node::Seq(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Node::Map(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect::<JsonMap<String, JsonValue>>(),
            ),
        }
    }
}
