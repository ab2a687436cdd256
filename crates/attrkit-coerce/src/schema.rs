//! Attribute schema trees
//!
//! A schema mirrors the shape of the attribute tree it governs. Groups hold
//! named members; leaves describe a single attribute: its type tag, default
//! and type-specific parameters.
//!
//! Schemas load from JSON or YAML. An object is a leaf when it carries a
//! string `type` member and a group otherwise:
//!
//! ```yaml
//! opacity: { type: number, min: 0, max: 1, dflt: 1 }
//! line:
//!   width: { type: number, min: 0, dflt: 2 }
//!   dash:  { type: enumerated, values: [solid, dot, dash], dflt: solid }
//! ```

use crate::error::SchemaError;
use attrkit_path::{Node, PropPath, Segment};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Descriptor of a single attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaLeaf {
    /// Validator type tag
    #[serde(rename = "type")]
    pub val_type: String,

    /// Default stored when the input is unusable
    #[serde(default, alias = "default", skip_serializing_if = "Option::is_none")]
    pub dflt: Option<Node>,

    /// Inclusive lower bound (numeric types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound (numeric types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Allowed values (`enumerated`)
    #[serde(default, alias = "enumeratedValues", skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Node>,

    /// Accept a sequence verbatim in place of a single value
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub array_ok: bool,

    /// Combinable flags (`flaglist`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,

    /// Standalone values accepted verbatim (`flaglist`)
    #[serde(default, alias = "extraFlags", skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,

    /// Treat whitespace-only strings as missing (`string`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_blank: bool,
}

impl SchemaLeaf {
    /// Create leaf with type tag
    #[must_use]
    pub fn new(val_type: impl Into<String>) -> Self {
        Self {
            val_type: val_type.into(),
            dflt: None,
            min: None,
            max: None,
            values: Vec::new(),
            array_ok: false,
            flags: Vec::new(),
            extras: Vec::new(),
            no_blank: false,
        }
    }

    /// With default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, dflt: impl Into<Node>) -> Self {
        self.dflt = Some(dflt.into());
        self
    }

    /// With inclusive lower bound
    #[inline]
    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// With inclusive upper bound
    #[inline]
    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// With allowed values
    #[must_use]
    pub fn with_values<V: Into<Node>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// With flags
    #[must_use]
    pub fn with_flags<S: Into<String>>(mut self, flags: impl IntoIterator<Item = S>) -> Self {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// With extras
    #[must_use]
    pub fn with_extras<S: Into<String>>(mut self, extras: impl IntoIterator<Item = S>) -> Self {
        self.extras = extras.into_iter().map(Into::into).collect();
        self
    }

    /// Accept sequences verbatim
    #[inline]
    #[must_use]
    pub fn array_ok(mut self) -> Self {
        self.array_ok = true;
        self
    }

    /// Reject whitespace-only strings
    #[inline]
    #[must_use]
    pub fn no_blank(mut self) -> Self {
        self.no_blank = true;
        self
    }
}

/// Schema node: a leaf descriptor or a group of named members
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Schema {
    /// Single attribute
    Leaf(SchemaLeaf),

    /// Named members
    Group(IndexMap<String, Schema>),
}

impl Schema {
    /// Group from named members
    #[must_use]
    pub fn group<K: Into<String>>(members: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Self::Group(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Load from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or not shaped like a schema
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let value: JsonValue = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Load from YAML text
    ///
    /// # Errors
    /// Returns error if the text is not YAML or not shaped like a schema
    pub fn from_yaml(text: &str) -> Result<Self, SchemaError> {
        let value: JsonValue = serde_yaml::from_str(text)?;
        Self::from_value(value)
    }

    /// Build from a JSON value
    ///
    /// # Errors
    /// Returns error if a member is not an object or a leaf fails to decode
    pub fn from_value(value: JsonValue) -> Result<Self, SchemaError> {
        build(value, "")
    }

    /// Leaf descriptor, if this node is one
    #[inline]
    #[must_use]
    pub fn as_leaf(&self) -> Option<&SchemaLeaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Members, if this node is a group
    #[inline]
    #[must_use]
    pub fn as_group(&self) -> Option<&IndexMap<String, Schema>> {
        match self {
            Self::Group(members) => Some(members),
            Self::Leaf(_) => None,
        }
    }

    /// Schema node for a path
    ///
    /// Only key segments descend; a path with an index or broadcast has no
    /// schema node.
    #[must_use]
    pub fn node(&self, path: &PropPath) -> Option<&Schema> {
        let mut current = self;
        for segment in path.segments() {
            let Segment::Key(key) = segment else {
                return None;
            };
            current = current.as_group()?.get(key)?;
        }
        Some(current)
    }

    /// Leaf descriptor for a path
    #[inline]
    #[must_use]
    pub fn leaf(&self, path: &PropPath) -> Option<&SchemaLeaf> {
        self.node(path).and_then(Schema::as_leaf)
    }

    /// Every leaf with its dotted path, depth first in declaration order
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &SchemaLeaf)> {
        let mut out = Vec::new();
        collect_leaves(self, String::new(), &mut out);
        out
    }
}

impl From<SchemaLeaf> for Schema {
    fn from(leaf: SchemaLeaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn build(value: JsonValue, at: &str) -> Result<Schema, SchemaError> {
    let JsonValue::Object(members) = value else {
        return Err(SchemaError::invalid_shape(at, "expected an object"));
    };

    if matches!(members.get("type"), Some(JsonValue::String(_))) {
        let leaf: SchemaLeaf = serde_json::from_value(JsonValue::Object(members))
            .map_err(|e| SchemaError::invalid_shape(at, e.to_string()))?;
        return Ok(Schema::Leaf(leaf));
    }

    let mut group = IndexMap::with_capacity(members.len());
    for (key, child) in members {
        let child_at = join(at, &key);
        let child = build(child, &child_at)?;
        group.insert(key, child);
    }
    Ok(Schema::Group(group))
}

fn collect_leaves<'a>(schema: &'a Schema, at: String, out: &mut Vec<(String, &'a SchemaLeaf)>) {
    match schema {
        Schema::Leaf(leaf) => out.push((at, leaf)),
        Schema::Group(members) => {
            for (key, child) in members {
                collect_leaves(child, join(&at, key), out);
            }
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
