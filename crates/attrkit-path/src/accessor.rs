//! Reading and writing nested locations
//!
//! [`get`] and [`set`] walk a [`PropPath`] over a caller-owned [`Node`].
//! Mutation is in place; nothing is copied except the values handed out
//! by `get`.
//!
//! # Rules
//! - `get` on a broadcast segment collects the remaining subpath from every
//!   element and collapses to one value when all results are equal.
//! - `set` creates missing intermediate containers (sequence before a
//!   numeric segment, mapping otherwise) unless the value is empty.
//! - Setting an empty value deletes the field, then prunes containers
//!   along the written path that the delete left without members. Empty
//!   siblings stay where they are.
//! - A write pads a sequence by at most [`MAX_SEQUENCE_GROWTH`] slots.

use crate::node::{is_empty_value, Node};
use crate::path::{PathError, PropPath, Segment};
use std::sync::Arc;

/// Most `Null` placeholders a single write may append to a sequence
pub const MAX_SEQUENCE_GROWTH: usize = 1 << 16;

/// Read the value at `path`
///
/// Absent fields and explicit nulls both read as `None`.
#[must_use]
pub fn get(container: &Node, path: &PropPath) -> Option<Node> {
    get_segments(container, path.segments())
}

/// Write `value` at `path`
///
/// An empty value (absent, `""`, or a container of empties) deletes the
/// field instead and prunes emptied parents.
///
/// # Errors
/// Returns [`AccessError::InvalidContainer`] if a segment is applied to a
/// node of the wrong kind, or the walk descends into a scalar.
pub fn set(container: &mut Node, path: &PropPath, value: Option<Node>) -> Result<(), AccessError> {
    let empty = is_empty_value(value.as_ref());
    assign(container, path.segments(), value.as_ref(), empty)?;
    Ok(())
}

fn get_segments(container: &Node, segments: &[Segment]) -> Option<Node> {
    let (leaf, parents) = segments.split_last()?;
    let mut current = container;

    for (i, segment) in parents.iter().enumerate() {
        if *segment == Segment::All {
            return broadcast_get(current, &segments[i + 1..]);
        }
        current = child(current, segment)?;
        if !current.is_container() {
            return None;
        }
    }

    child(current, leaf)
        .filter(|value| !value.is_null())
        .cloned()
}

fn broadcast_get(current: &Node, rest: &[Segment]) -> Option<Node> {
    let items = current.as_seq()?;
    let results: Vec<Option<Node>> = items.iter().map(|item| get_segments(item, rest)).collect();

    let first = results.first()?;
    if results.iter().all(|r| r == first) {
        return first.clone();
    }
    Some(Node::Seq(
        results.into_iter().map(Option::unwrap_or_default).collect(),
    ))
}

fn child<'a>(node: &'a Node, segment: &Segment) -> Option<&'a Node> {
    match segment {
        Segment::Key(key) => node.as_map()?.get(key),
        Segment::Index(i) => node.as_seq()?.get(*i),
        Segment::All => None,
    }
}

fn child_mut<'a>(node: &'a mut Node, segment: &Segment) -> Option<&'a mut Node> {
    match segment {
        Segment::Key(key) => node.as_map_mut()?.get_mut(key),
        Segment::Index(i) => node.as_seq_mut()?.get_mut(*i),
        Segment::All => None,
    }
}

fn invalid(segment: &Segment, found: &Node) -> AccessError {
    AccessError::InvalidContainer {
        segment: segment.to_string(),
        found: found.kind(),
    }
}

fn scaffold_for(next: &Segment) -> Node {
    if next.is_numeric() {
        Node::empty_seq()
    } else {
        Node::empty_map()
    }
}

/// Returns true when this call removed the last member of `node`, so the
/// caller should remove `node` from its own level.
fn assign(
    node: &mut Node,
    segments: &[Segment],
    value: Option<&Node>,
    empty: bool,
) -> Result<bool, AccessError> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(false);
    };

    if rest.is_empty() {
        if empty {
            return Ok(remove_member(node, head));
        }
        put_child(node, head, value.cloned().unwrap_or_default())?;
        return Ok(false);
    }

    let fits = matches!(
        (head, &*node),
        (Segment::All | Segment::Index(_), Node::Seq(_)) | (Segment::Key(_), Node::Map(_))
    );
    if !fits {
        return Err(invalid(head, node));
    }

    if *head == Segment::All {
        return match node.as_seq_mut() {
            Some(items) => broadcast_set(items, rest, value),
            None => Ok(false),
        };
    }

    if child(node, head).map_or(true, Node::is_null) {
        // nothing to delete below a missing member
        if empty {
            return Ok(false);
        }
        put_child(node, head, scaffold_for(&rest[0]))?;
    }

    let next = child_mut(node, head).ok_or_else(|| invalid(head, &Node::Null))?;
    if !next.is_container() {
        return Err(invalid(&rest[0], next));
    }

    let drained = assign(next, rest, value, empty)?;
    Ok(drained && remove_member(node, head))
}

/// Fan `value` out over every element; returns true when no element is
/// left afterwards.
fn broadcast_set(
    items: &mut Vec<Node>,
    rest: &[Segment],
    value: Option<&Node>,
) -> Result<bool, AccessError> {
    if items.is_empty() {
        return Ok(is_empty_value(value));
    }

    let cycle = match value {
        Some(Node::Seq(values)) => Some(values.as_slice()),
        _ => None,
    };

    for (i, item) in items.iter_mut().enumerate() {
        let this = match cycle {
            Some([]) => None,
            Some(values) => Some(&values[i % values.len()]),
            None => value,
        };
        let empty = is_empty_value(this);

        if item.is_null() {
            if empty {
                continue;
            }
            *item = scaffold_for(&rest[0]);
        }
        if !item.is_container() {
            return Err(invalid(&Segment::All, item));
        }
        if assign(item, rest, this, empty)? {
            *item = Node::Null;
        }
    }

    trim_trailing_nulls(items);
    Ok(items.is_empty())
}

fn put_child(node: &mut Node, segment: &Segment, value: Node) -> Result<(), AccessError> {
    match (segment, node) {
        (Segment::Key(key), Node::Map(map)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (Segment::Index(i), Node::Seq(items)) => {
            if *i >= items.len() {
                if *i - items.len() > MAX_SEQUENCE_GROWTH {
                    return Err(AccessError::IndexTooFar {
                        index: *i,
                        len: items.len(),
                    });
                }
                items.resize(*i + 1, Node::Null);
            }
            items[*i] = value;
            Ok(())
        }
        (segment, node) => Err(invalid(segment, node)),
    }
}

/// Remove the member at `segment`; returns true when this removal left
/// `node` without members.
///
/// A removed sequence slot becomes a `Null` placeholder so later indices
/// stay aligned; trailing placeholders are then dropped. Siblings are
/// never touched.
fn remove_member(node: &mut Node, segment: &Segment) -> bool {
    match (segment, node) {
        (Segment::Key(key), Node::Map(map)) => map.shift_remove(key).is_some() && map.is_empty(),
        (Segment::Index(i), Node::Seq(items)) => {
            let Some(slot) = items.get_mut(*i) else {
                return false;
            };
            *slot = Node::Null;
            trim_trailing_nulls(items);
            items.is_empty()
        }
        _ => false,
    }
}

fn trim_trailing_nulls(items: &mut Vec<Node>) {
    while items.last().is_some_and(Node::is_null) {
        items.pop();
    }
}

/// Path bound to a caller-owned container
///
/// A view, never a copy: `set` mutates the container it was built over.
#[derive(Debug)]
pub struct NestedProperty<'a> {
    container: &'a mut Node,
    path: Arc<PropPath>,
}

impl<'a> NestedProperty<'a> {
    /// Parse `path` and bind it to `container`
    ///
    /// # Errors
    /// Returns [`AccessError::InvalidPath`] if the path string is malformed
    pub fn new(container: &'a mut Node, path: &str) -> Result<Self, AccessError> {
        Ok(Self::with_path(container, PropPath::parse(path)?))
    }

    /// Bind an already parsed path
    #[inline]
    #[must_use]
    pub fn with_path(container: &'a mut Node, path: impl Into<Arc<PropPath>>) -> Self {
        Self {
            container,
            path: path.into(),
        }
    }

    /// Bound path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &PropPath {
        &self.path
    }

    /// Underlying container
    #[inline]
    #[must_use]
    pub fn container(&self) -> &Node {
        self.container
    }

    /// Read the current value
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<Node> {
        get(self.container, &self.path)
    }

    /// Write a value
    ///
    /// # Errors
    /// See [`set`]
    #[inline]
    pub fn set(&mut self, value: impl Into<Node>) -> Result<(), AccessError> {
        set(self.container, &self.path, Some(value.into()))
    }

    /// Write a possibly absent value
    ///
    /// # Errors
    /// See [`set`]
    #[inline]
    pub fn set_value(&mut self, value: Option<Node>) -> Result<(), AccessError> {
        set(self.container, &self.path, value)
    }

    /// Delete the field and prune emptied parents
    ///
    /// # Errors
    /// See [`set`]
    #[inline]
    pub fn delete(&mut self) -> Result<(), AccessError> {
        set(self.container, &self.path, None)
    }
}

/// Errors from path access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Malformed path string
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    /// Segment applied to a node of the wrong kind
    #[error("cannot apply segment '{segment}' to a {found} node")]
    InvalidContainer {
        segment: String,
        found: &'static str,
    },

    /// Write would pad a sequence past [`MAX_SEQUENCE_GROWTH`] placeholders
    #[error("index {index} is too far past the end of a sequence of length {len}")]
    IndexTooFar { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Node::from(value)
    }

    fn path(s: &str) -> PropPath {
        PropPath::parse(s).unwrap()
    }

    #[test]
    fn get_plain_and_indexed() {
        let tree = node(json!({"a": {"b": [{"c": 1}, {"c": 2}]}}));
        assert_eq!(get(&tree, &path("a.b[1].c")), Some(Node::Int(2)));
        assert_eq!(get(&tree, &path("a.b[5].c")), None);
        assert_eq!(get(&tree, &path("a.x.c")), None);
    }

    #[test]
    fn get_null_reads_as_absent() {
        let tree = node(json!({"a": null, "b": {"c": null}}));
        assert_eq!(get(&tree, &path("a")), None);
        assert_eq!(get(&tree, &path("b.c")), None);
        assert_eq!(get(&tree, &path("a.c")), None);
    }

    #[test]
    fn get_index_against_mapping_is_absent() {
        let tree = node(json!({"a": {"0": {"c": 1}}}));
        assert_eq!(get(&tree, &path("a[0].c")), None);
    }

    #[test]
    fn get_descent_into_scalar_is_absent() {
        let tree = node(json!({"a": 5}));
        assert_eq!(get(&tree, &path("a.b")), None);
        assert_eq!(get(&Node::Int(3), &path("a")), None);
    }

    #[test]
    fn get_broadcast_collapses_equal_values() {
        let tree = node(json!({"a": [{"c": 4}, {"c": 4}]}));
        assert_eq!(get(&tree, &path("a[-1].c")), Some(Node::Int(4)));
    }

    #[test]
    fn get_broadcast_returns_sequence_when_values_differ() {
        let tree = node(json!({"a": [{"c": 1}, {}, {"c": 3}]}));
        assert_eq!(
            get(&tree, &path("a[-1].c")),
            Some(node(json!([1, null, 3])))
        );
    }

    #[test]
    fn get_broadcast_over_empty_or_non_sequence() {
        assert_eq!(get(&node(json!({"a": []})), &path("a[-1].c")), None);
        assert_eq!(get(&node(json!({"a": {"c": 1}})), &path("a[-1].c")), None);
    }

    #[test]
    fn set_creates_mappings_and_sequences() {
        let mut tree = Node::empty_map();
        set(&mut tree, &path("a.b[2].c"), Some(Node::Int(7))).unwrap();
        assert_eq!(tree, node(json!({"a": {"b": [null, null, {"c": 7}]}})));
    }

    #[test]
    fn set_overwrites_existing() {
        let mut tree = node(json!({"a": {"b": 1, "c": 2}}));
        set(&mut tree, &path("a.b"), Some(Node::from("x"))).unwrap();
        assert_eq!(tree, node(json!({"a": {"b": "x", "c": 2}})));
    }

    #[test]
    fn set_broadcast_scalar() {
        let mut tree = node(json!({"a": {"b": [{"c": 1}, {"c": 2}]}}));
        set(&mut tree, &path("a.b[-1].c"), Some(Node::Int(9))).unwrap();
        assert_eq!(tree, node(json!({"a": {"b": [{"c": 9}, {"c": 9}]}})));
    }

    #[test]
    fn set_broadcast_sequence_wraps() {
        let mut tree = node(json!({"a": [{}, {}, {}, {}, {}]}));
        set(&mut tree, &path("a[-1].v"), Some(node(json!([1, 2])))).unwrap();
        assert_eq!(
            tree,
            node(json!({"a": [{"v": 1}, {"v": 2}, {"v": 1}, {"v": 2}, {"v": 1}]}))
        );
    }

    #[test]
    fn set_broadcast_fills_null_elements() {
        let mut tree = node(json!({"a": [null, {"v": 0}]}));
        set(&mut tree, &path("a[-1].v"), Some(Node::Int(5))).unwrap();
        assert_eq!(tree, node(json!({"a": [{"v": 5}, {"v": 5}]})));
    }

    #[test]
    fn set_broadcast_empty_deletes_and_prunes() {
        let mut tree = node(json!({"keep": 1, "a": {"b": [{"c": 1}, {"c": 2}]}}));
        set(&mut tree, &path("a.b[-1].c"), None).unwrap();
        assert_eq!(tree, node(json!({"keep": 1})));
    }

    #[test]
    fn set_broadcast_partial_delete_keeps_siblings() {
        let mut tree = node(json!({"a": [{"c": 1, "d": 1}, {"c": 2}]}));
        set(&mut tree, &path("a[-1].c"), Some(node(json!(["", 5])))).unwrap();
        assert_eq!(tree, node(json!({"a": [{"d": 1}, {"c": 5}]})));
    }

    #[test]
    fn set_broadcast_at_root() {
        let mut tree = node(json!([{"x": 1}, {"x": 2}]));
        set(&mut tree, &path("[-1].x"), Some(Node::Int(0))).unwrap();
        assert_eq!(tree, node(json!([{"x": 0}, {"x": 0}])));
        assert_eq!(get(&tree, &path("[-1].x")), Some(Node::Int(0)));
    }

    #[test]
    fn set_empty_value_deletes_and_prunes_to_root() {
        let mut tree = node(json!({"a": {"b": {"c": 1}}, "d": 2}));
        set(&mut tree, &path("a.b.c"), Some(Node::from(""))).unwrap();
        assert_eq!(tree, node(json!({"d": 2})));
    }

    #[test]
    fn set_empty_value_stops_pruning_at_non_empty_level() {
        let mut tree = node(json!({"a": {"b": {"c": 1}, "e": 3}}));
        set(&mut tree, &path("a.b.c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": {"e": 3}})));
    }

    #[test]
    fn set_empty_value_creates_no_scaffolding() {
        let mut tree = node(json!({"z": 1}));
        set(&mut tree, &path("a.b[3].c"), None).unwrap();
        assert_eq!(tree, node(json!({"z": 1})));
    }

    #[test]
    fn set_empty_container_value_deletes() {
        let mut tree = node(json!({"a": {"b": 1}}));
        set(&mut tree, &path("a.b"), Some(node(json!({"x": [], "y": ""})))).unwrap();
        assert_eq!(tree, Node::empty_map());
    }

    #[test]
    fn set_non_empty_falsy_values_are_stored() {
        let mut tree = Node::empty_map();
        set(&mut tree, &path("f"), Some(Node::Bool(false))).unwrap();
        set(&mut tree, &path("z"), Some(Node::Int(0))).unwrap();
        set(&mut tree, &path("n"), Some(Node::Float(f64::NAN))).unwrap();
        let map = tree.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["f"], Node::Bool(false));
    }

    #[test]
    fn delete_trims_trailing_sequence_slots_only() {
        let mut tree = node(json!({"a": [{"c": 1}, {"c": 2}, {"c": 3}]}));
        set(&mut tree, &path("a[2].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": [{"c": 1}, {"c": 2}]})));

        set(&mut tree, &path("a[0].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": [null, {"c": 2}]})));
    }

    #[test]
    fn delete_interior_slot_leaves_placeholder() {
        let mut tree = node(json!({"a": [{"c": 1}, {"c": 2}, {"c": 3}]}));
        set(&mut tree, &path("a[1].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": [{"c": 1}, null, {"c": 3}]})));

        set(&mut tree, &path("a[2].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": [{"c": 1}]})));
    }

    #[test]
    fn delete_direct_sequence_element() {
        let mut tree = node(json!({"a": [1, 2, 3]}));
        set(&mut tree, &path("a[1]"), None).unwrap();
        assert_eq!(tree, node(json!({"a": [1, null, 3]})));
    }

    #[test]
    fn delete_leaves_empty_siblings_alone() {
        let mut tree = node(json!({"a": {"s": "", "n": null, "b": 1}, "keep": 1}));
        set(&mut tree, &path("a.b"), None).unwrap();
        assert_eq!(tree, node(json!({"a": {"s": "", "n": null}, "keep": 1})));
    }

    #[test]
    fn round_trip_of_missing_field_keeps_empty_sibling() {
        let mut tree = node(json!({"a": {"s": ""}, "keep": 1}));
        let p = path("a.x");
        let current = get(&tree, &p);
        set(&mut tree, &p, current).unwrap();

        assert_eq!(tree, node(json!({"a": {"s": ""}, "keep": 1})));
        assert_eq!(get(&tree, &path("a.s")), Some(Node::from("")));
    }

    #[test]
    fn delete_missing_field_keeps_empty_parent() {
        let mut tree = node(json!({"a": {}, "keep": 1}));
        set(&mut tree, &path("a.x"), None).unwrap();
        assert_eq!(tree, node(json!({"a": {}, "keep": 1})));
    }

    #[test]
    fn delete_in_sequence_keeps_empty_string_siblings() {
        let mut tree = node(json!({"a": ["", "x", {"c": 1}]}));
        set(&mut tree, &path("a[2].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": ["", "x"]})));

        let mut tree = node(json!({"a": ["", {"c": 1}, "y"]}));
        set(&mut tree, &path("a[1].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": ["", null, "y"]})));
    }

    #[test]
    fn broadcast_delete_keeps_partially_filled_elements() {
        let mut tree = node(json!({"a": [{"c": 1, "s": ""}, {"c": 2}]}));
        set(&mut tree, &path("a[-1].c"), None).unwrap();
        assert_eq!(tree, node(json!({"a": [{"s": ""}]})));
    }

    #[test]
    fn huge_index_is_rejected_without_allocating() {
        let mut tree = Node::empty_map();
        let err = set(&mut tree, &path("a[9223372036854775807]"), Some(Node::Int(1))).unwrap_err();
        assert!(matches!(err, AccessError::IndexTooFar { len: 0, .. }));
        assert_eq!(tree, node(json!({"a": []})));
    }

    #[test]
    fn index_within_growth_limit_is_padded() {
        let mut tree = Node::empty_map();
        let p = path(&format!("a[{MAX_SEQUENCE_GROWTH}]"));
        set(&mut tree, &p, Some(Node::Int(1))).unwrap();
        assert_eq!(tree.get_key("a").and_then(Node::as_seq).map(<[Node]>::len), Some(MAX_SEQUENCE_GROWTH + 1));
    }

    #[test]
    fn index_against_mapping_is_invalid_container() {
        let mut tree = node(json!({"a": {"b": 1}}));
        let err = set(&mut tree, &path("a[0].b"), Some(Node::Int(1))).unwrap_err();
        assert!(matches!(err, AccessError::InvalidContainer { .. }));
    }

    #[test]
    fn descent_into_scalar_is_invalid_container() {
        let mut tree = node(json!({"a": 5}));
        let err = set(&mut tree, &path("a.b"), Some(Node::Int(1))).unwrap_err();
        assert_eq!(
            err,
            AccessError::InvalidContainer {
                segment: "b".to_string(),
                found: "number"
            }
        );
    }

    #[test]
    fn scalar_root_is_invalid_container() {
        let mut root = Node::Int(1);
        assert!(set(&mut root, &path("a"), Some(Node::Int(2))).is_err());
    }

    #[test]
    fn nested_property_view_mutates_in_place() {
        let mut tree = node(json!({"xaxis": {"range": [0, 1]}}));
        {
            let mut prop = NestedProperty::new(&mut tree, "xaxis.range[1]").unwrap();
            assert_eq!(prop.get(), Some(Node::Int(1)));
            prop.set(10).unwrap();
            assert_eq!(prop.path().as_str(), "xaxis.range[1]");
        }
        assert_eq!(tree, node(json!({"xaxis": {"range": [0, 10]}})));

        let mut prop = NestedProperty::new(&mut tree, "xaxis.range").unwrap();
        prop.delete().unwrap();
        assert_eq!(prop.container(), &Node::empty_map());
    }

    #[test]
    fn nested_property_rejects_bad_path() {
        let mut tree = Node::empty_map();
        assert!(matches!(
            NestedProperty::new(&mut tree, "arr[-1]"),
            Err(AccessError::InvalidPath(PathError::BroadcastLeaf(_)))
        ));
    }
}
