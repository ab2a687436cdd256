//! attrkit path layer
//!
//! Tagged attribute trees and a small addressing language over them.
//!
//! # Core Concepts
//!
//! - [`Node`]: Mapping / sequence / scalar tree node
//! - [`PropPath`]: Parsed path such as `marker.line[-1].width`
//! - [`Segment`]: `Key`, `Index` or `All` (the `[-1]` broadcast)
//! - [`get`] / [`set`]: Read and write with broadcast, scaffolding and pruning
//! - [`NestedProperty`]: A path bound to a caller-owned container
//! - [`PathCache`]: Memoized parsing of repeated literal paths
//!
//! # Example
//!
//! ```rust
//! use attrkit_path::{NestedProperty, Node};
//! use serde_json::json;
//!
//! let mut tree = Node::from(json!({"a": {"b": [{"c": 1}, {"c": 2}]}}));
//! let mut prop = NestedProperty::new(&mut tree, "a.b[-1].c").unwrap();
//! prop.set(9).unwrap();
//! assert_eq!(prop.get(), Some(Node::Int(9)));
//! assert_eq!(tree, Node::from(json!({"a": {"b": [{"c": 9}, {"c": 9}]}})));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod accessor;
mod cache;
mod node;
mod path;
mod swap;

// Re-exports
pub use accessor::{get, set, AccessError, NestedProperty, MAX_SEQUENCE_GROWTH};
pub use cache::PathCache;
pub use node::{is_empty_value, Mapping, Node};
pub use path::{PathError, PropPath, Segment, BROADCAST_INDEX, BROADCAST_SUFFIX};
pub use swap::{swap_attrs, swap_attrs_with, swap_xy_attrs, PLACEHOLDER};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cached_path_drives_accessor() {
        let cache = PathCache::default();
        let path = cache.parse("shapes[1].line.width").unwrap();

        let mut tree = Node::from(json!({"shapes": [{}, {"line": {"width": 1}}]}));
        assert_eq!(get(&tree, &path), Some(Node::Int(1)));

        set(&mut tree, &path, Some(Node::Float(2.5))).unwrap();
        assert_eq!(get(&tree, &path), Some(Node::Float(2.5)));

        set(&mut tree, &path, None).unwrap();
        assert_eq!(tree, Node::from(json!({})));
    }

    #[test]
    fn nested_property_with_cached_path() {
        let cache = PathCache::default();
        let mut tree = Node::empty_map();
        let mut prop = NestedProperty::with_path(&mut tree, cache.parse("font.size").unwrap());
        prop.set(12).unwrap();
        assert_eq!(tree, Node::from(json!({"font": {"size": 12}})));
    }
}
