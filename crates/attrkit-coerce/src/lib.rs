//! attrkit coercion layer
//!
//! Normalizes untrusted attribute trees against declarative schemas.
//! Malformed end-user values never raise errors; they fall back to schema
//! defaults so the output tree is always valid. Errors are reserved for
//! authoring bugs: malformed paths, unknown attributes, unregistered types.
//!
//! # Core Concepts
//!
//! - [`Schema`] / [`SchemaLeaf`]: Attribute descriptors, loaded from JSON or YAML
//! - [`Validator`]: One normalization rule per type tag
//! - [`ValidatorRegistry`]: Tag to validator dispatch, see [`default_validators`]
//! - [`Coercer`]: Reads input, validates, writes output
//! - [`none_or_all`] / [`merge_array`]: Rules across attribute clusters
//!
//! # Example
//!
//! ```rust
//! use attrkit_coerce::{Coercer, Schema};
//! use attrkit_path::Node;
//! use serde_json::json;
//!
//! let schema = Schema::from_yaml(
//!     "opacity: { type: number, min: 0, max: 1, dflt: 0.8 }\n\
//!      mode: { type: flaglist, flags: [lines, markers], dflt: markers }\n",
//! )
//! .unwrap();
//!
//! let input = Node::from(json!({"opacity": 5, "mode": "lines+bogus+lines"}));
//! let mut output = Node::empty_map();
//!
//! let coercer = Coercer::new();
//! let mut attrs = coercer.bind(&input, &mut output, &schema);
//! attrs.coerce("opacity").unwrap();
//! attrs.coerce("mode").unwrap();
//!
//! assert_eq!(output, Node::from(json!({"opacity": 0.8, "mode": "lines"})));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod colors;
mod config;
mod engine;
mod error;
mod groups;
mod schema;
pub mod validators;

// Re-exports
pub use colors::{is_valid_color, BuiltinColorscales, ColorscaleResolver};
pub use config::CoercerConfig;
pub use engine::{BoundCoercer, Coercer};
pub use error::{CoerceError, SchemaError};
pub use groups::{merge_array, none_or_all};
pub use schema::{Schema, SchemaLeaf};
pub use validators::{default_validators, Validator, ValidatorRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
