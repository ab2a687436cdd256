//! Type validators
//!
//! Each validator owns one schema type tag. Given the raw input value (if
//! any), the effective default and the leaf descriptor it returns the value
//! to store, or `None` to leave the attribute absent. Unusable input falls
//! back to the default rather than failing.

use crate::engine::Coercer;
use crate::error::CoerceError;
use crate::schema::SchemaLeaf;
use attrkit_path::Node;
use std::collections::HashMap;

mod basic;
mod color;
mod font;
mod numeric;
mod text;

pub use basic::{AnyValidator, BooleanValidator, DataArrayValidator, EnumeratedValidator};
pub use color::{ColorValidator, ColorscaleValidator};
pub use font::FontValidator;
pub use numeric::{normalize_angle, AngleValidator, IntegerValidator, NumberValidator, AUTO};
pub use text::{
    AxisIdValidator, FlaglistValidator, SceneIdValidator, StringValidator, FLAG_SEPARATOR,
    SCENE_PREFIX,
};

/// Validator for one schema type tag
///
/// Implement this trait to add support for new attribute types.
pub trait Validator: Send + Sync + 'static {
    /// Schema type tag this validator handles
    fn type_tag(&self) -> &'static str;

    /// Compute the value to store
    ///
    /// `coercer` is available for validators that coerce nested
    /// sub-attributes.
    ///
    /// # Errors
    /// Only nested coercion may fail; malformed input yields the default.
    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        leaf: &SchemaLeaf,
        coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError>;
}

/// Validators keyed by type tag
pub struct ValidatorRegistry {
    validators: HashMap<&'static str, Box<dyn Validator>>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("type_tags", &self.type_tags())
            .finish()
    }
}

impl ValidatorRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Register a validator, replacing any previous one for its tag
    pub fn register<V: Validator>(&mut self, validator: V) -> Option<Box<dyn Validator>> {
        self.validators.insert(validator.type_tag(), Box::new(validator))
    }

    /// Find validator for a type tag
    #[must_use]
    pub fn get(&self, type_tag: &str) -> Option<&dyn Validator> {
        self.validators.get(type_tag).map(|v| &**v)
    }

    /// Check if a type tag is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, type_tag: &str) -> bool {
        self.validators.contains_key(type_tag)
    }

    /// Registered type tags, sorted
    #[must_use]
    pub fn type_tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.validators.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered validators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if no validators are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Create registry with the built-in validators
#[must_use]
pub fn default_validators() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();

    // Pass-through and membership
    registry.register(DataArrayValidator);
    registry.register(EnumeratedValidator);
    registry.register(BooleanValidator);
    registry.register(AnyValidator);

    // Numeric
    registry.register(NumberValidator);
    registry.register(IntegerValidator);
    registry.register(AngleValidator);

    // Text
    registry.register(StringValidator);
    registry.register(FlaglistValidator);
    registry.register(AxisIdValidator);
    registry.register(SceneIdValidator);

    // Visual
    registry.register(ColorValidator);
    registry.register(ColorscaleValidator::default());
    registry.register(FontValidator);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shout;

    impl Validator for Shout {
        fn type_tag(&self) -> &'static str {
            "string"
        }

        fn validate(
            &self,
            raw: Option<&Node>,
            dflt: Option<&Node>,
            _leaf: &SchemaLeaf,
            _coercer: &Coercer,
        ) -> Result<Option<Node>, CoerceError> {
            Ok(raw
                .and_then(Node::as_str)
                .map(|s| Node::from(s.to_uppercase()))
                .or_else(|| dflt.cloned()))
        }
    }

    #[test]
    fn default_registry_covers_builtin_tags() {
        let registry = default_validators();
        assert_eq!(
            registry.type_tags(),
            vec![
                "angle",
                "any",
                "axisid",
                "boolean",
                "color",
                "colorscale",
                "data_array",
                "enumerated",
                "flaglist",
                "font",
                "integer",
                "number",
                "sceneid",
                "string",
            ]
        );
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn register_replaces_existing_tag() {
        let mut registry = default_validators();
        let previous = registry.register(Shout);
        assert_eq!(previous.map(|v| v.type_tag()), Some("string"));
        assert_eq!(registry.len(), 14);

        let coercer = Coercer::new();
        let out = registry
            .get("string")
            .unwrap()
            .validate(Some(&Node::from("hi")), None, &SchemaLeaf::new("string"), &coercer)
            .unwrap();
        assert_eq!(out, Some(Node::from("HI")));
    }

    #[test]
    fn empty_registry() {
        let registry = ValidatorRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("number"));
        assert!(registry.get("number").is_none());
    }
}
