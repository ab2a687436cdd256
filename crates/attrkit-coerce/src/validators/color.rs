//! Color validators

use super::Validator;
use crate::colors::{is_valid_color, BuiltinColorscales, ColorscaleResolver};
use crate::engine::Coercer;
use crate::error::CoerceError;
use crate::schema::SchemaLeaf;
use attrkit_path::Node;

/// `color`: a string in accepted color syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorValidator;

impl Validator for ColorValidator {
    fn type_tag(&self) -> &'static str {
        "color"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw {
            Some(value @ Node::Str(s)) if is_valid_color(s) => Some(value.clone()),
            _ => dflt.cloned(),
        })
    }
}

/// `colorscale`: delegates to a [`ColorscaleResolver`]
pub struct ColorscaleValidator {
    resolver: Box<dyn ColorscaleResolver>,
}

impl ColorscaleValidator {
    /// Create with a custom resolver
    #[must_use]
    pub fn new(resolver: impl ColorscaleResolver) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }
}

impl Default for ColorscaleValidator {
    fn default() -> Self {
        Self::new(BuiltinColorscales)
    }
}

impl std::fmt::Debug for ColorscaleValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorscaleValidator").finish_non_exhaustive()
    }
}

impl Validator for ColorscaleValidator {
    fn type_tag(&self) -> &'static str {
        "colorscale"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(Some(self.resolver.resolve(raw, dflt)))
    }
}
