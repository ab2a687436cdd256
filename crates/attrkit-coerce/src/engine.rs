//! Coercion engine
//!
//! [`Coercer`] resolves a path against a schema, reads the raw value from
//! the input tree, runs the leaf's validator and writes the result into
//! the output tree.

use crate::config::CoercerConfig;
use crate::error::CoerceError;
use crate::schema::Schema;
use crate::validators::{default_validators, ValidatorRegistry};
use attrkit_path::{get, set, Node, PathCache};

/// Schema-driven coercion of attribute trees
///
/// Holds the validator registry and a cache of parsed paths; reusable
/// across any number of input/output pairs.
#[derive(Debug)]
pub struct Coercer {
    registry: ValidatorRegistry,
    paths: PathCache,
    config: CoercerConfig,
}

impl Default for Coercer {
    fn default() -> Self {
        Self::new()
    }
}

impl Coercer {
    /// Create coercer with built-in validators
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CoercerConfig::default())
    }

    /// Create coercer with built-in validators and custom configuration
    #[must_use]
    pub fn with_config(config: CoercerConfig) -> Self {
        Self::with_registry(default_validators(), config)
    }

    /// Create coercer with a custom registry
    #[must_use]
    pub fn with_registry(registry: ValidatorRegistry, config: CoercerConfig) -> Self {
        tracing::debug!(
            type_tags = registry.len(),
            path_cache_capacity = config.path_cache_capacity,
            "Creating coercer"
        );
        Self {
            paths: PathCache::new(config.path_cache_capacity),
            registry,
            config,
        }
    }

    /// Validator registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Parsed path cache
    #[inline]
    #[must_use]
    pub fn paths(&self) -> &PathCache {
        &self.paths
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CoercerConfig {
        &self.config
    }

    /// Verify that every leaf in a schema names a registered type
    ///
    /// # Errors
    /// Returns [`CoerceError::UnknownType`] for the first unknown tag
    pub fn check_schema(&self, schema: &Schema) -> Result<(), CoerceError> {
        for (at, leaf) in schema.leaves() {
            if !self.registry.contains(&leaf.val_type) {
                tracing::warn!(attr = %at, type_tag = %leaf.val_type, "Unknown type tag");
                return Err(CoerceError::UnknownType(leaf.val_type.clone()));
            }
        }
        Ok(())
    }

    /// Coerce one attribute from `input` into `output`
    ///
    /// `dflt` overrides the schema leaf's default. Returns the value now
    /// stored at the path in `output`.
    ///
    /// # Errors
    /// Returns error if the path is malformed, has no schema leaf, names an
    /// unregistered type, or the write hits a non-container in `output`
    pub fn coerce(
        &self,
        input: &Node,
        output: &mut Node,
        schema: &Schema,
        attr: &str,
        dflt: Option<Node>,
    ) -> Result<Option<Node>, CoerceError> {
        let path = self.paths.parse(attr)?;
        let leaf = schema
            .leaf(&path)
            .ok_or_else(|| CoerceError::UnknownAttribute(attr.to_string()))?;
        let validator = self
            .registry
            .get(&leaf.val_type)
            .ok_or_else(|| CoerceError::UnknownType(leaf.val_type.clone()))?;

        let raw = get(input, &path);
        let dflt = dflt.or_else(|| leaf.dflt.clone());

        if leaf.array_ok && matches!(raw, Some(Node::Seq(_))) {
            set(output, &path, raw)?;
            return Ok(get(output, &path));
        }

        let value = validator.validate(raw.as_ref(), dflt.as_ref(), leaf, self)?;
        if raw.is_some() && value != raw {
            tracing::debug!(
                attr,
                type_tag = validator.type_tag(),
                "Input replaced during coercion"
            );
        }

        set(output, &path, value)?;
        Ok(get(output, &path))
    }

    /// Bind input, output and schema for repeated coercion
    #[inline]
    #[must_use]
    pub fn bind<'a>(
        &'a self,
        input: &'a Node,
        output: &'a mut Node,
        schema: &'a Schema,
    ) -> BoundCoercer<'a> {
        BoundCoercer {
            coercer: self,
            input,
            output,
            schema,
        }
    }
}

/// A [`Coercer`] bound to one input/output pair and schema
#[derive(Debug)]
pub struct BoundCoercer<'a> {
    coercer: &'a Coercer,
    input: &'a Node,
    output: &'a mut Node,
    schema: &'a Schema,
}

impl BoundCoercer<'_> {
    /// Coerce using the schema default
    ///
    /// # Errors
    /// See [`Coercer::coerce`]
    pub fn coerce(&mut self, attr: &str) -> Result<Option<Node>, CoerceError> {
        self.coercer
            .coerce(self.input, self.output, self.schema, attr, None)
    }

    /// Coerce with a default overriding the schema's
    ///
    /// # Errors
    /// See [`Coercer::coerce`]
    pub fn coerce_or(
        &mut self,
        attr: &str,
        dflt: impl Into<Node>,
    ) -> Result<Option<Node>, CoerceError> {
        self.coercer
            .coerce(self.input, self.output, self.schema, attr, Some(dflt.into()))
    }

    /// Input tree
    #[inline]
    #[must_use]
    pub fn input(&self) -> &Node {
        self.input
    }

    /// Output tree as built so far
    #[inline]
    #[must_use]
    pub fn output(&self) -> &Node {
        self.output
    }
}
