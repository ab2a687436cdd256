//! Pass-through and membership validators

use super::Validator;
use crate::engine::Coercer;
use crate::error::CoerceError;
use crate::schema::SchemaLeaf;
use attrkit_path::Node;

/// `data_array`: any sequence, stored as is
#[derive(Debug, Clone, Copy, Default)]
pub struct DataArrayValidator;

impl Validator for DataArrayValidator {
    fn type_tag(&self) -> &'static str {
        "data_array"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw {
            Some(seq @ Node::Seq(_)) => Some(seq.clone()),
            _ => dflt.cloned(),
        })
    }
}

/// `enumerated`: one of the leaf's allowed values
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumeratedValidator;

impl Validator for EnumeratedValidator {
    fn type_tag(&self) -> &'static str {
        "enumerated"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw {
            Some(value) if leaf.values.contains(value) => Some(value.clone()),
            _ => dflt.cloned(),
        })
    }
}

/// `boolean`: strictly `true` or `false`
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl Validator for BooleanValidator {
    fn type_tag(&self) -> &'static str {
        "boolean"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw {
            Some(b @ Node::Bool(_)) => Some(b.clone()),
            _ => dflt.cloned(),
        })
    }
}

/// `any`: whatever was supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyValidator;

impl Validator for AnyValidator {
    fn type_tag(&self) -> &'static str {
        "any"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(raw.or(dflt).cloned())
    }
}
