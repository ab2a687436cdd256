//! Numeric validators

use super::Validator;
use crate::engine::Coercer;
use crate::error::CoerceError;
use crate::schema::SchemaLeaf;
use attrkit_path::Node;

/// Literal accepted verbatim by `angle`
pub const AUTO: &str = "auto";

fn within_bounds(value: f64, leaf: &SchemaLeaf) -> bool {
    leaf.min.map_or(true, |min| value >= min) && leaf.max.map_or(true, |max| value <= max)
}

/// `number`: numeric value within optional inclusive bounds
///
/// Numeric strings are accepted and stored as numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValidator;

impl Validator for NumberValidator {
    fn type_tag(&self) -> &'static str {
        "number"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw.and_then(Node::numeric_value) {
            Some(value) if within_bounds(value, leaf) => Some(Node::Float(value)),
            _ => dflt.cloned(),
        })
    }
}

/// `integer`: like `number` with a zero fractional part
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

impl Validator for IntegerValidator {
    fn type_tag(&self) -> &'static str {
        "integer"
    }

    #[allow(clippy::cast_possible_truncation)]
    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw.and_then(Node::numeric_value) {
            Some(value)
                if value.fract() == 0.0
                    && fits_i64(value)
                    && within_bounds(value, leaf) =>
            {
                Some(Node::Int(value as i64))
            }
            _ => dflt.cloned(),
        })
    }
}

// i64::MAX as f64 rounds up to 2^63, which is already out of range
#[allow(clippy::cast_precision_loss)]
fn fits_i64(value: f64) -> bool {
    (i64::MIN as f64..i64::MAX as f64).contains(&value)
}

/// `angle`: degrees folded into `(-180, 180]`, or the literal `"auto"`
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleValidator;

impl Validator for AngleValidator {
    fn type_tag(&self) -> &'static str {
        "angle"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        if raw.and_then(Node::as_str) == Some(AUTO) {
            return Ok(Some(Node::from(AUTO)));
        }
        Ok(match raw.and_then(Node::numeric_value) {
            Some(value) => Some(Node::Float(normalize_angle(value))),
            None => dflt.cloned(),
        })
    }
}

/// Fold degrees into `(-180, 180]`
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    let mut folded = degrees;
    if folded.abs() > 180.0 {
        folded -= (folded / 360.0).round() * 360.0;
    }
    // rounding in the division can land just outside the range
    if folded > 180.0 {
        folded -= 360.0;
    } else if folded <= -180.0 {
        folded += 360.0;
    }
    folded
}
