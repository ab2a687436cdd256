//! Composite font validator

use super::Validator;
use crate::engine::Coercer;
use crate::error::CoerceError;
use crate::schema::{Schema, SchemaLeaf};
use attrkit_path::Node;
use once_cell::sync::Lazy;

static FONT_ATTRS: Lazy<Schema> = Lazy::new(|| {
    Schema::group([
        ("family", SchemaLeaf::new("string").no_blank().into()),
        ("size", SchemaLeaf::new("number").with_min(1.0).into()),
        ("color", SchemaLeaf::new("color").into()),
    ])
});

/// `font`: record of `family`, `size` and `color`
///
/// Each member is coerced against the matching member of the default.
/// Non-record input counts as an empty record.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontValidator;

impl Validator for FontValidator {
    fn type_tag(&self) -> &'static str {
        "font"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        let empty = Node::empty_map();
        let input = match raw {
            Some(record @ Node::Map(_)) => record,
            _ => &empty,
        };

        let mut font = Node::empty_map();
        for member in ["family", "size", "color"] {
            let member_dflt = dflt.and_then(|d| d.get_key(member)).cloned();
            coercer.coerce(input, &mut font, &FONT_ATTRS, member, member_dflt)?;
        }
        Ok(Some(font))
    }
}
