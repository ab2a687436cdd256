//! Text validators

use super::Validator;
use crate::engine::Coercer;
use crate::error::CoerceError;
use crate::schema::SchemaLeaf;
use attrkit_path::Node;

/// Fixed prefix of scene identifiers
pub const SCENE_PREFIX: &str = "scene";

/// Separator between flags in a flaglist value
pub const FLAG_SEPARATOR: &str = "+";

/// `string`: any scalar, rendered as text
///
/// Containers fall back to the default. With `noBlank`, whitespace-only
/// text does too.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Validator for StringValidator {
    fn type_tag(&self) -> &'static str {
        "string"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw.and_then(Node::to_text) {
            Some(text) if !(leaf.no_blank && text.trim().is_empty()) => Some(Node::Str(text)),
            _ => dflt.cloned(),
        })
    }
}

/// `flaglist`: `+`-joined subset of the leaf's flags, or one extra verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct FlaglistValidator;

impl Validator for FlaglistValidator {
    fn type_tag(&self) -> &'static str {
        "flaglist"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        let Some(text) = raw.and_then(Node::as_str) else {
            return Ok(dflt.cloned());
        };
        if leaf.extras.iter().any(|extra| extra == text) {
            return Ok(Some(Node::from(text)));
        }

        let mut kept: Vec<&str> = Vec::new();
        for flag in text.split(FLAG_SEPARATOR) {
            if leaf.flags.iter().any(|known| known == flag) && !kept.contains(&flag) {
                kept.push(flag);
            }
        }

        if kept.is_empty() {
            return Ok(dflt.cloned());
        }
        Ok(Some(Node::Str(kept.join(FLAG_SEPARATOR))))
    }
}

fn has_numbered_suffix(text: &str, prefix: &str) -> bool {
    text.strip_prefix(prefix).is_some_and(|suffix| {
        !suffix.is_empty()
            && suffix.bytes().all(|b| b.is_ascii_digit())
            && suffix.parse::<u64>().map_or(true, |n| n > 1)
    })
}

/// `axisid`: the default's first character, optionally followed by an
/// integer greater than 1 (`x`, `x2`, `y13`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisIdValidator;

impl Validator for AxisIdValidator {
    fn type_tag(&self) -> &'static str {
        "axisid"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        let prefix: String = dflt
            .and_then(Node::as_str)
            .map(|d| d.chars().take(1).collect())
            .unwrap_or_default();

        Ok(match raw.and_then(Node::as_str) {
            Some(text) if !prefix.is_empty() && (text == prefix || has_numbered_suffix(text, &prefix)) => {
                Some(Node::from(text))
            }
            _ => dflt.cloned(),
        })
    }
}

/// `sceneid`: `scene`, optionally followed by an integer greater than 1
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneIdValidator;

impl Validator for SceneIdValidator {
    fn type_tag(&self) -> &'static str {
        "sceneid"
    }

    fn validate(
        &self,
        raw: Option<&Node>,
        dflt: Option<&Node>,
        _leaf: &SchemaLeaf,
        _coercer: &Coercer,
    ) -> Result<Option<Node>, CoerceError> {
        Ok(match raw.and_then(Node::as_str) {
            Some(text) if text == SCENE_PREFIX || has_numbered_suffix(text, SCENE_PREFIX) => {
                Some(Node::from(text))
            }
            _ => dflt.cloned(),
        })
    }
}
