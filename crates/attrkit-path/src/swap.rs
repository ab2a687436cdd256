//! Swapping paired attributes
//!
//! A template such as `"?axis.range"` names two concrete paths, one per
//! substituted token; their current values are exchanged.

use crate::accessor::{get, set, AccessError};
use crate::node::Node;
use crate::path::PropPath;

/// Placeholder replaced by the two tokens
pub const PLACEHOLDER: char = '?';

/// Swap the `x` and `y` variants of `template`
///
/// # Errors
/// Returns [`AccessError`] if either resolved path is malformed or cannot
/// be written
#[inline]
pub fn swap_attrs(container: &mut Node, template: &str) -> Result<(), AccessError> {
    swap_attrs_with(container, template, "x", "y")
}

/// Swap the values at `template` with the placeholder replaced by `first`
/// and by `second`
///
/// Only the first placeholder is substituted. Either both values move or,
/// on error, neither does.
///
/// # Errors
/// Returns [`AccessError`] if either resolved path is malformed or cannot
/// be written
pub fn swap_attrs_with(
    container: &mut Node,
    template: &str,
    first: &str,
    second: &str,
) -> Result<(), AccessError> {
    let first = PropPath::parse(&resolve(template, first))?;
    let second = PropPath::parse(&resolve(template, second))?;

    let first_value = get(container, &first);
    let second_value = get(container, &second);

    // write both sides into a scratch copy so a failed write leaves
    // `container` untouched
    let mut swapped = container.clone();
    set(&mut swapped, &first, second_value)?;
    set(&mut swapped, &second, first_value)?;
    *container = swapped;
    Ok(())
}

/// Apply [`swap_attrs`] to every template in order
///
/// # Errors
/// Stops at the first template that fails
pub fn swap_xy_attrs(container: &mut Node, templates: &[&str]) -> Result<(), AccessError> {
    templates
        .iter()
        .try_for_each(|template| swap_attrs(container, template))
}

fn resolve(template: &str, token: &str) -> String {
    template.replacen(PLACEHOLDER, token, 1)
}
