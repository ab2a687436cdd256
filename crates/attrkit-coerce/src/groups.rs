//! Consistency rules across attribute clusters

use attrkit_path::{Mapping, Node};

/// Enforce all-or-nothing presence for a cluster of members
///
/// If `input` has some but not all of `names`, each missing member is
/// copied from its already-coerced value in `output`. A member is present
/// when it is neither absent nor null. No-op when `input` is not a mapping.
pub fn none_or_all(input: &mut Node, output: &Node, names: &[&str]) {
    let Some(members) = input.as_map_mut() else {
        return;
    };

    let found = names.iter().filter(|name| is_present(members, name)).count();
    if found == 0 || found == names.len() {
        return;
    }

    for name in names {
        if is_present(members, name) {
            continue;
        }
        if let Some(value) = output.get_key(name).filter(|v| !v.is_null()) {
            members.insert((*name).to_string(), value.clone());
        }
    }
}

fn is_present(members: &Mapping, name: &str) -> bool {
    members.get(name).is_some_and(|v| !v.is_null())
}

/// Splice a per-element array onto parallel records
///
/// Element `i` of `trace_array` becomes `records[i][field]` for every `i`
/// both sides cover. Does nothing unless `trace_array` is a sequence.
pub fn merge_array(trace_array: Option<&Node>, records: &mut [Node], field: &str) {
    let Some(values) = trace_array.and_then(Node::as_seq) else {
        return;
    };

    for (index, (value, record)) in values.iter().zip(records.iter_mut()).enumerate() {
        let Some(record) = record.as_map_mut() else {
            tracing::warn!(index, field, found = record.kind(), "Skipping non-mapping record");
            continue;
        };
        record.insert(field.to_string(), value.clone());
    }
}
