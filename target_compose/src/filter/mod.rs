//! Filtering of flattened records by target support.
//!
//! A record declares where it builds through its `meta` mapping:
//! `hydraPlatforms` takes precedence over `platforms`, and a record that
//! declares neither is assumed to support every catalogued target.
//! `badPlatforms` and `broken` exclude it again.

use serde_json::Value;
use tracing::trace;

use crate::flatten::FlattenOptions;
use crate::targets::TargetTable;
use crate::value::Record;

/// Keep the entries of `records` that support `target`, judged against the
/// full target catalogue.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use target_compose::filter::filter_supported;
///
/// let Value::Object(records) = json!({
///     "portable": {"type": "derivation"},
///     "linux-only": {"type": "derivation", "meta": {"platforms": ["x86_64-linux"]}},
///     "broken": {"type": "derivation", "meta": {"broken": true}}
/// }) else { unreachable!() };
///
/// let kept = filter_supported("aarch64-darwin", records);
/// assert_eq!(kept.keys().collect::<Vec<_>>(), ["portable"]);
/// ```
#[must_use]
pub fn filter_supported(target: &str, records: Record) -> Record {
    filter_supported_in(target, records, TargetTable::all())
}

/// Keep the entries of `records` that support `target`; records without a
/// platform list support whatever `table` lists.
#[must_use]
pub fn filter_supported_in(target: &str, records: Record, table: TargetTable) -> Record {
    let shape = FlattenOptions::default();
    records
        .into_iter()
        .filter(|(name, value)| {
            let keep = supports(target, value, &shape, table);
            if !keep {
                trace!(target_id = target, name = name.as_str(), "dropping unsupported record");
            }
            keep
        })
        .collect()
}

fn supports(target: &str, value: &Value, shape: &FlattenOptions, table: TargetTable) -> bool {
    let Value::Object(record) = value else {
        return false;
    };
    if !shape.is_record(record) {
        return false;
    }
    let meta = record.get("meta").and_then(Value::as_object);
    let field = |key: &str| meta.and_then(|fields| fields.get(key));

    let broken = field("broken").and_then(Value::as_bool).unwrap_or(false);
    let listed = field("hydraPlatforms")
        .or_else(|| field("platforms"))
        .map_or_else(|| table.contains(target), |platforms| lists(platforms, target));
    let excluded = field("badPlatforms").is_some_and(|platforms| lists(platforms, target));

    !broken && listed && !excluded
}

fn lists(platforms: &Value, target: &str) -> bool {
    platforms
        .as_array()
        .is_some_and(|entries| entries.iter().any(|entry| entry.as_str() == Some(target)))
}

#[cfg(test)]
mod tests;
