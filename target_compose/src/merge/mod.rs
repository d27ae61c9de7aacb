//! Structural merge of nested mappings.
//!
//! Two mappings merge into the union of their keys. When a key appears on
//! both sides, a [`MergePredicate`] decides whether to stop and take the
//! right-hand value or to keep descending. Values of different kinds never
//! conflict: whenever one side is not a mapping the right-hand value wins.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use target_compose::merge::{deep_merge, merge_with, until_depth};
//!
//! let base = json!({"packages": {"x86_64-linux": {"hello": 1}}, "tags": ["a"]});
//! let overlay = json!({"packages": {"x86_64-linux": {"world": 2}}, "tags": ["b"]});
//!
//! let merged = deep_merge(base.clone(), overlay.clone());
//! assert_eq!(
//!     merged,
//!     json!({"packages": {"x86_64-linux": {"hello": 1, "world": 2}}, "tags": ["b"]})
//! );
//!
//! // Stop at depth two: per-target maps are replaced wholesale.
//! let shallow = merge_with(&until_depth(2), base, overlay);
//! assert_eq!(shallow["packages"]["x86_64-linux"], json!({"world": 2}));
//! ```

mod predicate;

use serde_json::Value;
use tracing::trace;

use crate::value::Record;

pub use predicate::{MergePredicate, atomic_at, stop_unless_both_mappings, until_depth};

/// Merge `right` over `left`, consulting `predicate` wherever both sides
/// define the same key.
///
/// The predicate receives the path of the key being resolved (outermost key
/// first, the key itself last), the right-hand value, and the left-hand value.
/// Returning `true` takes the right-hand value as-is. Returning `false`
/// descends when both values are mappings and takes the right-hand value
/// otherwise.
///
/// When `left` and `right` are not both mappings the result is `right`.
#[must_use]
pub fn merge_with<P>(predicate: &P, left: Value, right: Value) -> Value
where
    P: MergePredicate + ?Sized,
{
    match (left, right) {
        (Value::Object(lhs), Value::Object(rhs)) => {
            Value::Object(merge_records_with(predicate, lhs, rhs))
        }
        (_, rhs) => rhs,
    }
}

/// Record-level form of [`merge_with`].
#[must_use]
pub fn merge_records_with<P>(predicate: &P, left: Record, right: Record) -> Record
where
    P: MergePredicate + ?Sized,
{
    let mut path = Vec::new();
    merge_at(predicate, &mut path, left, right)
}

/// Merge recursively wherever both sides hold mappings; the right-hand value
/// wins everywhere else.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use target_compose::merge::deep_merge;
///
/// let merged = deep_merge(json!({"a": {"b": 1}}), json!({"a": 2}));
/// assert_eq!(merged, json!({"a": 2}));
/// ```
#[must_use]
pub fn deep_merge(left: Value, right: Value) -> Value {
    merge_with(&stop_unless_both_mappings, left, right)
}

/// Record-level form of [`deep_merge`].
#[must_use]
pub fn deep_merge_records(left: Record, right: Record) -> Record {
    merge_records_with(&stop_unless_both_mappings, left, right)
}

fn merge_at<P>(predicate: &P, path: &mut Vec<String>, mut left: Record, right: Record) -> Record
where
    P: MergePredicate + ?Sized,
{
    for (key, right_value) in right {
        let merged = match left.remove(&key) {
            Some(left_value) => {
                path.push(key.clone());
                let resolved = resolve(predicate, path, left_value, right_value);
                path.pop();
                resolved
            }
            None => right_value,
        };
        left.insert(key, merged);
    }
    left
}

fn resolve<P>(predicate: &P, path: &mut Vec<String>, left: Value, right: Value) -> Value
where
    P: MergePredicate + ?Sized,
{
    if predicate.stop(path, &right, &left) {
        trace!(path = %path.join("."), "merge predicate stopped recursion");
        return right;
    }
    match (left, right) {
        (Value::Object(lhs), Value::Object(rhs)) => Value::Object(merge_at(predicate, path, lhs, rhs)),
        (_, rhs) => rhs,
    }
}
