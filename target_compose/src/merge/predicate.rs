//! Merge predicates and predicate builders.

use serde_json::Value;

use crate::value::is_mapping;

/// Decides, per path, whether a merge stops descending.
///
/// Implemented for every `Fn(&[String], &Value, &Value) -> bool`, so plain
/// functions and closures can be passed directly.
pub trait MergePredicate {
    /// Returns `true` to take `right` as-is at `path` instead of merging the
    /// nested structure of `left` and `right`.
    fn stop(&self, path: &[String], right: &Value, left: &Value) -> bool;
}

impl<F> MergePredicate for F
where
    F: Fn(&[String], &Value, &Value) -> bool,
{
    fn stop(&self, path: &[String], right: &Value, left: &Value) -> bool {
        self(path, right, left)
    }
}

/// Default predicate: descend only when both sides are mappings.
#[must_use]
pub const fn stop_unless_both_mappings(_path: &[String], right: &Value, left: &Value) -> bool {
    !(is_mapping(left) && is_mapping(right))
}

/// Stop at every key `depth` levels deep or deeper.
///
/// Top-level keys sit at depth one, so `until_depth(1)` behaves like a
/// shallow, right-biased union and `until_depth(2)` replaces second-level
/// values wholesale.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use target_compose::merge::{merge_with, until_depth};
///
/// let merged = merge_with(
///     &until_depth(1),
///     json!({"a": {"x": 1}, "b": 1}),
///     json!({"a": {"y": 2}}),
/// );
/// assert_eq!(merged, json!({"a": {"y": 2}, "b": 1}));
/// ```
#[must_use]
pub fn until_depth(depth: usize) -> impl Fn(&[String], &Value, &Value) -> bool {
    move |path: &[String], _right: &Value, _left: &Value| path.len() >= depth
}

/// Treat the subtrees at `paths` as atomic; everything else merges deeply.
///
/// Each path lists keys from the root, for example `["apps", "default"]`.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use target_compose::merge::{atomic_at, merge_with};
///
/// let predicate = atomic_at([["env"]]);
/// let merged = merge_with(
///     &predicate,
///     json!({"env": {"A": "1"}, "opts": {"a": 1}}),
///     json!({"env": {"B": "2"}, "opts": {"b": 2}}),
/// );
/// assert_eq!(merged, json!({"env": {"B": "2"}, "opts": {"a": 1, "b": 2}}));
/// ```
#[must_use]
pub fn atomic_at<I, P, S>(paths: I) -> impl Fn(&[String], &Value, &Value) -> bool
where
    I: IntoIterator<Item = P>,
    P: IntoIterator<Item = S>,
    S: Into<String>,
{
    let atomic: Vec<Vec<String>> = paths
        .into_iter()
        .map(|path| path.into_iter().map(Into::into).collect())
        .collect();
    move |path: &[String], right: &Value, left: &Value| {
        atomic.iter().any(|candidate| candidate.as_slice() == path)
            || stop_unless_both_mappings(path, right, left)
    }
}
