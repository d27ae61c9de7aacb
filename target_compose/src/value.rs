//! Value model shared by the merge and fan-out engines.
//!
//! Values are plain [`serde_json::Value`] trees. Merge policy only ever needs
//! to know which of three shapes a value has, which [`ValueKind`] captures.

use serde_json::{Map, Value};

/// Attribute map produced by a producer or contributed by a fragment.
pub type Record = Map<String, Value>;

/// Coarse shape of a [`Value`] as seen by merge predicates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    /// `null`, booleans, numbers, and strings.
    Scalar,
    /// Arrays. Sequences are atomic under the default merge policy.
    Sequence,
    /// Objects. Mappings on both sides of a key are merged key by key.
    Mapping,
}

impl ValueKind {
    /// Classify `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use target_compose::ValueKind;
    ///
    /// assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Mapping);
    /// assert_eq!(ValueKind::of(&json!([1])), ValueKind::Sequence);
    /// assert_eq!(ValueKind::of(&json!("a")), ValueKind::Scalar);
    /// ```
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Mapping,
            Value::Array(_) => Self::Sequence,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Scalar,
        }
    }
}

/// Returns `true` when `value` is a mapping.
#[must_use]
pub const fn is_mapping(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

