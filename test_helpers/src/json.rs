//! JSON builders for record-shaped fixtures.

use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

/// Unwraps a JSON object literal into its map.
///
/// Fixtures are usually written with `serde_json::json!`, which yields a
/// [`Value`]; producers and fragments return maps.
///
/// # Errors
///
/// Returns an error when `value` is not an object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use target_compose_test_helpers::json::object;
///
/// let map = object(json!({"port": 8080})).expect("object literal");
/// assert_eq!(map.get("port"), Some(&json!(8080)));
/// ```
pub fn object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected a JSON object, found {other}")),
    }
}
