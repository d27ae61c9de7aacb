//! Conversions between records and typed values.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::value::Record;
use crate::{ComposeResult, result_ext::ComposeResultExt};

/// Deserialise a composite record into `T`.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Json`] when deserialisation fails.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::{Value, json};
/// use target_compose::from_record;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Shell { packages: Vec<String> }
///
/// let Value::Object(record) = json!({"packages": ["git"]}) else { unreachable!() };
/// let shell: Shell = from_record(record).expect("record deserialises");
/// assert_eq!(shell.packages, ["git"]);
/// ```
pub fn from_record<T: DeserializeOwned>(record: Record) -> ComposeResult<T> {
    serde_json::from_value(Value::Object(record)).into_compose()
}

/// Serialise `value` into a record so typed producers can feed the engines.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Json`] when `value` fails to serialise or
/// does not serialise to a mapping.
pub fn to_record<T: Serialize + ?Sized>(value: &T) -> ComposeResult<Record> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value::<Record>)
        .into_compose()
}
