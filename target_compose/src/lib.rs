//! Per-target fan-out and structural composition for declarative
//! configuration.
//!
//! The crate offers two independent engines built on one merge primitive:
//!
//! - [`fanout`] invokes a producer once per target identifier and reshapes
//!   the outputs, either attribute-major (`{ attr: { target: value } }`),
//!   target-major (`{ target: output }`), or as a plain union.
//! - [`compose`] evaluates an ordered list of fragments against a shared
//!   context and deep-merges their records so later fragments win.
//!
//! [`merge`] holds the recursive merge itself together with the predicates
//! that decide where recursion stops. The remaining modules are small
//! collaborators used by the [`pattern`] layout: a target catalogue, tree
//! flattening, platform filtering, and program descriptors.
//!
//! Values are [`serde_json::Value`] trees. Producers and fragments return a
//! [`Record`], and every fallible operation returns [`ComposeResult`].
//!
//! # Example
//!
//! ```rust
//! use serde_json::{Value, json};
//! use target_compose::{BoxError, Record, compose, each_target};
//!
//! fn record(value: Value) -> Record {
//!     match value {
//!         Value::Object(map) => map,
//!         _ => Record::new(),
//!     }
//! }
//!
//! let per_target = each_target(["x86_64-linux", "aarch64-darwin"], |target: &str| {
//!     Ok::<_, BoxError>(record(json!({"shell": format!("shell-{target}")})))
//! })?;
//!
//! let base = |_: &()| Ok::<_, BoxError>(record(json!({"name": "demo", "shell": {}})));
//! // `per_target` is already `{ "shell": { <target>: ... } }`.
//! let shells = move |_: &()| Ok::<_, BoxError>(per_target.clone());
//! let composite = compose(&(), &[&base, &shells])?;
//!
//! assert_eq!(composite["name"], json!("demo"));
//! assert_eq!(composite["shell"]["aarch64-darwin"], json!("shell-aarch64-darwin"));
//! # Ok::<_, std::sync::Arc<target_compose::ComposeError>>(())
//! ```

use std::sync::Arc;

mod convert;
mod error;
mod result_ext;
mod value;

pub mod compose;
pub mod fanout;
pub mod filter;
pub mod flatten;
pub mod merge;
pub mod pattern;
pub mod program;
pub mod targets;

pub use compose::{Fragment, FragmentComposer, compose};
pub use convert::{from_record, to_record};
pub use error::{BoxError, ComposeError};
pub use fanout::{
    FanOut, FanOutOptions, each_default_target, each_default_target_map,
    each_default_target_pass_through, each_target, each_target_map, each_target_pass_through,
};
pub use merge::{MergePredicate, deep_merge, deep_merge_records, merge_records_with, merge_with};
pub use result_ext::{ComposeResultExt, FragmentResultExt, ProducerResultExt};
pub use value::{Record, ValueKind, is_mapping};

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so they stay cheap to clone when a
/// caller fans one failure out to several consumers.
pub type ComposeResult<T> = Result<T, Arc<ComposeError>>;
