//! Flattening of nested record trees into slash-joined names.
//!
//! Trees nest records under intermediate mappings. Only records and mappings
//! that explicitly opt into recursion are kept; everything else is dropped.
//!
//! # Example
//!
//! ```rust
//! use serde_json::{Value, json};
//! use target_compose::flatten::flatten_tree;
//!
//! let Value::Object(tree) = json!({
//!     "hello": {"type": "derivation", "name": "hello"},
//!     "tools": {
//!         "recurseForDerivations": true,
//!         "fmt": {"type": "derivation", "name": "fmt"}
//!     },
//!     "lib": {"helper": 1}
//! }) else { unreachable!() };
//!
//! let flat = flatten_tree(tree);
//! let names: Vec<&str> = flat.keys().map(String::as_str).collect();
//! assert_eq!(names, ["hello", "tools/fmt"]);
//! ```

use serde_json::Value;

use crate::value::Record;

/// Keys that identify records and recursion points in a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlattenOptions {
    /// Key holding a mapping's kind.
    pub kind_key: String,
    /// Kind value marking a mapping as a record.
    pub record_kind: String,
    /// Boolean key marking a mapping as a subtree to descend into.
    pub recurse_flag: String,
    /// Separator placed between nested names.
    pub separator: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            kind_key: String::from("type"),
            record_kind: String::from("derivation"),
            recurse_flag: String::from("recurseForDerivations"),
            separator: String::from("/"),
        }
    }
}

impl FlattenOptions {
    /// Returns `true` when `mapping` is a record.
    #[must_use]
    pub fn is_record(&self, mapping: &Record) -> bool {
        mapping
            .get(&self.kind_key)
            .and_then(Value::as_str)
            .is_some_and(|kind| kind == self.record_kind)
    }

    /// Returns `true` when `mapping` asks to be descended into.
    #[must_use]
    pub fn recurses(&self, mapping: &Record) -> bool {
        mapping
            .get(&self.recurse_flag)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Flatten `tree` using [`FlattenOptions::default`].
#[must_use]
pub fn flatten_tree(tree: Record) -> Record {
    flatten_tree_with(tree, &FlattenOptions::default())
}

/// Flatten `tree` into `{ "a/b/c": record }`.
///
/// The root is always descended into. Below it, a mapping is kept when it is
/// a record, descended into when it carries the recurse flag, and dropped
/// otherwise. Non-mapping values are dropped.
#[must_use]
pub fn flatten_tree_with(tree: Record, options: &FlattenOptions) -> Record {
    let mut flat = Record::new();
    let mut path = Vec::new();
    walk(&mut flat, &mut path, tree, options);
    flat
}

fn walk(flat: &mut Record, path: &mut Vec<String>, tree: Record, options: &FlattenOptions) {
    for (key, value) in tree {
        let Value::Object(mapping) = value else {
            continue;
        };
        path.push(key);
        if options.is_record(&mapping) {
            flat.insert(path.join(&options.separator), Value::Object(mapping));
        } else if options.recurses(&mapping) {
            walk(flat, path, mapping, options);
        }
        path.pop();
    }
}
