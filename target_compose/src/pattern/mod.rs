//! A conventional output layout assembled from the fan-out combinators.
//!
//! [`SimplePattern`] turns a per-target package tree into the attribute-major
//! layout most configurations publish:
//!
//! ```text
//! { packages:  { <target>: { <name>: record, default: record } },
//!   checks:    { <target>: { <name>: record } },
//!   devShells: { <target>: { default: shell } } }
//! ```
//!
//! Package trees are flattened with [`flatten_tree`] and filtered with
//! [`filter_supported_in`] before they are published, so every target only
//! sees the records it can build.

use serde_json::Value;
use tracing::debug;

use crate::fanout::FanOut;
use crate::filter::filter_supported_in;
use crate::flatten::flatten_tree;
use crate::targets::TargetTable;
use crate::value::Record;
use crate::{BoxError, ComposeResult};

/// Output key holding buildable records per target.
pub const PACKAGES_KEY: &str = "packages";
/// Output key holding records to verify per target.
pub const CHECKS_KEY: &str = "checks";
/// Output key holding development shells per target.
pub const DEV_SHELLS_KEY: &str = "devShells";
/// Entry name of the aliased package and of the shell.
pub const DEFAULT_KEY: &str = "default";

/// Name-driven builder for the conventional package/check/shell layout.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use target_compose::pattern::SimplePattern;
/// use target_compose::{BoxError, Record};
///
/// let pattern = SimplePattern::new("hello").with_targets(["x86_64-linux"]);
/// let outputs = pattern.build(|target: &str| {
///     let Value::Object(tree) = json!({
///         "hello": {"type": "derivation", "system": target}
///     }) else { unreachable!() };
///     Ok::<Record, BoxError>(tree)
/// })?;
///
/// assert_eq!(
///     outputs["packages"]["x86_64-linux"]["default"],
///     json!({"type": "derivation", "system": "x86_64-linux"})
/// );
/// # Ok::<_, std::sync::Arc<target_compose::ComposeError>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimplePattern {
    name: String,
    fan: FanOut,
    table: TargetTable,
}

impl SimplePattern {
    /// Pattern for the package called `name`, fanned out over the default
    /// targets.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fan: FanOut::defaults(),
            table: TargetTable::all(),
        }
    }

    /// Fan out over exactly `targets`.
    #[must_use]
    pub fn with_targets<I>(self, targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.with_fan_out(FanOut::new(targets))
    }

    /// Use a pre-resolved fan-out, for example one built from options.
    #[must_use]
    pub fn with_fan_out(mut self, fan: FanOut) -> Self {
        self.fan = fan;
        self
    }

    /// Catalogue assumed by records that declare no platforms.
    #[must_use]
    pub const fn with_table(mut self, table: TargetTable) -> Self {
        self.table = table;
        self
    }

    /// Name of the package aliased as `default`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Targets visited by [`Self::build`], in order.
    #[must_use]
    pub fn targets(&self) -> &[String] {
        self.fan.targets()
    }

    /// Publish `packages` and `checks` for every target.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Producer`] for the first target whose
    /// package tree cannot be produced.
    pub fn build<P, E>(&self, mut packages: P) -> ComposeResult<Record>
    where
        P: FnMut(&str) -> Result<Record, E>,
        E: Into<BoxError>,
    {
        self.fan.each_target(|target: &str| {
            let tree = packages(target).map_err(Into::<BoxError>::into)?;
            Ok::<_, BoxError>(self.layout(target, tree))
        })
    }

    /// Like [`Self::build`], additionally publishing `shell` as the default
    /// development shell of every target.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Producer`] for the first target whose
    /// package tree or shell cannot be produced.
    pub fn build_with_shell<P, S, E, F>(
        &self,
        mut packages: P,
        mut shell: S,
    ) -> ComposeResult<Record>
    where
        P: FnMut(&str) -> Result<Record, E>,
        S: FnMut(&str) -> Result<Value, F>,
        E: Into<BoxError>,
        F: Into<BoxError>,
    {
        self.fan.each_target(|target: &str| {
            let tree = packages(target).map_err(Into::<BoxError>::into)?;
            let mut outputs = self.layout(target, tree);
            let default_shell = shell(target).map_err(Into::<BoxError>::into)?;
            let mut shells = Record::new();
            shells.insert(DEFAULT_KEY.to_owned(), default_shell);
            outputs.insert(DEV_SHELLS_KEY.to_owned(), Value::Object(shells));
            Ok::<_, BoxError>(outputs)
        })
    }

    fn layout(&self, target: &str, tree: Record) -> Record {
        let supported = filter_supported_in(target, flatten_tree(tree), self.table);
        let mut published = supported.clone();
        if let Some(primary) = supported.get(&self.name) {
            published.insert(DEFAULT_KEY.to_owned(), primary.clone());
        }
        debug!(
            target_id = target,
            packages = published.len(),
            "laid out target outputs"
        );

        let mut outputs = Record::new();
        outputs.insert(PACKAGES_KEY.to_owned(), Value::Object(published));
        outputs.insert(CHECKS_KEY.to_owned(), Value::Object(supported));
        outputs
    }
}

#[cfg(test)]
mod tests;
