//! Per-target fan-out.
//!
//! A producer is invoked once per target identifier, strictly in list order,
//! and its outputs are reshaped by an accumulation policy:
//!
//! - [`each_target`] is attribute-major: `{ attr: { target: value } }`.
//! - [`each_target_map`] is target-major: `{ target: output }`.
//! - [`each_target_pass_through`] unions the producer's records as-is.
//!
//! All three abort on the first producer failure and report the target that
//! failed. Custom policies can be plugged into [`fan_out`].
//!
//! # Example
//!
//! ```rust
//! use serde_json::{Value, json};
//! use target_compose::fanout::each_target;
//! use target_compose::{BoxError, Record};
//!
//! let outputs = each_target(["x86_64-linux", "aarch64-darwin"], |target: &str| {
//!     let mut record = Record::new();
//!     record.insert("greeting".into(), json!(format!("{target}-hi")));
//!     Ok::<_, BoxError>(record)
//! })?;
//! assert_eq!(
//!     Value::Object(outputs),
//!     json!({"greeting": {"x86_64-linux": "x86_64-linux-hi", "aarch64-darwin": "aarch64-darwin-hi"}})
//! );
//! # Ok::<_, std::sync::Arc<target_compose::ComposeError>>(())
//! ```

mod options;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::result_ext::ProducerResultExt;
use crate::targets::DEFAULT_TARGETS;
use crate::value::Record;
use crate::{BoxError, ComposeResult};

pub use options::{FanOutOptions, host_target, resolve_targets};

/// Fold `producer` over `targets` in list order, starting from an empty
/// record and applying `op` at every step.
///
/// `op` receives the producer, the accumulator so far, and the current
/// target, and returns the next accumulator. [`attribute_major`] and
/// [`pass_through`] are the standard steps.
///
/// # Errors
///
/// Returns the first error produced by `op`; later targets are not visited.
pub fn fan_out<I, P, Op>(targets: I, mut producer: P, mut op: Op) -> ComposeResult<Record>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    Op: FnMut(&mut P, Record, &str) -> ComposeResult<Record>,
{
    targets.into_iter().try_fold(Record::new(), |acc, target| {
        let id = target.as_ref();
        trace!(target_id = id, "fan-out step");
        op(&mut producer, acc, id)
    })
}

/// Attribute-major step: file every attribute of the producer's record under
/// `target`.
///
/// Attributes missing for some targets simply have fewer entries.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] when the producer fails.
pub fn attribute_major<P, E>(producer: &mut P, mut acc: Record, target: &str) -> ComposeResult<Record>
where
    P: FnMut(&str) -> Result<Record, E>,
    E: Into<BoxError>,
{
    let record = producer(target).for_target(target)?;
    for (attribute, value) in record {
        let slot = acc
            .entry(attribute)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Some(per_target) = slot.as_object_mut() {
            per_target.insert(target.to_owned(), value);
        }
    }
    Ok(acc)
}

/// Pass-through step: union the producer's record into the accumulator.
///
/// Later targets overwrite duplicate keys; nothing is merged recursively and
/// no target key is introduced.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] when the producer fails.
pub fn pass_through<P, E>(producer: &mut P, mut acc: Record, target: &str) -> ComposeResult<Record>
where
    P: FnMut(&str) -> Result<Record, E>,
    E: Into<BoxError>,
{
    let record = producer(target).for_target(target)?;
    acc.extend(record);
    Ok(acc)
}

/// Attribute-major fan-out: `{ attr: { target: value } }`.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] for the first failing target.
pub fn each_target<I, P, E>(targets: I, producer: P) -> ComposeResult<Record>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    P: FnMut(&str) -> Result<Record, E>,
    E: Into<BoxError>,
{
    debug!(policy = "attribute-major", "fanning out over targets");
    fan_out(targets, producer, attribute_major::<P, E>)
}

/// Pass-through fan-out: the union of every target's record.
///
/// Suited to producers that already key their output, such as development
/// shells named per target.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] for the first failing target.
pub fn each_target_pass_through<I, P, E>(targets: I, producer: P) -> ComposeResult<Record>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    P: FnMut(&str) -> Result<Record, E>,
    E: Into<BoxError>,
{
    debug!(policy = "pass-through", "fanning out over targets");
    fan_out(targets, producer, pass_through::<P, E>)
}

/// Target-major fan-out: `{ target: output }` with no merging across targets.
///
/// The producer may return anything convertible into a [`Value`].
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] for the first failing target.
pub fn each_target_map<I, P, T, E>(targets: I, mut producer: P) -> ComposeResult<Record>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    P: FnMut(&str) -> Result<T, E>,
    T: Into<Value>,
    E: Into<BoxError>,
{
    debug!(policy = "target-major", "fanning out over targets");
    let mut outputs = Record::new();
    for target in targets {
        let id = target.as_ref();
        trace!(target_id = id, "fan-out step");
        let output = producer(id).for_target(id)?;
        outputs.insert(id.to_owned(), output.into());
    }
    Ok(outputs)
}

/// [`each_target`] over [`DEFAULT_TARGETS`].
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] for the first failing target.
pub fn each_default_target<P, E>(producer: P) -> ComposeResult<Record>
where
    P: FnMut(&str) -> Result<Record, E>,
    E: Into<BoxError>,
{
    each_target(DEFAULT_TARGETS, producer)
}

/// [`each_target_pass_through`] over [`DEFAULT_TARGETS`].
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] for the first failing target.
pub fn each_default_target_pass_through<P, E>(producer: P) -> ComposeResult<Record>
where
    P: FnMut(&str) -> Result<Record, E>,
    E: Into<BoxError>,
{
    each_target_pass_through(DEFAULT_TARGETS, producer)
}

/// [`each_target_map`] over [`DEFAULT_TARGETS`].
///
/// # Errors
///
/// Returns [`crate::ComposeError::Producer`] for the first failing target.
pub fn each_default_target_map<P, T, E>(producer: P) -> ComposeResult<Record>
where
    P: FnMut(&str) -> Result<T, E>,
    T: Into<Value>,
    E: Into<BoxError>,
{
    each_target_map(DEFAULT_TARGETS, producer)
}

/// A resolved target list with the fan-out policies attached.
///
/// Use this instead of the free functions when the list should honour
/// [`FanOutOptions`], for example to include the ambient target.
///
/// # Examples
///
/// ```rust
/// use target_compose::fanout::{FanOut, FanOutOptions};
///
/// let options = FanOutOptions::with_ambient_target("riscv64-linux");
/// let fan = FanOut::with_options(["x86_64-linux"], &options);
/// assert_eq!(fan.targets(), ["x86_64-linux", "riscv64-linux"]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FanOut {
    targets: Vec<String>,
}

impl FanOut {
    /// Fan out over exactly `targets`.
    #[must_use]
    pub fn new<I>(targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            targets: targets
                .into_iter()
                .map(|target| target.as_ref().to_owned())
                .collect(),
        }
    }

    /// Fan out over [`DEFAULT_TARGETS`].
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_TARGETS)
    }

    /// Fan out over `targets` resolved against `options`.
    #[must_use]
    pub fn with_options<I>(targets: I, options: &FanOutOptions) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            targets: resolve_targets(targets, options),
        }
    }

    /// The resolved target list, in fold order.
    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Fold with a custom step; see [`fan_out`].
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `op`.
    pub fn fold<P, Op>(&self, producer: P, op: Op) -> ComposeResult<Record>
    where
        Op: FnMut(&mut P, Record, &str) -> ComposeResult<Record>,
    {
        fan_out(&self.targets, producer, op)
    }

    /// Attribute-major fan-out; see [`each_target`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Producer`] for the first failing target.
    pub fn each_target<P, E>(&self, producer: P) -> ComposeResult<Record>
    where
        P: FnMut(&str) -> Result<Record, E>,
        E: Into<BoxError>,
    {
        each_target(&self.targets, producer)
    }

    /// Pass-through fan-out; see [`each_target_pass_through`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Producer`] for the first failing target.
    pub fn each_target_pass_through<P, E>(&self, producer: P) -> ComposeResult<Record>
    where
        P: FnMut(&str) -> Result<Record, E>,
        E: Into<BoxError>,
    {
        each_target_pass_through(&self.targets, producer)
    }

    /// Target-major fan-out; see [`each_target_map`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Producer`] for the first failing target.
    pub fn each_target_map<P, T, E>(&self, producer: P) -> ComposeResult<Record>
    where
        P: FnMut(&str) -> Result<T, E>,
        T: Into<Value>,
        E: Into<BoxError>,
    {
        each_target_map(&self.targets, producer)
    }
}

impl Default for FanOut {
    fn default() -> Self {
        Self::defaults()
    }
}
