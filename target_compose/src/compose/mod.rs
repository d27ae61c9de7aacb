//! Fragment composition.
//!
//! A large configuration is split into independently-authored fragments.
//! Each fragment is loaded against a shared context and the results are
//! folded left to right with [`deep_merge_records`], so later fragments win
//! wherever values cannot be merged further.
//!
//! # Example
//!
//! ```rust
//! use serde_json::{Map, Value, json};
//! use target_compose::compose::FragmentComposer;
//! use target_compose::{BoxError, Record};
//!
//! struct Inputs {
//!     name: &'static str,
//! }
//!
//! fn object(value: Value) -> Record {
//!     match value {
//!         Value::Object(map) => map,
//!         _ => Map::new(),
//!     }
//! }
//!
//! let mut composer = FragmentComposer::<Inputs>::new();
//! composer.push_labelled("packages", |inputs: &Inputs| -> Result<Record, BoxError> {
//!     Ok(object(json!({"packages": {"x86_64-linux": {"default": inputs.name}}})))
//! });
//! composer.push(|_: &Inputs| -> Result<Record, BoxError> {
//!     Ok(object(json!({"packages": {"aarch64-linux": {"default": "cross"}}})))
//! });
//!
//! let composite = composer.compose(&Inputs { name: "hello" })?;
//! assert_eq!(
//!     Value::Object(composite),
//!     json!({"packages": {
//!         "x86_64-linux": {"default": "hello"},
//!         "aarch64-linux": {"default": "cross"}
//!     }})
//! );
//! # Ok::<_, std::sync::Arc<target_compose::ComposeError>>(())
//! ```

use tracing::{debug, trace};

use crate::merge::deep_merge_records;
use crate::result_ext::FragmentResultExt;
use crate::value::Record;
use crate::{BoxError, ComposeResult};

/// A unit that contributes one partial configuration.
///
/// Implemented for every `Fn(&C) -> Result<Record, E>` whose error converts
/// into [`BoxError`], so closures and functions can be used directly.
pub trait Fragment<C: ?Sized> {
    /// Evaluate the fragment against `context`.
    ///
    /// # Errors
    ///
    /// Returns the loader's error unchanged; the composer attaches the
    /// fragment position.
    fn load(&self, context: &C) -> Result<Record, BoxError>;
}

impl<C, F, E> Fragment<C> for F
where
    C: ?Sized,
    F: Fn(&C) -> Result<Record, E>,
    E: Into<BoxError>,
{
    fn load(&self, context: &C) -> Result<Record, BoxError> {
        self(context).map_err(Into::into)
    }
}

/// Fold `fragments` over `context` in order.
///
/// An empty slice yields an empty record. The first failing fragment aborts
/// the composition; fragments after it are never loaded.
///
/// # Errors
///
/// Returns [`crate::ComposeError::Fragment`] carrying the position of the
/// fragment that failed.
pub fn compose<C>(context: &C, fragments: &[&dyn Fragment<C>]) -> ComposeResult<Record>
where
    C: ?Sized,
{
    fold_fragments(
        context,
        fragments.iter().map(|fragment| (None, *fragment)),
        fragments.len(),
    )
}

fn fold_fragments<'f, C, F, I>(context: &C, fragments: I, count: usize) -> ComposeResult<Record>
where
    C: ?Sized,
    F: Fragment<C> + ?Sized + 'f,
    I: IntoIterator<Item = (Option<&'f str>, &'f F)>,
{
    debug!(fragments = count, "composing fragments");
    fragments
        .into_iter()
        .enumerate()
        .try_fold(Record::new(), |acc, (index, (label, fragment))| {
            trace!(index, label, "loading fragment");
            let contributed = fragment.load(context).for_fragment(index, label)?;
            Ok(deep_merge_records(acc, contributed))
        })
}

struct Entry<'a, C: ?Sized> {
    label: Option<String>,
    fragment: Box<dyn Fragment<C> + 'a>,
}

/// Builder that accumulates fragments in composition order.
///
/// Labels are optional and only used to make failures easier to trace back
/// to their source.
pub struct FragmentComposer<'a, C: ?Sized> {
    entries: Vec<Entry<'a, C>>,
}

impl<C: ?Sized> Default for FragmentComposer<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C: ?Sized> FragmentComposer<'a, C> {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Push an unlabelled fragment.
    pub fn push(&mut self, fragment: impl Fragment<C> + 'a) -> &mut Self {
        self.entries.push(Entry {
            label: None,
            fragment: Box::new(fragment),
        });
        self
    }

    /// Push a fragment with a label reported on failure.
    pub fn push_labelled(
        &mut self,
        label: impl Into<String>,
        fragment: impl Fragment<C> + 'a,
    ) -> &mut Self {
        self.entries.push(Entry {
            label: Some(label.into()),
            fragment: Box::new(fragment),
        });
        self
    }

    /// Number of fragments pushed so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no fragments have been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in composition order; unlabelled fragments yield `None`.
    pub fn labels(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|entry| entry.label.as_deref())
    }

    /// Load every fragment against `context` and fold the results.
    ///
    /// The composer is left untouched, so the same fragment list can be
    /// composed against several contexts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Fragment`] for the first fragment that
    /// fails to load.
    pub fn compose(&self, context: &C) -> ComposeResult<Record> {
        fold_fragments(
            context,
            self.entries
                .iter()
                .map(|entry| (entry.label.as_deref(), entry.fragment.as_ref())),
            self.entries.len(),
        )
    }
}
