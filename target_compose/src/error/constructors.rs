//! Constructors attaching fan-out and composition context to failures.

use std::sync::Arc;

use super::{BoxError, ComposeError};

impl ComposeError {
    /// Construct a producer failure for `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use target_compose::ComposeError;
    /// let e = ComposeError::producer("x86_64-linux", "missing toolchain");
    /// assert!(matches!(e, ComposeError::Producer { ref target, .. } if target == "x86_64-linux"));
    /// ```
    #[must_use]
    pub fn producer(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Producer {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Construct a fragment failure at `index`, optionally labelled.
    ///
    /// # Examples
    ///
    /// ```
    /// use target_compose::ComposeError;
    /// let e = ComposeError::fragment(2, Some("shells"), "bad input");
    /// assert_eq!(
    ///     e.to_string(),
    ///     "fragment #2 ('shells') failed to load: bad input"
    /// );
    /// ```
    #[must_use]
    pub fn fragment(index: usize, label: Option<&str>, source: impl Into<BoxError>) -> Self {
        Self::Fragment {
            index,
            label: label.map(str::to_owned),
            source: source.into(),
        }
    }

    /// Construct a producer failure wrapped in an [`Arc`].
    ///
    /// Fan-out returns `Arc<ComposeError>`, so call sites building errors on
    /// the failure path use this to avoid repeating the wrapping.
    #[must_use]
    pub fn producer_arc(target: impl Into<String>, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::producer(target, source))
    }

    /// Returns the target identifier carried by producer failures and
    /// unknown-target errors.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Producer { target, .. } | Self::UnknownTarget { target, .. } => {
                Some(target.as_str())
            }
            _ => None,
        }
    }

    /// Returns the fragment index when this is a fragment failure.
    #[must_use]
    pub const fn fragment_index(&self) -> Option<usize> {
        match self {
            Self::Fragment { index, .. } => Some(*index),
            _ => None,
        }
    }
}
