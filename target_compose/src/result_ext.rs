//! Extensions for mapping errors to `ComposeResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ComposeError::…))`
//! patterns when converting producer, loader, and serde failures into the
//! crate's `ComposeResult<T>` alias (`Result<T, Arc<ComposeError>>`).
//!
//! - Use [`ComposeResultExt::into_compose`] for error types that implement
//!   `Into<ComposeError>` (e.g., `serde_json::Error`).
//! - Use [`ProducerResultExt::for_target`] to attach the failing target to a
//!   producer error.
//! - Use [`FragmentResultExt::for_fragment`] to attach the failing fragment
//!   position to a loader error.
//!
//! # Examples
//!
//! ```
//! use target_compose::{ComposeResult, ComposeResultExt};
//!
//! fn encode() -> ComposeResult<serde_json::Value> {
//!     serde_json::to_value(42).into_compose()
//! }
//! ```

use std::sync::Arc;

use crate::{BoxError, ComposeError, ComposeResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ComposeError>` into a `ComposeResult<T>`.
pub trait ComposeResultExt<T, E> {
    /// Convert `Result<T, E>` into `ComposeResult<T>` using `Into<ComposeError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ComposeError>`.
    fn into_compose(self) -> ComposeResult<T>;
}

impl<T, E> ComposeResultExt<T, E> for Result<T, E>
where
    E: Into<ComposeError>,
{
    fn into_compose(self) -> ComposeResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension that tags a producer failure with its target identifier.
pub trait ProducerResultExt<T> {
    /// Convert a producer result into `ComposeResult<T>` as a
    /// [`ComposeError::Producer`] for `target`.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::Producer` wrapped in `Arc` when the input is `Err`.
    fn for_target(self, target: &str) -> ComposeResult<T>;
}

impl<T, E> ProducerResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn for_target(self, target: &str) -> ComposeResult<T> {
        self.map_err(|e| ComposeError::producer_arc(target, e))
    }
}

/// Extension that tags a loader failure with the fragment's position.
pub trait FragmentResultExt<T> {
    /// Convert a loader result into `ComposeResult<T>` as a
    /// [`ComposeError::Fragment`] at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::Fragment` wrapped in `Arc` when the input is `Err`.
    fn for_fragment(self, index: usize, label: Option<&str>) -> ComposeResult<T>;
}

impl<T> FragmentResultExt<T> for Result<T, BoxError> {
    fn for_fragment(self, index: usize, label: Option<&str>) -> ComposeResult<T> {
        self.map_err(|e| Arc::new(ComposeError::fragment(index, label, e)))
    }
}
