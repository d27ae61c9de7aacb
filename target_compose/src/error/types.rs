//! Primary error enum for composition flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Boxed error returned by producers and fragment loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while fanning out over targets or composing
/// fragments.
///
/// Merging values of different kinds is resolved by letting the right-hand
/// value win, so there is deliberately no variant for it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// A per-target producer failed during fan-out.
    #[error("producer failed for target '{target}': {source}")]
    Producer {
        /// Target identifier the producer was invoked with.
        target: String,
        /// Error reported by the producer.
        #[source]
        source: BoxError,
    },

    /// A fragment loader failed during composition.
    #[error("fragment #{index}{} failed to load: {source}", label_suffix(.label.as_deref()))]
    Fragment {
        /// Zero-based position of the fragment in composition order.
        index: usize,
        /// Optional human-readable name registered with the fragment.
        label: Option<String>,
        /// Error reported by the loader.
        #[source]
        source: BoxError,
    },

    /// A target identifier is not part of the target catalogue.
    #[error("unknown target '{target}'{}", suggestion_suffix(.suggestion.as_deref()))]
    UnknownTarget {
        /// Identifier that failed validation.
        target: String,
        /// Closest catalogue entry, when one is near enough to be a typo.
        suggestion: Option<&'static str>,
    },

    /// Converting between records and typed values failed.
    #[error("Failed to convert record: {0}")]
    Json(#[from] Box<serde_json::Error>),

    /// Fan-out options could not be extracted.
    #[error("Failed to load fan-out options: {0}")]
    Options(#[from] Box<FigmentError>),
}

fn label_suffix(label: Option<&str>) -> String {
    label.map_or_else(String::new, |name| format!(" ('{name}')"))
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |name| format!("; did you mean '{name}'?"))
}
