//! Invocation recording for producers and fragment loaders.
//!
//! Fan-out and composition must stop at the first failure. Tests assert that
//! by handing a [`CallLog`] to every closure and checking what was recorded.
//!
//! # Examples
//!
//! ```
//! use target_compose_test_helpers::calls::CallLog;
//!
//! let log = CallLog::new();
//! log.record("x86_64-linux");
//! assert_eq!(log.count(), 1);
//! assert!(log.contains("x86_64-linux"));
//! ```

use parking_lot::Mutex;

/// Ordered record of the names passed to [`CallLog::record`].
#[derive(Debug, Default)]
pub struct CallLog {
    entries: Mutex<Vec<String>>,
}

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append `name` to the log.
    pub fn record(&self, name: impl Into<String>) {
        self.entries.lock().push(name.into());
    }

    /// Number of recorded invocations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Number of invocations recorded under `name`.
    #[must_use]
    pub fn count_of(&self, name: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.as_str() == name)
            .count()
    }

    /// Returns `true` when `name` was recorded at least once.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.count_of(name) > 0
    }

    /// Snapshot of the recorded names in call order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}
