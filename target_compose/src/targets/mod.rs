//! Catalogue of known target identifiers.
//!
//! Identifiers are exposed three ways: as constants in [`system`] so typos
//! fail to compile, as the [`DEFAULT_TARGETS`] and [`ALL_TARGETS`] lists, and
//! through [`TargetTable`] for runtime lookup and validation. The fan-out
//! engine accepts any identifier and never consults this table itself.

use std::sync::Arc;

use serde_json::Value;

use crate::value::Record;
use crate::{ComposeError, ComposeResult};

macro_rules! target_catalogue {
    ($($name:ident => $id:literal),+ $(,)?) => {
        /// Constants naming every catalogued target identifier.
        pub mod system {
            $(
                #[doc = concat!("The `", $id, "` target.")]
                pub const $name: &str = $id;
            )+
        }

        /// Every catalogued target identifier.
        pub const ALL_TARGETS: &[&str] = &[$(system::$name),+];
    };
}

target_catalogue! {
    AARCH64_LINUX => "aarch64-linux",
    ARMV5TEL_LINUX => "armv5tel-linux",
    ARMV6L_LINUX => "armv6l-linux",
    ARMV7A_LINUX => "armv7a-linux",
    ARMV7L_LINUX => "armv7l-linux",
    MIPSEL_LINUX => "mipsel-linux",
    I686_CYGWIN => "i686-cygwin",
    I686_FREEBSD => "i686-freebsd",
    I686_LINUX => "i686-linux",
    I686_NETBSD => "i686-netbsd",
    I686_OPENBSD => "i686-openbsd",
    X86_64_CYGWIN => "x86_64-cygwin",
    X86_64_FREEBSD => "x86_64-freebsd",
    X86_64_LINUX => "x86_64-linux",
    X86_64_NETBSD => "x86_64-netbsd",
    X86_64_OPENBSD => "x86_64-openbsd",
    X86_64_SOLARIS => "x86_64-solaris",
    X86_64_DARWIN => "x86_64-darwin",
    I686_DARWIN => "i686-darwin",
    AARCH64_DARWIN => "aarch64-darwin",
    ARMV7A_DARWIN => "armv7a-darwin",
    X86_64_WINDOWS => "x86_64-windows",
    I686_WINDOWS => "i686-windows",
    WASM64_WASI => "wasm64-wasi",
    WASM32_WASI => "wasm32-wasi",
    X86_64_REDOX => "x86_64-redox",
    POWERPC64LE_LINUX => "powerpc64le-linux",
    RISCV32_LINUX => "riscv32-linux",
    RISCV64_LINUX => "riscv64-linux",
    ARM_NONE => "arm-none",
    ARMV6L_NONE => "armv6l-none",
    AARCH64_NONE => "aarch64-none",
    AVR_NONE => "avr-none",
    I686_NONE => "i686-none",
    X86_64_NONE => "x86_64-none",
    POWERPC_NONE => "powerpc-none",
    MSP430_NONE => "msp430-none",
    RISCV64_NONE => "riscv64-none",
    RISCV32_NONE => "riscv32-none",
    VC4_NONE => "vc4-none",
    JS_GHCJS => "js-ghcjs",
    AARCH64_GENODE => "aarch64-genode",
    X86_64_GENODE => "x86_64-genode",
}

/// Targets most configurations are built for.
pub const DEFAULT_TARGETS: &[&str] = &[
    system::AARCH64_LINUX,
    system::AARCH64_DARWIN,
    system::X86_64_DARWIN,
    system::X86_64_LINUX,
];

/// Largest edit distance still reported as a likely typo.
const SUGGESTION_DISTANCE: usize = 2;

/// Runtime view over a list of target identifiers.
///
/// # Examples
///
/// ```
/// use target_compose::targets::{TargetTable, system};
///
/// let table = TargetTable::all();
/// assert_eq!(table.lookup("x86_64-linux"), Some(system::X86_64_LINUX));
/// let err = table.validate("x86-64-linux").unwrap_err();
/// assert!(err.to_string().contains("did you mean 'x86_64-linux'"));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TargetTable {
    ids: &'static [&'static str],
}

impl TargetTable {
    /// Table over an arbitrary static identifier list.
    #[must_use]
    pub const fn new(ids: &'static [&'static str]) -> Self {
        Self { ids }
    }

    /// Table over [`ALL_TARGETS`].
    #[must_use]
    pub const fn all() -> Self {
        Self::new(ALL_TARGETS)
    }

    /// Table over [`DEFAULT_TARGETS`].
    #[must_use]
    pub const fn defaults() -> Self {
        Self::new(DEFAULT_TARGETS)
    }

    /// Identifiers in catalogue order.
    #[must_use]
    pub const fn ids(&self) -> &'static [&'static str] {
        self.ids
    }

    /// Returns `true` when `target` is catalogued.
    #[must_use]
    pub fn contains(&self, target: &str) -> bool {
        self.lookup(target).is_some()
    }

    /// Returns the catalogue's own copy of `target`.
    #[must_use]
    pub fn lookup(&self, target: &str) -> Option<&'static str> {
        self.ids.iter().copied().find(|id| *id == target)
    }

    /// Resolve `target`, reporting the nearest catalogued identifier when it
    /// is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::UnknownTarget`] when `target` is not catalogued.
    pub fn validate(&self, target: &str) -> ComposeResult<&'static str> {
        self.lookup(target).ok_or_else(|| {
            Arc::new(ComposeError::UnknownTarget {
                target: target.to_owned(),
                suggestion: self.suggest(target),
            })
        })
    }

    /// Identifier → identifier self-mapping.
    ///
    /// Configuration authors index this record instead of writing string
    /// literals, so a misspelt key surfaces as a missing entry.
    #[must_use]
    pub fn as_record(&self) -> Record {
        self.ids
            .iter()
            .map(|id| ((*id).to_owned(), Value::from(*id)))
            .collect()
    }

    fn suggest(&self, target: &str) -> Option<&'static str> {
        self.ids
            .iter()
            .copied()
            .map(|id| (strsim::levenshtein(id, target), id))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, id)| id)
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::all()
    }
}

impl<'a> IntoIterator for &'a TargetTable {
    type Item = &'static str;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'static str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
