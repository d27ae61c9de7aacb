//! Options controlling how a requested target list is resolved.
//!
//! Some configurations also want to cover the machine they are evaluated on,
//! even when it is not in the requested list. That is an explicit option
//! here: nothing in the engine inspects the environment on its own. Callers
//! either set the options in code or opt into [`FanOutOptions::load_from_env`].

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ComposeResult;
use crate::result_ext::ComposeResultExt;

/// Target-list resolution options.
///
/// # Examples
///
/// ```rust
/// use target_compose::fanout::{FanOutOptions, resolve_targets};
///
/// let options = FanOutOptions::default();
/// assert_eq!(resolve_targets(["x86_64-linux"], &options), ["x86_64-linux"]);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct FanOutOptions {
    /// Append the ambient target when it is missing from the requested list.
    pub include_ambient_target: bool,
    /// Identifier of the ambient target, usually [`host_target`].
    pub ambient_target: Option<String>,
}

impl FanOutOptions {
    /// Prefix for environment variables read by [`Self::load_from_env`].
    pub const ENV_PREFIX: &'static str = "TARGET_COMPOSE_";

    /// Options that include `target` as the ambient target.
    #[must_use]
    pub fn with_ambient_target(target: impl Into<String>) -> Self {
        Self {
            include_ambient_target: true,
            ambient_target: Some(target.into()),
        }
    }

    /// Options that include the compile host as the ambient target.
    #[must_use]
    pub fn host() -> Self {
        Self::with_ambient_target(host_target())
    }

    /// The ambient target to append, if any.
    #[must_use]
    pub fn ambient(&self) -> Option<&str> {
        self.ambient_target
            .as_deref()
            .filter(|_| self.include_ambient_target)
    }

    /// Figment layering defaults under `TARGET_COMPOSE_*` variables.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Extract options from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Options`] when extraction fails.
    pub fn from_figment(figment: &Figment) -> ComposeResult<Self> {
        figment.extract::<Self>().into_compose()
    }

    /// Load options from `TARGET_COMPOSE_INCLUDE_AMBIENT_TARGET` and
    /// `TARGET_COMPOSE_AMBIENT_TARGET`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Options`] when a variable holds a value
    /// of the wrong type.
    pub fn load_from_env() -> ComposeResult<Self> {
        Self::from_figment(&Self::figment())
    }
}

/// Resolve `requested` against `options`.
///
/// The requested order is kept. When the options name an ambient target that
/// is not already requested, it is appended at the end.
#[must_use]
pub fn resolve_targets<I>(requested: I, options: &FanOutOptions) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut targets: Vec<String> = requested
        .into_iter()
        .map(|target| target.as_ref().to_owned())
        .collect();
    if let Some(ambient) = options.ambient()
        && !targets.iter().any(|target| target == ambient)
    {
        debug!(target_id = ambient, "appending ambient target");
        targets.push(ambient.to_owned());
    }
    targets
}

/// Identifier of the compile host, such as `x86_64-linux` or `aarch64-darwin`.
#[must_use]
pub fn host_target() -> String {
    let arch = match std::env::consts::ARCH {
        "x86" => "i686",
        "powerpc64" if cfg!(target_endian = "little") => "powerpc64le",
        other => other,
    };
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    format!("{arch}-{os}")
}
