//! Environment isolation for options tests built on `figment::Jail`.
//!
//! Options tests mutate `TARGET_COMPOSE_*` variables. Running them inside a
//! jail serialises those tests and restores the environment afterwards.
//!
//! # Examples
//!
//! ```
//! use target_compose_test_helpers::figment::with_env;
//!
//! let seen = with_env(&[("TARGET_COMPOSE_AMBIENT_TARGET", "riscv64-linux")], || {
//!     std::env::var("TARGET_COMPOSE_AMBIENT_TARGET").ok()
//! })
//! .expect("jail runs");
//! assert_eq!(seen.as_deref(), Some("riscv64-linux"));
//! ```

use anyhow::{Result, anyhow};
use figment::Jail;

/// Runs `f` inside a [`Jail`] and returns its output.
///
/// Jail failures and errors returned by `f` both surface as
/// [`anyhow::Error`].
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<T>,
{
    let mut slot = None;
    Jail::try_with(|jail| {
        slot = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    slot.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Sets every `(name, value)` pair in `vars` inside a jail, then runs `f`.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up.
pub fn with_env<F, T>(vars: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    with_jail(|jail| {
        for (name, value) in vars {
            jail.set_env(name, value);
        }
        Ok(f())
    })
}

/// Wraps any displayable error as a [`figment::Error`] so it can leave a
/// jail closure through `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adapter, which hands over ownership"
)]
#[must_use]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
