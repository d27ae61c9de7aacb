//! Tests for loading fan-out options from `TARGET_COMPOSE_*` variables.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::Result;
use figment::{Figment, providers::Serialized};
use rstest::rstest;
use target_compose::fanout::{FanOut, FanOutOptions};
use target_compose::ComposeError;
use test_helpers::figment::{figment_error, with_env, with_jail};

#[rstest]
fn defaults_apply_without_variables() -> Result<()> {
    let options = with_jail(|_| FanOutOptions::load_from_env().map_err(figment_error))?;
    assert_eq!(options, FanOutOptions::default());
    assert_eq!(options.ambient(), None);
    Ok(())
}

#[rstest]
fn variables_enable_the_ambient_target() -> Result<()> {
    let options = with_env(
        &[
            ("TARGET_COMPOSE_INCLUDE_AMBIENT_TARGET", "true"),
            ("TARGET_COMPOSE_AMBIENT_TARGET", "riscv64-linux"),
        ],
        FanOutOptions::load_from_env,
    )?
    .expect("options load");
    assert_eq!(options.ambient(), Some("riscv64-linux"));

    let fan = FanOut::with_options(["x86_64-linux"], &options);
    assert_eq!(fan.targets(), ["x86_64-linux", "riscv64-linux"]);
    Ok(())
}

#[rstest]
fn ambient_target_is_ignored_until_enabled() -> Result<()> {
    let options = with_jail(|jail| {
        jail.set_env("TARGET_COMPOSE_AMBIENT_TARGET", "riscv64-linux");
        FanOutOptions::load_from_env().map_err(figment_error)
    })?;
    assert_eq!(options.ambient_target.as_deref(), Some("riscv64-linux"));
    assert_eq!(options.ambient(), None);
    Ok(())
}

#[rstest]
fn malformed_flag_reports_options_error() -> Result<()> {
    let outcome = with_env(
        &[("TARGET_COMPOSE_INCLUDE_AMBIENT_TARGET", "sometimes")],
        FanOutOptions::load_from_env,
    )?;
    let err = outcome.expect_err("non-boolean flag should fail");
    assert!(matches!(err.as_ref(), ComposeError::Options(_)));
    assert!(err.to_string().starts_with("Failed to load fan-out options:"));
    Ok(())
}

#[rstest]
fn explicit_figments_layer_like_any_other_provider() {
    let figment = Figment::from(Serialized::defaults(FanOutOptions::default()))
        .merge(Serialized::default("include_ambient_target", true))
        .merge(Serialized::default("ambient_target", "aarch64-linux"));
    let options = FanOutOptions::from_figment(&figment).expect("options extract");
    assert_eq!(options, FanOutOptions::with_ambient_target("aarch64-linux"));
}
