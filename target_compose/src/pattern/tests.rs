//! Unit tests for the conventional output layout.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use test_helpers::calls::CallLog;
use test_helpers::json::object;

use super::*;
use crate::ComposeError;

fn tree(target: &str) -> Result<Record, BoxError> {
    object(json!({
        "hello": {"type": "derivation", "system": target},
        "linux-tool": {
            "type": "derivation",
            "meta": {"platforms": ["x86_64-linux"]}
        },
        "python": {
            "recurseForDerivations": true,
            "requests": {"type": "derivation"}
        },
        "not-a-package": 3
    }))
    .map_err(|err| BoxError::from(err.to_string()))
}

#[fixture]
fn pattern() -> SimplePattern {
    SimplePattern::new("hello").with_targets(["x86_64-linux", "aarch64-darwin"])
}

#[rstest]
fn new_pattern_uses_default_targets() {
    let fresh = SimplePattern::new("hello");
    assert_eq!(fresh.name(), "hello");
    assert_eq!(fresh.targets(), crate::targets::DEFAULT_TARGETS);
}

#[rstest]
fn packages_are_flattened_filtered_and_aliased(pattern: SimplePattern) -> Result<()> {
    let outputs = pattern.build(tree).map_err(|err| anyhow!(err.to_string()))?;
    let linux = &outputs[PACKAGES_KEY]["x86_64-linux"];
    let darwin = &outputs[PACKAGES_KEY]["aarch64-darwin"];

    ensure!(linux["default"] == linux["hello"]);
    ensure!(linux.get("linux-tool").is_some());
    ensure!(linux.get("python/requests").is_some());
    ensure!(linux.get("not-a-package").is_none());
    ensure!(darwin.get("linux-tool").is_none());
    ensure!(darwin["default"]["system"] == json!("aarch64-darwin"));
    Ok(())
}

#[rstest]
fn checks_mirror_packages_without_alias(pattern: SimplePattern) -> Result<()> {
    let outputs = pattern.build(tree).map_err(|err| anyhow!(err.to_string()))?;
    let checks = &outputs[CHECKS_KEY]["x86_64-linux"];
    ensure!(checks.get(DEFAULT_KEY).is_none());
    ensure!(checks.get("hello").is_some());
    ensure!(outputs.get(DEV_SHELLS_KEY).is_none());
    Ok(())
}

#[rstest]
fn alias_is_skipped_when_named_package_is_unsupported() -> Result<()> {
    let pattern = SimplePattern::new("linux-tool").with_targets(["aarch64-darwin"]);
    let outputs = pattern.build(tree).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(outputs[PACKAGES_KEY]["aarch64-darwin"].get(DEFAULT_KEY).is_none());
    Ok(())
}

#[rstest]
fn shells_are_published_per_target(pattern: SimplePattern) -> Result<()> {
    let outputs = pattern
        .build_with_shell(tree, |target: &str| {
            Ok::<_, BoxError>(json!({"name": format!("shell-{target}")}))
        })
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        outputs[DEV_SHELLS_KEY]
            == json!({
                "x86_64-linux": {"default": {"name": "shell-x86_64-linux"}},
                "aarch64-darwin": {"default": {"name": "shell-aarch64-darwin"}}
            })
    );
    Ok(())
}

#[rstest]
fn shell_failure_names_target_and_stops(pattern: SimplePattern) {
    let calls = CallLog::new();
    let err = pattern
        .build_with_shell(
            |target: &str| {
                calls.record(target);
                tree(target)
            },
            |_: &str| Err::<Value, _>(BoxError::from("no compiler")),
        )
        .expect_err("shell failure should abort");
    assert!(matches!(
        err.as_ref(),
        ComposeError::Producer { target, .. } if target == "x86_64-linux"
    ));
    assert_eq!(calls.entries(), ["x86_64-linux"]);
}

#[rstest]
fn custom_table_governs_records_without_platforms() -> Result<()> {
    static ONLY_LINUX: &[&str] = &["x86_64-linux"];
    let pattern = SimplePattern::new("hello")
        .with_targets(["aarch64-darwin"])
        .with_table(TargetTable::new(ONLY_LINUX));
    let outputs = pattern.build(tree).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(outputs[PACKAGES_KEY]["aarch64-darwin"] == json!({}));
    Ok(())
}
