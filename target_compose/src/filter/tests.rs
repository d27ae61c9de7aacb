//! Unit tests for support filtering.

use rstest::rstest;
use serde_json::{Value, json};
use test_helpers::json::object;

use super::*;
use crate::targets::system;

#[rstest]
#[case::no_meta(json!({"type": "derivation"}), true)]
#[case::listed(json!({"type": "derivation", "meta": {"platforms": ["x86_64-linux"]}}), true)]
#[case::not_listed(json!({"type": "derivation", "meta": {"platforms": ["aarch64-darwin"]}}), false)]
#[case::hydra_wins(
    json!({"type": "derivation", "meta": {"hydraPlatforms": [], "platforms": ["x86_64-linux"]}}),
    false
)]
#[case::bad_platform(
    json!({"type": "derivation", "meta": {"badPlatforms": ["x86_64-linux"]}}),
    false
)]
#[case::broken(json!({"type": "derivation", "meta": {"broken": true}}), false)]
#[case::not_broken(json!({"type": "derivation", "meta": {"broken": false}}), true)]
#[case::not_a_record(json!({"type": "app"}), false)]
#[case::scalar(json!("x"), false)]
fn support_rules(#[case] entry: Value, #[case] kept: bool) -> anyhow::Result<()> {
    let records = object(json!({"entry": entry}))?;
    let filtered = filter_supported(system::X86_64_LINUX, records);
    assert_eq!(filtered.contains_key("entry"), kept);
    Ok(())
}

#[rstest]
fn default_platforms_follow_the_given_table() -> anyhow::Result<()> {
    let records = object(json!({"p": {"type": "derivation"}}))?;
    let kept = filter_supported_in(system::RISCV64_LINUX, records.clone(), TargetTable::defaults());
    assert!(kept.is_empty());
    let kept_all = filter_supported_in(system::RISCV64_LINUX, records, TargetTable::all());
    assert_eq!(kept_all.len(), 1);
    Ok(())
}

#[rstest]
fn unknown_targets_need_explicit_listing() -> anyhow::Result<()> {
    let records = object(json!({
        "implicit": {"type": "derivation"},
        "explicit": {"type": "derivation", "meta": {"platforms": ["plan9-x86"]}}
    }))?;
    let kept = filter_supported("plan9-x86", records);
    assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["explicit"]);
    Ok(())
}
