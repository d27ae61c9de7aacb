//! End-to-end tests combining fan-out, composition, and the output layout.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::{Result, anyhow};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};
use target_compose::merge::until_depth;
use target_compose::pattern::SimplePattern;
use target_compose::program::{BuildArtifact, program_descriptor};
use target_compose::{
    BoxError, ComposeError, FragmentComposer, Record, each_target, each_target_map, from_record,
    merge_records_with,
};
use test_helpers::calls::CallLog;
use test_helpers::json::object;

struct Workspace {
    name: &'static str,
    targets: Vec<&'static str>,
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        name: "hello",
        targets: vec!["x86_64-linux", "aarch64-darwin"],
    }
}

fn record(value: Value) -> Result<Record, BoxError> {
    object(value).map_err(|err| BoxError::from(err.to_string()))
}

fn packages(ws: &Workspace) -> Result<Record, BoxError> {
    let tree = SimplePattern::new(ws.name)
        .with_targets(&ws.targets)
        .build(|target: &str| {
            let mut tree = Record::new();
            tree.insert(
                ws.name.to_owned(),
                json!({"type": "derivation", "name": format!("{}-{target}", ws.name)}),
            );
            Ok::<_, BoxError>(tree)
        })
        .map_err(|err| BoxError::from(err.to_string()))?;
    Ok(tree)
}

fn apps(ws: &Workspace) -> Result<Record, BoxError> {
    let by_target = each_target_map(&ws.targets, |target: &str| {
        let artifact = BuildArtifact::new(format!("/store/{target}"), ws.name);
        let mut apps = Record::new();
        apps.insert(
            "default".to_owned(),
            Value::Object(program_descriptor(&artifact).to_record().map_err(|err| {
                BoxError::from(err.to_string())
            })?),
        );
        Ok::<_, BoxError>(apps)
    })
    .map_err(|err| BoxError::from(err.to_string()))?;
    record(json!({"apps": by_target}))
}

fn overrides(_: &Workspace) -> Result<Record, BoxError> {
    record(json!({"packages": {"aarch64-darwin": {"default": {"pinned": true}}}}))
}

#[rstest]
fn fragments_compose_per_target_outputs(workspace: Workspace) -> Result<()> {
    let mut composer: FragmentComposer<'_, Workspace> = FragmentComposer::new();
    composer
        .push_labelled("packages", packages)
        .push_labelled("apps", apps)
        .push_labelled("overrides", overrides);
    let outputs = composer
        .compose(&workspace)
        .map_err(|err| anyhow!(err.to_string()))?;

    assert_eq!(
        outputs["apps"]["x86_64-linux"]["default"],
        json!({"kind": "executable", "path": "/store/x86_64-linux/bin/hello"})
    );
    assert_eq!(
        outputs["packages"]["aarch64-darwin"]["default"],
        json!({"type": "derivation", "name": "hello-aarch64-darwin", "pinned": true})
    );
    assert_eq!(
        outputs["packages"]["x86_64-linux"]["default"]["name"],
        json!("hello-x86_64-linux")
    );
    Ok(())
}

#[rstest]
fn failing_fragment_is_reported_by_label(workspace: Workspace) {
    let calls = CallLog::new();
    let mut composer: FragmentComposer<'_, Workspace> = FragmentComposer::new();
    composer
        .push_labelled("packages", packages)
        .push_labelled("broken", |_: &Workspace| {
            Err::<Record, _>(BoxError::from("missing input"))
        })
        .push(|_: &Workspace| {
            calls.record("after");
            record(json!({}))
        });

    let err = composer
        .compose(&workspace)
        .expect_err("broken fragment should abort composition");
    assert_eq!(err.fragment_index(), Some(1));
    assert_eq!(
        err.to_string(),
        "fragment #1 ('broken') failed to load: missing input"
    );
    assert_eq!(calls.count(), 0);
}

#[rstest]
fn producer_failures_surface_inside_fragments(workspace: Workspace) {
    let fragment = |ws: &Workspace| -> Result<Record, BoxError> {
        let outputs = each_target(&ws.targets, |target: &str| {
            if target == "aarch64-darwin" {
                Err(BoxError::from("no darwin builder"))
            } else {
                record(json!({"ok": true}))
            }
        })?;
        Ok(outputs)
    };
    let mut composer: FragmentComposer<'_, Workspace> = FragmentComposer::new();
    composer.push(fragment);

    let err = composer.compose(&workspace).expect_err("producer failure");
    let ComposeError::Fragment { source, .. } = err.as_ref() else {
        panic!("expected a fragment failure, got {err:?}");
    };
    assert!(
        source.to_string().contains("'aarch64-darwin'"),
        "cause should name the target: {source}"
    );
}

#[derive(Debug, Deserialize, PartialEq)]
struct Shell {
    packages: Vec<String>,
    env: std::collections::BTreeMap<String, String>,
}

#[rstest]
fn depth_limited_merge_replaces_nested_settings() -> Result<()> {
    let base = object(json!({"shell": {"packages": ["git"], "env": {"A": "1", "B": "2"}}}))?;
    let local = object(json!({"shell": {"env": {"A": "9"}}}))?;

    let merged = merge_records_with(&until_depth(2), base, local);
    let shell_record = object(merged["shell"].clone())?;
    let shell: Shell = from_record(shell_record).map_err(|err| anyhow!(err.to_string()))?;
    assert_eq!(shell.packages, ["git"]);
    assert_eq!(shell.env.len(), 1);
    assert_eq!(shell.env.get("A").map(String::as_str), Some("9"));
    Ok(())
}
