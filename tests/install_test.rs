//! Integration tests for the `add` workflow against a mock HTTP server.

use httpmock::prelude::*;
use regkit::config::{load_config, EnvVars};
use regkit::files::FixedAnswer;
use regkit::install::{add_components, AddOptions};
use regkit::registry::{Registry, RegistrySettings};
use regkit::RegkitError;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(config: Value) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("components.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
    temp
}

fn registry(root: &Path, server: &MockServer) -> Registry {
    let config = load_config(root).unwrap();
    let env = EnvVars::new().with("REGISTRY_URL", server.url("/r"));
    Registry::new(config, RegistrySettings::from_env(env))
}

fn ui_item(name: &str, registry_dependencies: &[&str]) -> Value {
    json!({
        "name": name,
        "type": "registry:ui",
        "registryDependencies": registry_dependencies,
        "files": [{
            "path": format!("ui/{name}.tsx"),
            "type": "registry:ui",
            "content": format!("export const {name} = 1\n")
        }]
    })
}

#[test]
fn installs_namespaced_items_with_dependencies() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/card.json");
        then.status(200).json_body(ui_item("card", &["@acme/badge"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/badge.json");
        then.status(200).json_body(ui_item("badge", &[]));
    });

    let temp = project(json!({
        "registries": { "@acme": server.url("/acme/{name}.json") }
    }));
    let mut registry = registry(temp.path(), &server);

    let report = add_components(
        &mut registry,
        &["@acme/card".to_string()],
        &AddOptions::default(),
        &mut FixedAnswer(false),
    )
    .unwrap();

    let ui = temp.path().join("components/ui");
    assert_eq!(report.tree.names(), vec!["badge", "card"]);
    assert_eq!(
        report.writes.created,
        vec![ui.join("badge.tsx"), ui.join("card.tsx")]
    );
    assert!(report.added_registries.is_empty());
    assert_eq!(
        fs::read_to_string(ui.join("card.tsx")).unwrap(),
        "export const card = 1\n"
    );
}

#[test]
fn persists_registries_found_in_the_index() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/registries.json");
        then.status(200)
            .json_body(json!({ "@other": server.url("/other/{name}.json") }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/other/tooltip.json");
        then.status(200).json_body(ui_item("tooltip", &[]));
    });

    let temp = project(json!({
        "style": "new-york",
        "aliases": { "components": "@/components", "utils": "@/lib/utils" }
    }));
    let mut registry = registry(temp.path(), &server);

    let report = add_components(
        &mut registry,
        &["@other/tooltip".to_string()],
        &AddOptions::default(),
        &mut FixedAnswer(false),
    )
    .unwrap();

    assert!(report.added_registries.contains_key("@other"));
    assert!(temp.path().join("components/ui/tooltip.tsx").exists());

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("components.json")).unwrap())
            .unwrap();
    assert_eq!(saved["style"], "new-york");
    assert_eq!(saved["aliases"]["utils"], "@/lib/utils");
    assert_eq!(
        saved["registries"]["@other"],
        json!(server.url("/other/{name}.json"))
    );
}

#[test]
fn skip_persist_leaves_components_json_alone() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/registries.json");
        then.status(200)
            .json_body(json!({ "@other": server.url("/other/{name}.json") }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/other/tooltip.json");
        then.status(200).json_body(ui_item("tooltip", &[]));
    });

    let temp = project(json!({ "style": "new-york" }));
    let before = fs::read_to_string(temp.path().join("components.json")).unwrap();
    let mut registry = registry(temp.path(), &server);

    let options = AddOptions {
        skip_persist: true,
        ..Default::default()
    };
    add_components(
        &mut registry,
        &["@other/tooltip".to_string()],
        &options,
        &mut FixedAnswer(false),
    )
    .unwrap();

    assert!(registry.is_configured("@other"));
    assert_eq!(
        fs::read_to_string(temp.path().join("components.json")).unwrap(),
        before
    );
}

#[test]
fn unknown_namespace_fails_without_writing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/registries.json");
        then.status(200).json_body(json!({}));
    });

    let temp = project(json!({}));
    let mut registry = registry(temp.path(), &server);

    let err = add_components(
        &mut registry,
        &["@ghost/card".to_string()],
        &AddOptions::default(),
        &mut FixedAnswer(true),
    )
    .unwrap_err();

    match err {
        RegkitError::Registry(e) => assert!(e.is_setup_error()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!temp.path().join("components").exists());
}

#[test]
fn changed_files_respect_the_overwrite_answer() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/card.json");
        then.status(200).json_body(ui_item("card", &[]));
    });

    let temp = project(json!({
        "registries": { "@acme": server.url("/acme/{name}.json") }
    }));
    let target = temp.path().join("components/ui/card.tsx");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "local edits\n").unwrap();

    let references = ["@acme/card".to_string()];
    let mut registry = registry(temp.path(), &server);

    let declined = add_components(
        &mut registry,
        &references,
        &AddOptions::default(),
        &mut FixedAnswer(false),
    )
    .unwrap();
    assert_eq!(declined.writes.skipped, vec![target.clone()]);
    assert_eq!(fs::read_to_string(&target).unwrap(), "local edits\n");

    let forced = add_components(
        &mut registry,
        &references,
        &AddOptions {
            overwrite: true,
            ..Default::default()
        },
        &mut FixedAnswer(false),
    )
    .unwrap();
    assert_eq!(forced.writes.updated, vec![target.clone()]);
    assert_eq!(fs::read_to_string(&target).unwrap(), "export const card = 1\n");
}
