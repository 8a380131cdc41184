//! Integration tests for the registry public API against a mock HTTP server.

use httpmock::prelude::*;
use regkit::config::{load_config, EnvVars};
use regkit::error::RegistryError;
use regkit::registry::{
    discover_namespaces, ensure_registries_configured, resolve_registry_tree, FetchOptions,
    BareStyle, ItemType, Registry, RegistryItem, RegistrySettings,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn project(config: serde_json::Value) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("components.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
    temp
}

fn acme_project(server: &MockServer) -> TempDir {
    project(json!({
        "registries": { "@acme": server.url("/acme/{name}.json") }
    }))
}

fn registry(temp: &TempDir, server: &MockServer, env: EnvVars) -> Registry {
    let config = load_config(temp.path()).unwrap();
    let env = env.with("REGISTRY_URL", server.url("/r"));
    Registry::new(config, RegistrySettings::from_env(env))
}

fn item(name: &str, registry_dependencies: &[&str]) -> serde_json::Value {
    json!({
        "name": name,
        "type": "registry:ui",
        "dependencies": [format!("{name}-dep")],
        "registryDependencies": registry_dependencies,
        "files": [{ "path": format!("ui/{name}.tsx"), "type": "registry:ui", "content": name }]
    })
}

#[test]
fn fetch_sends_expanded_params_and_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/acme/button.json")
            .query_param("v", "2")
            .header("authorization", "Bearer secret");
        then.status(200).json_body(item("button", &[]));
    });

    let temp = project(json!({
        "registries": {
            "@acme": {
                "url": server.url("/acme/{name}.json"),
                "params": { "v": "${API_VERSION}" },
                "headers": { "Authorization": "Bearer ${TOKEN}" }
            }
        }
    }));
    let env = EnvVars::new().with("TOKEN", "secret").with("API_VERSION", "2");
    let registry = registry(&temp, &server, env);

    let item = registry.fetch_item("@acme/button").unwrap();

    assert_eq!(item.name, "button");
    assert_eq!(item.item_type, ItemType::Ui);
    mock.assert_calls(1);
}

#[test]
fn missing_env_vars_fail_before_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/acme/button.json");
        then.status(200).json_body(item("button", &[]));
    });

    let temp = project(json!({
        "registries": {
            "@acme": {
                "url": server.url("/acme/{name}.json"),
                "headers": { "Authorization": "Bearer ${TOKEN}", "X-Org": "${ORG}" }
            }
        }
    }));
    let registry = registry(&temp, &server, EnvVars::new());

    let err = registry.fetch_item("@acme/button").unwrap_err();

    match err {
        RegistryError::MissingEnvVars { registry, names } => {
            assert_eq!(registry, "@acme");
            assert_eq!(names, vec!["TOKEN", "ORG"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_calls(0);
}

#[test]
fn http_statuses_map_to_error_variants() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/missing.json");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/private.json");
        then.status(401);
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/blocked.json");
        then.status(403);
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/broken.json");
        then.status(500)
            .json_body(json!({ "error": "internal", "detail": "database offline" }));
    });

    let temp = acme_project(&server);
    let registry = registry(&temp, &server, EnvVars::new());

    assert!(matches!(
        registry.fetch_item("@acme/missing"),
        Err(RegistryError::NotFound { .. })
    ));
    assert!(matches!(
        registry.fetch_item("@acme/private"),
        Err(RegistryError::Unauthorized { .. })
    ));
    assert!(matches!(
        registry.fetch_item("@acme/blocked"),
        Err(RegistryError::Forbidden { .. })
    ));

    let err = registry.fetch_item("@acme/broken").unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    match err {
        RegistryError::Fetch { body, .. } => {
            assert_eq!(body.as_deref(), Some("[internal] database offline"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn repeated_fetches_hit_the_server_once() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/acme/card.json");
        then.status(200).json_body(item("card", &[]));
    });

    let temp = acme_project(&server);
    let registry = registry(&temp, &server, EnvVars::new());

    registry.fetch_item("@acme/card").unwrap();
    registry.fetch_item("@acme/card").unwrap();
    let batch = registry.fetch_items(&["@acme/card".to_string(), "@acme/card".to_string()]);

    assert!(batch.iter().all(Result::is_ok));
    mock.assert_calls(1);
}

#[test]
fn disabling_the_cache_refetches() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/acme/card.json");
        then.status(200).json_body(item("card", &[]));
    });

    let temp = acme_project(&server);
    let registry =
        registry(&temp, &server, EnvVars::new()).with_options(FetchOptions { use_cache: false });

    registry.fetch_item("@acme/card").unwrap();
    registry.fetch_item("@acme/card").unwrap();

    mock.assert_calls(2);
}

#[test]
fn failed_fetches_are_retried() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/acme/flaky.json");
        then.status(503);
    });

    let temp = acme_project(&server);
    let registry = registry(&temp, &server, EnvVars::new());

    assert!(registry.fetch_item("@acme/flaky").is_err());
    failing.assert_calls(1);
    failing.delete();

    let healthy = server.mock(|when, then| {
        when.method(GET).path("/acme/flaky.json");
        then.status(200).json_body(item("flaky", &[]));
    });

    assert_eq!(registry.fetch_item("@acme/flaky").unwrap().name, "flaky");
    healthy.assert_calls(1);
}

#[test]
fn bare_names_resolve_through_the_builtin_registry() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/r/styles/new-york/button.json");
        then.status(200).json_body(item("button", &[]));
    });

    let temp = project(json!({}));
    let registry = registry(&temp, &server, EnvVars::new());

    assert_eq!(registry.fetch_item("button").unwrap().name, "button");
    mock.assert_calls(1);
}

#[test]
fn bare_names_can_use_a_fixed_style() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/r/styles/default/button.json");
        then.status(200).json_body(item("button", &[]));
    });

    let temp = project(json!({ "style": "new-york" }));
    let config = load_config(temp.path()).unwrap();
    let settings =
        RegistrySettings::from_env(EnvVars::new().with("REGISTRY_URL", server.url("/r")))
            .with_bare_style(BareStyle::Fixed("default".to_string()));
    let registry = Registry::new(config, settings);

    assert_eq!(registry.fetch_item("button").unwrap().name, "button");
    mock.assert_calls(1);
}

#[test]
fn tree_resolution_handles_cycles_and_dead_ends() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/a.json");
        then.status(200)
            .json_body(item("a", &["@acme/b", "@acme/missing"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/b.json");
        then.status(200).json_body(item("b", &["@acme/a"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/missing.json");
        then.status(404);
    });

    let temp = acme_project(&server);
    let registry = registry(&temp, &server, EnvVars::new());

    let tree = resolve_registry_tree(&registry, &["@acme/a".to_string()]).unwrap();

    assert_eq!(tree.names(), vec!["b", "a"]);
    assert_eq!(tree.dependencies, vec!["b-dep", "a-dep"]);
    let paths: Vec<&str> = tree.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["ui/b.tsx", "ui/a.tsx"]);
}

#[test]
fn unconfigured_dependency_is_a_setup_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/a.json");
        then.status(200).json_body(item("a", &["@ghost/x"]));
    });

    let temp = acme_project(&server);
    let registry = registry(&temp, &server, EnvVars::new());

    let err = resolve_registry_tree(&registry, &["@acme/a".to_string()]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::NotConfigured {
            registry: Some("@ghost".to_string())
        }
    );
}

#[test]
fn index_prepends_a_theme_item() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/styles/new-york/index.json");
        then.status(200).json_body(json!({
            "name": "index",
            "type": "registry:style",
            "dependencies": ["tw-animate-css"]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/r/colors/neutral.json");
        then.status(200).json_body(json!({
            "inlineColors": { "light": { "background": "white" }, "dark": { "background": "neutral-950" } },
            "cssVars": {
                "light": { "background": "0 0% 100%" },
                "dark": { "background": "0 0% 3.9%" }
            }
        }));
    });

    let temp = project(json!({}));
    let registry = registry(&temp, &server, EnvVars::new());

    let tree = resolve_registry_tree(&registry, &["index".to_string()]).unwrap();

    assert_eq!(tree.items[0].item_type, ItemType::Theme);
    assert_eq!(tree.items[1].name, "index");
    let css_vars = tree.css_vars.unwrap();
    assert_eq!(css_vars["light"]["background"], "0 0% 100%");
    assert_eq!(css_vars["light"]["radius"], "0.5rem");
    assert_eq!(css_vars["dark"]["background"], "0 0% 3.9%");
}

#[test]
fn namespaces_are_discovered_across_the_graph() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/a.json");
        then.status(200)
            .json_body(item("a", &["@acme/b", "@other/x", "@shadcn/button"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/b.json");
        then.status(200).json_body(item("b", &["@third/y"]));
    });

    let temp = acme_project(&server);
    let registry = registry(&temp, &server, EnvVars::new());

    let namespaces = discover_namespaces(&registry, &["@acme/a".to_string()]);
    assert_eq!(namespaces, vec!["@acme", "@other", "@third"]);
}

#[test]
fn registries_index_configures_missing_namespaces() {
    let server = MockServer::start();
    let index = server.mock(|when, then| {
        when.method(GET).path("/r/registries.json");
        then.status(200).json_body(json!({
            "@other": server.url("/other/{name}.json"),
            "@unused": "https://unused.dev/{name}.json"
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/acme/a.json");
        then.status(200).json_body(item("a", &["@other/x"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/other/x.json");
        then.status(200).json_body(item("x", &[]));
    });

    let temp = acme_project(&server);
    let mut registry = registry(&temp, &server, EnvVars::new());

    let added = ensure_registries_configured(&mut registry, &["@acme/a".to_string()]).unwrap();

    assert_eq!(added.keys().collect::<Vec<_>>(), vec!["@other"]);
    assert!(registry.is_configured("@other"));
    assert!(!registry.is_configured("@unused"));
    index.assert_calls(1);

    let tree = resolve_registry_tree(&registry, &["@acme/a".to_string()]).unwrap();
    assert_eq!(tree.names(), vec!["x", "a"]);
}

#[test]
fn namespaces_missing_from_the_index_are_not_configured() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/registries.json");
        then.status(200).json_body(json!({}));
    });

    let temp = project(json!({}));
    let mut registry = registry(&temp, &server, EnvVars::new());

    let err = ensure_registries_configured(&mut registry, &["@nowhere/x".to_string()])
        .unwrap_err();
    assert!(err.is_setup_error());
    assert_eq!(
        err,
        RegistryError::NotConfigured {
            registry: Some("@nowhere".to_string())
        }
    );
}

#[test]
fn local_file_resolves_to_the_item_as_written() {
    let server = MockServer::start();
    let temp = project(json!({}));
    let document = item("x", &[]);
    fs::write(
        temp.path().join("x.json"),
        serde_json::to_string_pretty(&document).unwrap(),
    )
    .unwrap();
    let registry = registry(&temp, &server, EnvVars::new());

    let tree = resolve_registry_tree(&registry, &["./x.json".to_string()]).unwrap();

    let expected: RegistryItem = serde_json::from_value(document).unwrap();
    assert_eq!(tree.items, vec![expected]);
    assert_eq!(tree.dependencies, vec!["x-dep"]);
    assert_eq!(tree.files[0].content.as_deref(), Some("x"));
}
