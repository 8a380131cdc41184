//! Reference resolution against the registry table.
//!
//! [`Registry`] owns the project configuration, the merged registry table
//! (built-ins overlaid by `components.json` entries) and the fetch client.
//! It turns reference strings into fetch targets and registry items.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::cache::FetchResult;
use crate::config::{Config, EnvVars, RegistryConfigEntry};
use crate::error::RegistryError;
use crate::registry::builder::{build_request, RegistryRequest};
use crate::registry::builtin::{builtin_registries, registry_url, BUILTIN_NAMESPACE};
use crate::registry::fetch::{FetchOptions, FetchTarget, RegistryClient};
use crate::registry::item::RegistryItem;
use crate::registry::reference::RegistryReference;

/// Which style bare references resolve with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BareStyle {
    /// Use the project's configured style.
    #[default]
    ProjectStyle,
    /// Always use the given style.
    Fixed(String),
}

/// Runtime settings that do not live in `components.json`.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub env: EnvVars,
    pub bare_style: BareStyle,
    /// Base URL of the default catalog.
    pub registry_url: String,
}

impl RegistrySettings {
    /// Settings derived from an environment snapshot.
    pub fn from_env(env: EnvVars) -> Self {
        let registry_url = registry_url(&env);
        Self {
            env,
            bare_style: BareStyle::default(),
            registry_url,
        }
    }

    pub fn with_bare_style(mut self, bare_style: BareStyle) -> Self {
        self.bare_style = bare_style;
        self
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from_env(EnvVars::from_process())
    }
}

/// The registry front end used by the graph resolver and installer.
#[derive(Debug, Clone)]
pub struct Registry {
    config: Config,
    settings: RegistrySettings,
    registries: BTreeMap<String, RegistryConfigEntry>,
    client: RegistryClient,
    options: FetchOptions,
}

impl Registry {
    /// Create a registry with its own request cache.
    pub fn new(config: Config, settings: RegistrySettings) -> Self {
        let client = RegistryClient::new(config.resolved_paths.cwd.clone());
        Self::with_client(config, settings, client)
    }

    /// Create a registry around an existing client (and its cache).
    pub fn with_client(config: Config, settings: RegistrySettings, client: RegistryClient) -> Self {
        let mut registries = builtin_registries(&settings.registry_url);
        registries.extend(
            config
                .registries()
                .iter()
                .map(|(name, entry)| (name.clone(), entry.clone())),
        );

        Self {
            config,
            settings,
            registries,
            client,
            options: FetchOptions::default(),
        }
    }

    /// Set the fetch options used for every request.
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn client(&self) -> &RegistryClient {
        &self.client
    }

    /// The merged registry table.
    pub fn registries(&self) -> &BTreeMap<String, RegistryConfigEntry> {
        &self.registries
    }

    /// Whether a namespace has an entry (built-in or configured).
    pub fn is_configured(&self, namespace: &str) -> bool {
        self.registries.contains_key(namespace)
    }

    /// Add registry entries to the in-memory configuration.
    pub fn add_registries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, RegistryConfigEntry)>,
    {
        for (name, entry) in entries {
            tracing::debug!(registry = %name, url = entry.url(), "Adding registry");
            self.config
                .components
                .registries
                .insert(name.clone(), entry.clone());
            self.registries.insert(name, entry);
        }
    }

    /// The style used for bare references.
    pub fn bare_style(&self) -> &str {
        match &self.settings.bare_style {
            BareStyle::ProjectStyle => self.config.style(),
            BareStyle::Fixed(style) => style,
        }
    }

    /// Turn a reference into something fetchable.
    pub fn resolve_target(&self, reference: &str) -> Result<FetchTarget, RegistryError> {
        match RegistryReference::parse(reference) {
            RegistryReference::Url(url) => Ok(FetchTarget::Remote(RegistryRequest::new(url))),
            RegistryReference::LocalPath(path) => Ok(FetchTarget::Local(path)),
            RegistryReference::Namespaced { namespace, name } => {
                let entry =
                    self.registries
                        .get(&namespace)
                        .ok_or_else(|| RegistryError::NotConfigured {
                            registry: Some(namespace.clone()),
                        })?;
                let request = build_request(
                    &namespace,
                    &name,
                    entry,
                    Some(self.config.style()),
                    &self.settings.env,
                )?;
                Ok(FetchTarget::Remote(request))
            }
            RegistryReference::Bare(name) => {
                let entry = self.registries.get(BUILTIN_NAMESPACE).ok_or_else(|| {
                    RegistryError::NotConfigured {
                        registry: Some(BUILTIN_NAMESPACE.to_string()),
                    }
                })?;
                let request = build_request(
                    BUILTIN_NAMESPACE,
                    &name,
                    entry,
                    Some(self.bare_style()),
                    &self.settings.env,
                )?;
                Ok(FetchTarget::Remote(request))
            }
        }
    }

    /// Fetch a single item, propagating every failure.
    pub fn fetch_item(&self, reference: &str) -> Result<RegistryItem, RegistryError> {
        let target = self.resolve_target(reference)?;
        let value = self.client.fetch(&target, self.options)?;
        parse_item(target.key(), value)
    }

    /// Fetch several items concurrently, one result per reference.
    pub fn fetch_items(&self, references: &[String]) -> Vec<Result<RegistryItem, RegistryError>> {
        let resolved: Vec<Result<FetchTarget, RegistryError>> = references
            .iter()
            .map(|reference| self.resolve_target(reference))
            .collect();

        let targets: Vec<FetchTarget> = resolved
            .iter()
            .filter_map(|target| target.as_ref().ok().cloned())
            .collect();
        let mut fetched = self.client.fetch_all(&targets, self.options).into_iter();

        resolved
            .into_iter()
            .map(|target| {
                let target = target?;
                let value = fetched.next().unwrap_or_else(|| {
                    Err(RegistryError::Fetch {
                        url: target.key().to_string(),
                        status: None,
                        body: None,
                    })
                })?;
                parse_item(target.key(), value)
            })
            .collect()
    }

    /// Fetch an arbitrary JSON document by URL through the cache.
    pub fn fetch_document(&self, url: &str) -> FetchResult {
        self.client
            .fetch(&FetchTarget::Remote(RegistryRequest::new(url)), self.options)
    }

    /// Drop every cached document.
    pub fn clear_cache(&self) {
        self.client.clear_cache();
    }
}

/// Parse a fetched document into a registry item.
pub fn parse_item(source: &str, value: Value) -> Result<RegistryItem, RegistryError> {
    serde_json::from_value(value).map_err(|e| RegistryError::Parse {
        item: source.to_string(),
        message: e.to_string(),
    })
}
