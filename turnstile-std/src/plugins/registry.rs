use super::discovery::PluginSource;
use crate::catalog::{Factory, PluginCatalog};
use arc_swap::ArcSwap;
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::{debug, info};
use turnstile_core::Plugin;

/// A discovered plugin: its identity, declared hooks and factory.
///
/// Immutable for the lifetime of the registry holding it.
#[derive(Clone)]
pub struct PluginDescriptor {
    identity: String,
    hooks: Vec<&'static str>,
    factory: Factory<dyn Plugin>,
}

impl PluginDescriptor {
    /// Describe a plugin, reading its hooks from a probe instance.
    pub fn new(identity: impl Into<String>, factory: Factory<dyn Plugin>) -> Self {
        let hooks = factory().hooks();
        Self {
            identity: identity.into(),
            hooks,
            factory,
        }
    }

    /// Plugin identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Declared hook names, in declaration order.
    pub fn hooks(&self) -> &[&'static str] {
        &self.hooks
    }

    /// Check if the plugin declares the hook.
    pub fn declares(&self, hook: &str) -> bool {
        self.hooks.iter().any(|h| *h == hook)
    }

    /// Create a fresh plugin instance.
    pub fn instantiate(&self) -> Box<dyn Plugin> {
        (self.factory)()
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("identity", &self.identity)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PluginDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity && self.hooks == other.hooks
    }
}

/// Discovered plugins sorted by identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    /// An empty registry: every hook invokes nobody.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the candidates of `source`.
    ///
    /// Candidates without a factory in `catalog` are skipped. The result is
    /// sorted by identity whatever order the source enumerates in, so
    /// discovering the same plugin set twice yields equal registries.
    pub fn discover(source: &dyn PluginSource, catalog: &PluginCatalog) -> Self {
        let mut found = BTreeMap::new();
        for identity in source.candidates() {
            match catalog.factory(&identity) {
                Some(factory) => {
                    let descriptor = PluginDescriptor::new(identity.clone(), factory);
                    found.insert(identity, descriptor);
                }
                None => debug!(plugin = %identity, "No factory registered; skipping"),
            }
        }

        let registry = Self {
            plugins: found.into_values().collect(),
        };
        info!(
            plugins = registry.len(),
            identities = ?registry.identities().collect::<Vec<_>>(),
            "Plugin registry built"
        );
        registry
    }

    /// Iterate plugins in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter()
    }

    /// Iterate the plugins declaring `hook`, in registry order.
    pub fn declaring<'a>(&'a self, hook: &'a str) -> impl Iterator<Item = &'a PluginDescriptor> {
        self.plugins.iter().filter(move |p| p.declares(hook))
    }

    /// Look up a plugin by identity.
    pub fn get(&self, identity: &str) -> Option<&PluginDescriptor> {
        self.plugins
            .binary_search_by(|p| p.identity.as_str().cmp(identity))
            .ok()
            .map(|i| &self.plugins[i])
    }

    /// Plugin identities in registry order.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.identity.as_str())
    }

    /// Number of plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if no plugin was discovered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// A plugin registry that can be rebuilt while being read.
///
/// Readers take a snapshot with [`SharedRegistry::load`] and keep it for the
/// whole dispatch. A rebuild publishes a complete registry in one swap, so a
/// reader never observes a partially populated one.
#[derive(Debug)]
pub struct SharedRegistry {
    current: ArcSwap<PluginRegistry>,
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(PluginRegistry::new())
    }
}

impl SharedRegistry {
    /// Share an initial registry.
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// Snapshot of the current registry.
    pub fn load(&self) -> Arc<PluginRegistry> {
        self.current.load_full()
    }

    /// Replace the current registry.
    pub fn publish(&self, registry: PluginRegistry) {
        self.current.store(Arc::new(registry));
    }

    /// Rediscover plugins and publish the result.
    pub fn rebuild(&self, source: &dyn PluginSource, catalog: &PluginCatalog) -> Arc<PluginRegistry> {
        let registry = Arc::new(PluginRegistry::discover(source, catalog));
        self.current.store(Arc::clone(&registry));
        registry
    }
}
