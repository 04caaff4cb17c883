//! Named factories for controllers and plugins.
//!
//! A catalog maps an identity to a factory producing a fresh instance on
//! every call. Catalogs are filled by hand with [`Catalog::register`], or
//! from the global registry collected via `inventory`:
//!
//! ```rust,ignore
//! turnstile::register_controller!("Blog", BlogController);
//!
//! let controllers = ControllerCatalog::with_registered();
//! assert!(controllers.contains("Blog"));
//! ```

use crate::path::SourceCheck;
use std::{collections::BTreeMap, fmt, sync::Arc};
use turnstile_core::{Controller, DispatchError, Plugin};

/// A shared factory producing boxed instances.
pub type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

/// Identity-keyed factories, iterated in identity order.
pub struct Catalog<T: ?Sized> {
    factories: BTreeMap<String, Factory<T>>,
}

/// Factories for controllers.
pub type ControllerCatalog = Catalog<dyn Controller>;

/// Factories for plugins.
pub type PluginCatalog = Catalog<dyn Plugin>;

impl<T: ?Sized> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Catalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

impl<T: ?Sized> Catalog<T> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one for the identity.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Register a factory (builder style).
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Check if a factory is registered for the identity.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// The factory registered for the identity.
    pub fn factory(&self, name: &str) -> Option<Factory<T>> {
        self.factories.get(name).cloned()
    }

    /// Create a fresh instance.
    pub fn create(&self, name: &str) -> Option<Box<T>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered identities, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Catalog<dyn Controller> {
    /// Catalog holding every controller registered via `inventory`.
    pub fn with_registered() -> Self {
        let mut catalog = Self::new();
        for reg in inventory::iter::<ControllerRegistration> {
            catalog.register(reg.name, reg.factory);
        }
        catalog
    }

    /// Create a fresh controller, failing if none is registered.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Controller>, DispatchError> {
        self.create(name)
            .ok_or_else(|| DispatchError::UnregisteredController(name.to_string()))
    }
}

impl Catalog<dyn Plugin> {
    /// Catalog holding every plugin registered via `inventory`.
    pub fn with_registered() -> Self {
        let mut catalog = Self::new();
        for reg in inventory::iter::<PluginRegistration> {
            catalog.register(reg.name, reg.factory);
        }
        catalog
    }
}

impl SourceCheck for Catalog<dyn Controller> {
    fn controller_exists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Registration entry for a controller in the global registry.
///
/// This struct is submitted to `inventory` for automatic collection.
pub struct ControllerRegistration {
    /// Controller identity.
    pub name: &'static str,
    /// Produces a fresh controller.
    pub factory: fn() -> Box<dyn Controller>,
}

impl ControllerRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, factory: fn() -> Box<dyn Controller>) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(ControllerRegistration);

/// Registration entry for a plugin in the global registry.
///
/// This struct is submitted to `inventory` for automatic collection.
pub struct PluginRegistration {
    /// Plugin identity.
    pub name: &'static str,
    /// Produces a fresh plugin.
    pub factory: fn() -> Box<dyn Plugin>,
}

impl PluginRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, factory: fn() -> Box<dyn Plugin>) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(PluginRegistration);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use turnstile_core::{BoxError, Context, MethodDescriptor, Params, unknown_action};

    struct Home;

    impl Controller for Home {
        fn name(&self) -> &'static str {
            "Home"
        }

        fn actions(&self) -> &'static [MethodDescriptor] {
            const ACTIONS: &[MethodDescriptor] = &[MethodDescriptor::public("index")];
            ACTIONS
        }

        fn call_action(
            &mut self,
            action: &str,
            _ctx: &mut Context<'_>,
            _params: &Params,
        ) -> Result<(), BoxError> {
            Err(unknown_action(self.name(), action))
        }
    }

    fn home() -> Box<dyn Controller> {
        Box::new(Home)
    }

    inventory::submit! {
        ControllerRegistration::new("CatalogProbe", home)
    }

    #[test]
    fn test_names_are_sorted() {
        let catalog = ControllerCatalog::new()
            .with("Zeta", home)
            .with("Alpha", home)
            .with("Mid", home);
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_instantiate_unregistered() {
        let catalog = ControllerCatalog::new();
        let err = catalog.instantiate("Ghost").err().unwrap();
        assert!(matches!(err, DispatchError::UnregisteredController(name) if name == "Ghost"));
    }

    #[test]
    fn test_instances_are_fresh() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let catalog = ControllerCatalog::new().with("Home", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            home()
        });

        catalog.instantiate("Home").unwrap();
        catalog.instantiate("Home").unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_registered_controllers_are_collected() {
        let catalog = ControllerCatalog::with_registered();
        assert!(catalog.contains("CatalogProbe"));
        assert!(catalog.controller_exists("CatalogProbe"));
    }
}
