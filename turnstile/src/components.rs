//! Models and libraries.
//!
//! Components are built on demand by name. A model is built from nothing, a
//! library from the running application. Names are normalized with an
//! upper-case first letter, so `user` and `User` name the same model.

use std::{any::Any, collections::BTreeMap, fmt, sync::Arc};
use turnstile_core::{App, ComponentKind, DispatchError};
use turnstile_std::path::naming;

/// A boxed component.
pub type Component = Box<dyn Any + Send>;

/// Builds a model.
pub type ModelFactory = Arc<dyn Fn() -> Component + Send + Sync>;

/// Builds a library with access to the application.
pub type LibraryFactory = Arc<dyn Fn(&dyn App) -> Component + Send + Sync>;

/// A library built from the running application.
pub trait FromApp: Any + Send {
    /// Build the library.
    fn from_app(app: &dyn App) -> Self
    where
        Self: Sized;
}

/// Named model and library factories.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    models: BTreeMap<String, ModelFactory>,
    libraries: BTreeMap<String, LibraryFactory>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field("libraries", &self.libraries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every component registered via `inventory`.
    pub fn with_registered() -> Self {
        let mut registry = Self::new();
        for reg in inventory::iter::<ModelRegistration> {
            registry.register_model(reg.name, reg.factory);
        }
        for reg in inventory::iter::<LibraryRegistration> {
            registry.register_library(reg.name, reg.factory);
        }
        registry
    }

    /// Register a model factory.
    pub fn register_model<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.models.insert(naming::capitalize(name), Arc::new(factory));
        self
    }

    /// Register a library factory.
    pub fn register_library<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(&dyn App) -> Component + Send + Sync + 'static,
    {
        self.libraries
            .insert(naming::capitalize(name), Arc::new(factory));
        self
    }

    /// Check if a component is registered.
    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        let name = naming::capitalize(name);
        match kind {
            ComponentKind::Model => self.models.contains_key(&name),
            ComponentKind::Library => self.libraries.contains_key(&name),
        }
    }

    /// Build a fresh component.
    pub fn build(
        &self,
        kind: ComponentKind,
        name: &str,
        app: &dyn App,
    ) -> Result<Component, DispatchError> {
        let name = naming::capitalize(name);
        let component = match kind {
            ComponentKind::Model => self.models.get(&name).map(|factory| factory()),
            ComponentKind::Library => self.libraries.get(&name).map(|factory| factory(app)),
        };
        component.ok_or(DispatchError::UnknownComponent { kind, name })
    }
}

/// Registration entry for a model in the global registry.
pub struct ModelRegistration {
    /// Model name.
    pub name: &'static str,
    /// Builds the model.
    pub factory: fn() -> Component,
}

impl ModelRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, factory: fn() -> Component) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(ModelRegistration);

/// Registration entry for a library in the global registry.
pub struct LibraryRegistration {
    /// Library name.
    pub name: &'static str,
    /// Builds the library.
    pub factory: fn(&dyn App) -> Component,
}

impl LibraryRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, factory: fn(&dyn App) -> Component) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(LibraryRegistration);
