//! The application context handed to controllers and plugins.
//!
//! Instead of reaching for a global application instance, actions and hooks
//! receive a `&dyn App` through their context.

use crate::error::DispatchError;
use std::{any::Any, fmt, path::Path};

/// A configuration value.
pub use toml::Value as ConfigValue;

/// Kind of an application component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// A model, built without arguments.
    Model,
    /// A library, built with access to the application.
    Library,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Model => f.write_str("model"),
            ComponentKind::Library => f.write_str("library"),
        }
    }
}

/// Read access to the running application.
pub trait App: Send + Sync {
    /// Vendor (namespace root) name.
    fn vendor(&self) -> &str;

    /// Base path holding vendor sources.
    fn vendor_path(&self) -> &Path;

    /// Look up a configuration value.
    fn config(&self, key: &str) -> Option<&ConfigValue>;

    /// Construct a registered component.
    fn component(
        &self,
        kind: ComponentKind,
        name: &str,
    ) -> Result<Box<dyn Any + Send>, DispatchError>;
}

impl dyn App + '_ {
    /// Construct a model and downcast it to `T`.
    pub fn model<T: Any>(&self, name: &str) -> Result<Box<T>, DispatchError> {
        self.typed(ComponentKind::Model, name)
    }

    /// Construct a library and downcast it to `T`.
    pub fn library<T: Any>(&self, name: &str) -> Result<Box<T>, DispatchError> {
        self.typed(ComponentKind::Library, name)
    }

    fn typed<T: Any>(&self, kind: ComponentKind, name: &str) -> Result<Box<T>, DispatchError> {
        self.component(kind, name)?
            .downcast::<T>()
            .map_err(|_| DispatchError::ComponentType {
                kind,
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }
}
