//! # Plugins
//!
//! Discovery, registry and invocation of plugin hooks.
//!
//! 1. A [`PluginSource`] enumerates candidate identities (files in a plugin
//!    directory, or the names in a [`PluginCatalog`](crate::PluginCatalog)).
//! 2. [`PluginRegistry::discover`] keeps the candidates with a registered
//!    factory, records the hooks each one declares and sorts them by identity.
//! 3. [`SharedRegistry`] publishes complete registries atomically.
//! 4. [`HookInvoker`] raises a hook on every plugin declaring it, in registry
//!    order.

mod discovery;
mod invoker;
mod registry;

pub use discovery::{DirectorySource, PluginSource};
pub use invoker::HookInvoker;
pub use registry::{PluginDescriptor, PluginRegistry, SharedRegistry};
