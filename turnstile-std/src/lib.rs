//! # turnstile-std
//!
//! Standard implementations for the Turnstile request-dispatch pipeline.
//!
//! This crate provides:
//! - **Path resolution**: [`RequestPath`], [`PathResolver`], [`SourceLayout`]
//! - **Custom routes**: [`CompiledRoute`], [`RouteMatcher`]
//! - **Catalogs**: [`ControllerCatalog`], [`PluginCatalog`]
//! - **Plugins**: [`PluginRegistry`], [`SharedRegistry`], [`HookInvoker`]
//! - **Dispatch**: [`ActionInvoker`], [`Dispatcher`]
//! - **Standard hooks**: [`hooks::LoggingPlugin`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use turnstile_core;

// Modules
pub mod action;
pub mod catalog;
pub mod dispatch;
pub mod hooks;
pub mod path;
pub mod plugins;
pub mod routing;
pub mod testing;
pub mod view;

pub use action::{ActionInvoker, Invocation};
pub use catalog::{
    Catalog, ControllerCatalog, ControllerRegistration, Factory, PluginCatalog,
    PluginRegistration,
};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use inventory;
pub use path::{
    Defaults, FileSystemSources, PathResolver, RequestPath, Resolution, SourceCheck,
    SourceLayout,
};
pub use plugins::{
    DirectorySource, HookInvoker, PluginDescriptor, PluginRegistry, PluginSource,
    SharedRegistry,
};
pub use routing::{CompiledRoute, RouteCache, RouteMatch, RouteMatcher};
pub use view::BufferView;
