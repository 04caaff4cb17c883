//! # turnstile - Path-Driven Request Dispatch
//!
//! `turnstile` maps a request path onto a controller action. Plugins observe
//! every action call through named hooks, and controllers may declare their
//! own route patterns that override the default segment mapping.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use turnstile::prelude::*;
//!
//! #[derive(Default)]
//! struct Index;
//!
//! #[turnstile::controller]
//! impl Index {
//!     pub fn index(&mut self, ctx: &mut Context<'_>) {
//!         ctx.assign("title", "Welcome");
//!     }
//! }
//!
//! turnstile::register_controller!(Index);
//!
//! let mut app = Application::builder().vendor("Game").build(BufferView::new());
//! app.load_plugins();
//! let page = app.handle("public/")?;
//! ```
//!
//! ## Pipeline
//!
//! 1. The path is normalized and resolved to a controller, an action and
//!    parameters ([`PathResolver`]).
//! 2. The controller's routes may rewrite the action and parameters
//!    ([`RouteMatcher`]).
//! 3. Unresolved paths are served by the not-found controller.
//! 4. [`ACTION_BEFORE`] is raised, the action runs, [`ACTION_AFTER`] is raised
//!    ([`ActionInvoker`]).

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod app;
mod components;
mod fault;
mod macros;
mod settings;

pub use turnstile_core::{
    ACTION_AFTER,
    ACTION_BEFORE,
    // Contracts
    App,
    // Errors
    BoxError,
    ComponentKind,
    ConfigValue,
    Context,
    Controller,
    DispatchError,
    Fault,
    HookContext,
    HookError,
    // Method tables
    MethodDescriptor,
    MethodFlags,
    // Parameters
    ParamKey,
    Params,
    Plugin,
    RouteError,
    Routes,
    Severity,
    TurnstileError,
    View,
    unknown_action,
    unknown_hook,
};

pub use turnstile_std::{
    // Dispatch
    ActionInvoker,
    // Views
    BufferView,
    // Catalogs
    Catalog,
    // Routing
    CompiledRoute,
    ControllerCatalog,
    ControllerRegistration,
    // Path resolution
    Defaults,
    // Plugins
    DirectorySource,
    DispatchOutcome,
    Dispatcher,
    Factory,
    FileSystemSources,
    HookInvoker,
    Invocation,
    PathResolver,
    PluginCatalog,
    PluginDescriptor,
    PluginRegistration,
    PluginRegistry,
    PluginSource,
    RequestPath,
    Resolution,
    RouteCache,
    RouteMatch,
    RouteMatcher,
    SharedRegistry,
    SourceCheck,
    SourceLayout,
};

pub use app::{AppContext, Application, ApplicationBuilder};
pub use components::{
    Component, ComponentRegistry, FromApp, LibraryFactory, LibraryRegistration, ModelFactory,
    ModelRegistration,
};
pub use fault::{catch_fault, install_fault_hook};
pub use settings::{Settings, SettingsError, SourceMode};

/// Path normalization helpers.
pub mod naming {
    pub use turnstile_std::path::naming::{action_name, capitalize, controller_name};
}

/// Standard plugin implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use turnstile_std::hooks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use turnstile_std::testing::*;
}

/// Prelude module - common imports for Turnstile.
///
/// # Usage
///
/// ```rust,ignore
/// use turnstile::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App, Application, BoxError, BufferView, Context, Controller, HookContext, Params, Plugin,
        RequestPath, Settings, TurnstileError, View,
    };
}

#[cfg(feature = "macros")]
pub use turnstile_macros::{controller, plugin};

pub use inventory;
