//! The application: settings, catalogs, plugins and a view, wired into the
//! dispatch pipeline.

use crate::{
    components::{Component, ComponentRegistry, FromApp},
    fault::catch_fault,
    settings::{Settings, SourceMode},
};
use std::{
    any::Any,
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};
use turnstile_core::{
    App, ComponentKind, ConfigValue, Controller, DispatchError, Params, Plugin, TurnstileError,
    View,
};
use turnstile_std::{
    BufferView, ControllerCatalog, DirectorySource, DispatchOutcome, Dispatcher, FileSystemSources,
    HookInvoker, PathResolver, PluginCatalog, PluginRegistry, RequestPath, SharedRegistry,
};

/// The application context handed to controllers, plugins and libraries.
#[derive(Debug)]
pub struct AppContext {
    vendor: String,
    vendor_path: PathBuf,
    config: HashMap<String, ConfigValue>,
    components: ComponentRegistry,
}

impl App for AppContext {
    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn vendor_path(&self) -> &Path {
        &self.vendor_path
    }

    fn config(&self, key: &str) -> Option<&ConfigValue> {
        self.config.get(key)
    }

    fn component(
        &self,
        kind: ComponentKind,
        name: &str,
    ) -> Result<Box<dyn Any + Send>, DispatchError> {
        self.components.build(kind, name, self)
    }
}

/// Where plugin candidates come from.
enum PluginDiscovery {
    Catalog,
    Directory(DirectorySource),
}

/// A configured application.
///
/// # Example
///
/// ```rust,ignore
/// let mut app = Application::builder()
///     .settings(Settings::load("turnstile.toml")?)
///     .build(BufferView::new());
/// app.load_plugins();
/// let page = app.handle("public/blog/show/12/")?;
/// ```
pub struct Application<V: View = BufferView> {
    context: AppContext,
    view: V,
    dispatcher: Dispatcher,
    plugin_catalog: PluginCatalog,
    discovery: PluginDiscovery,
    plugins: SharedRegistry,
    raised: Vec<String>,
}

impl Application {
    /// Start building an application.
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }
}

impl<V: View> Application<V> {
    /// Dispatch a normalized request path.
    pub fn dispatch(&mut self, path: &RequestPath) -> Result<DispatchOutcome, TurnstileError> {
        self.raised.clear();
        let hooks = HookInvoker::snapshot(&self.plugins);
        let outcome = self
            .dispatcher
            .dispatch(path, &self.context, &mut self.view, &hooks)?;

        self.raised
            .extend(outcome.raised.iter().map(|hook| hook.to_string()));
        info!(
            path = %path,
            controller = %outcome.controller,
            action = %outcome.action,
            not_found = outcome.not_found,
            "Dispatched"
        );
        Ok(outcome)
    }

    /// Normalize a raw query path and dispatch it.
    pub fn dispatch_controller(&mut self, query: &str) -> Result<DispatchOutcome, TurnstileError> {
        self.dispatch(&RequestPath::from_query(query))
    }

    /// Push the vendor identity into the view and render it.
    pub fn serve(&mut self) -> Result<String, TurnstileError> {
        self.view
            .set_vendor(&self.context.vendor, &self.context.vendor_path);
        self.view.render().map_err(TurnstileError::Render)
    }

    /// Dispatch a raw query path and serve the result.
    pub fn handle(&mut self, query: &str) -> Result<String, TurnstileError> {
        self.dispatch_controller(query)?;
        self.serve()
    }

    /// Like [`Application::handle`], with panics converted into faults.
    pub fn handle_guarded(&mut self, query: &str) -> Result<String, TurnstileError> {
        catch_fault(|| self.handle(query))?
    }

    /// Rediscover plugins and publish the new registry.
    pub fn load_plugins(&self) -> Arc<PluginRegistry> {
        match &self.discovery {
            PluginDiscovery::Catalog => {
                self.plugins.rebuild(&self.plugin_catalog, &self.plugin_catalog)
            }
            PluginDiscovery::Directory(dir) => self.plugins.rebuild(dir, &self.plugin_catalog),
        }
    }

    /// The current plugin registry.
    pub fn plugins(&self) -> Arc<PluginRegistry> {
        self.plugins.load()
    }

    /// Raise any hook on the registered plugins.
    ///
    /// Returns how many plugins were invoked.
    pub fn register_hook(
        &mut self,
        hook: &str,
        controller: &mut dyn Controller,
        params: &Params,
    ) -> Result<usize, TurnstileError> {
        self.raised.push(hook.to_string());
        debug!(hook, controller = controller.name(), "Raising hook");
        let invoked = HookInvoker::snapshot(&self.plugins).invoke(
            hook,
            &self.context,
            controller,
            &mut self.view,
            params,
        )?;
        Ok(invoked)
    }

    /// Hooks raised since the last dispatch started, in order.
    ///
    /// Each dispatch clears the list, so it holds the current request's
    /// hooks plus any raised through [`Application::register_hook`] after it.
    pub fn raised_hooks(&self) -> &[String] {
        &self.raised
    }

    /// Look up a configuration value.
    pub fn config(&self, key: &str) -> Option<&ConfigValue> {
        self.context.config.get(key)
    }

    /// Set a configuration value.
    pub fn set_config(&mut self, key: &str, value: impl Into<ConfigValue>) -> &mut Self {
        self.context.config.insert(key.to_string(), value.into());
        self
    }

    /// Build a registered model.
    pub fn model<T: Any>(&self, name: &str) -> Result<Box<T>, DispatchError> {
        (&self.context as &dyn App).model(name)
    }

    /// Build a registered library.
    pub fn library<T: Any>(&self, name: &str) -> Result<Box<T>, DispatchError> {
        (&self.context as &dyn App).library(name)
    }

    /// The application context.
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Builder for [`Application`].
///
/// Catalogs start with every `inventory` registration; explicit
/// registrations replace them on identity collision.
pub struct ApplicationBuilder {
    settings: Settings,
    controllers: ControllerCatalog,
    plugins: PluginCatalog,
    components: ComponentRegistry,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            controllers: ControllerCatalog::with_registered(),
            plugins: PluginCatalog::with_registered(),
            components: ComponentRegistry::with_registered(),
        }
    }

    /// Replace the settings.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the vendor name.
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.settings.vendor = vendor.into();
        self
    }

    /// Set the vendor path.
    pub fn vendor_path(mut self, path: &str) -> Self {
        self.settings = self.settings.with_vendor_path(path);
        self
    }

    /// Register a controller factory.
    pub fn controller<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.controllers.register(name, factory);
        self
    }

    /// Register a plugin factory.
    pub fn plugin<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        self.plugins.register(name, factory);
        self
    }

    /// Register a model factory.
    pub fn model<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.components.register_model(name, factory);
        self
    }

    /// Register a library type.
    pub fn library<L: FromApp>(mut self, name: &str) -> Self {
        self.components
            .register_library(name, |app| Box::new(L::from_app(app)));
        self
    }

    /// Build the application around a view.
    ///
    /// Plugins are not discovered until [`Application::load_plugins`].
    pub fn build<V: View>(self, view: V) -> Application<V> {
        let settings = self.settings;
        let layout = settings.layout();
        let controllers = Arc::new(self.controllers);

        let resolver = match settings.sources {
            SourceMode::Catalog => PathResolver::new(settings.defaults(), Arc::clone(&controllers)),
            SourceMode::Filesystem => {
                PathResolver::new(settings.defaults(), FileSystemSources::new(layout.clone()))
            }
        };
        let discovery = match settings.plugins {
            SourceMode::Catalog => PluginDiscovery::Catalog,
            SourceMode::Filesystem => PluginDiscovery::Directory(DirectorySource::new(
                layout.plugin_dir(),
                layout.extension(),
            )),
        };

        let context = AppContext {
            vendor: settings.vendor,
            vendor_path: PathBuf::from(settings.vendor_path),
            config: settings.config.into_iter().collect(),
            components: self.components,
        };
        info!(
            vendor = %context.vendor,
            vendor_path = %context.vendor_path.display(),
            controllers = controllers.len(),
            "Application built"
        );

        Application {
            context,
            view,
            dispatcher: Dispatcher::new(resolver, controllers),
            plugin_catalog: self.plugins,
            discovery,
            plugins: SharedRegistry::default(),
            raised: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstile_core::MethodDescriptor;
    use turnstile_std::testing::{CallLog, ScriptedController};

    const INDEX: &[MethodDescriptor] = &[MethodDescriptor::public("index")];

    fn app(log: &CallLog) -> Application {
        Application::builder()
            .vendor("Game")
            .vendor_path("vendor")
            .controller("Index", ScriptedController::new("Index", INDEX, log.clone()).factory())
            .controller(
                "NotFound",
                ScriptedController::new("NotFound", INDEX, log.clone()).factory(),
            )
            .build(BufferView::new())
    }

    #[test]
    fn test_serve_pushes_vendor() {
        let log = CallLog::new();
        let mut app = app(&log);
        let page = app.handle("").unwrap();

        assert!(page.starts_with("# Game (vendor/)"));
        assert!(page.contains("action: index"));
        assert_eq!(app.view().vendor(), Some("Game"));
    }

    #[test]
    fn test_config_round_trip() {
        let log = CallLog::new();
        let mut app = app(&log);
        assert!(app.config("missing").is_none());

        app.set_config("answer", 42i64);
        assert_eq!(app.config("answer").and_then(|v| v.as_integer()), Some(42));
        assert_eq!(app.context().config("answer").and_then(|v| v.as_integer()), Some(42));
    }

    #[test]
    fn test_raised_hooks_are_recorded() {
        let log = CallLog::new();
        let mut app = app(&log);
        app.dispatch_controller("public/index/").unwrap();

        let mut controller = ScriptedController::new("Index", INDEX, log.clone());
        let invoked = app
            .register_hook("menu", &mut controller, &Params::new())
            .unwrap();

        assert_eq!(invoked, 0);
        assert_eq!(app.raised_hooks(), ["actionBefore", "actionAfter", "menu"]);
    }

    #[test]
    fn test_raised_hooks_reset_per_dispatch() {
        let log = CallLog::new();
        let mut app = app(&log);

        for _ in 0..3 {
            app.dispatch_controller("public/index/").unwrap();
            assert_eq!(app.raised_hooks(), ["actionBefore", "actionAfter"]);
        }
    }
}
