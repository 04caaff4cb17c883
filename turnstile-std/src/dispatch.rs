//! The full dispatch pipeline.
//!
//! [`Dispatcher`] chains the stages for one request:
//!
//! 1. resolve the path into a default triple ([`PathResolver`]),
//! 2. instantiate the implied controller and apply its custom routes
//!    ([`RouteMatcher`]),
//! 3. swap in the not-found controller if nothing rescued the request,
//! 4. validate and run the action between its hooks ([`ActionInvoker`]).

use crate::{
    action::ActionInvoker,
    catalog::ControllerCatalog,
    path::{PathResolver, RequestPath, Resolution},
    plugins::HookInvoker,
    routing::RouteMatcher,
};
use std::sync::Arc;
use tracing::debug;
use turnstile_core::{App, Controller, Params, TurnstileError, View};

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Identity of the controller that served the request.
    pub controller: String,
    /// Canonical name of the action that ran.
    pub action: String,
    /// Params passed to the action.
    pub params: Params,
    /// Set when the not-found controller served the request.
    pub not_found: bool,
    /// Set when the action fell back to the default.
    pub fell_back: bool,
    /// Hooks raised, in order.
    pub raised: Vec<&'static str>,
    /// Number of plugin hook calls.
    pub plugin_calls: usize,
}

/// Resolves, routes and invokes requests.
///
/// Holds no per-request state: every dispatch gets a fresh controller.
pub struct Dispatcher {
    resolver: PathResolver,
    controllers: Arc<ControllerCatalog>,
    matcher: RouteMatcher,
    actions: ActionInvoker,
}

impl Dispatcher {
    /// Create a dispatcher serving controllers from `controllers`.
    pub fn new(resolver: PathResolver, controllers: Arc<ControllerCatalog>) -> Self {
        let actions = ActionInvoker::new(resolver.defaults().action.clone());
        Self {
            resolver,
            controllers,
            matcher: RouteMatcher::new(),
            actions,
        }
    }

    /// The path resolver.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// The controller catalog.
    pub fn controllers(&self) -> &ControllerCatalog {
        &self.controllers
    }

    /// The route matcher and its cache.
    pub fn matcher(&self) -> &RouteMatcher {
        &self.matcher
    }

    /// Resolve a path and pick the controller serving it.
    ///
    /// Custom routes are read from the controller implied by resolution (the
    /// default controller when resolution missed). If no route rescues a
    /// miss, the not-found controller takes over.
    pub fn route(
        &self,
        path: &RequestPath,
    ) -> Result<(Resolution, Box<dyn Controller>), TurnstileError> {
        let mut resolution = self.resolver.resolve(path);
        debug!(
            path = %path,
            controller = %resolution.controller,
            action = %resolution.action,
            not_found = resolution.not_found,
            "Path resolved"
        );

        let mut controller = self.controllers.instantiate(&resolution.controller)?;
        let routes = controller.routes();
        self.matcher.apply(&routes, path.as_str(), &mut resolution)?;

        if resolution.not_found {
            let not_found = &self.resolver.defaults().not_found;
            debug!(path = %path, controller = %not_found, "Serving not-found controller");
            controller = self.controllers.instantiate(not_found)?;
            resolution.controller = not_found.clone();
        }

        Ok((resolution, controller))
    }

    /// Dispatch a request end to end.
    pub fn dispatch(
        &self,
        path: &RequestPath,
        app: &dyn App,
        view: &mut dyn View,
        hooks: &HookInvoker,
    ) -> Result<DispatchOutcome, TurnstileError> {
        let (resolution, mut controller) = self.route(path)?;
        let invocation = self.actions.invoke(
            controller.as_mut(),
            &resolution.action,
            resolution.params,
            app,
            view,
            hooks,
        )?;

        Ok(DispatchOutcome {
            controller: resolution.controller,
            action: invocation.action,
            params: invocation.params,
            not_found: resolution.not_found,
            fell_back: invocation.fell_back,
            raised: invocation.raised,
            plugin_calls: invocation.plugin_calls,
        })
    }
}
