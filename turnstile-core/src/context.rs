//! Per-call contexts.
//!
//! Both contexts are ephemeral: built for a single action or hook call and
//! dropped right after. They borrow everything they expose.

use crate::{app::App, controller::Controller, params::Params, view::View};

/// Context handed to a controller action.
pub struct Context<'a> {
    /// The running application.
    pub app: &'a dyn App,
    /// The view being prepared for this request.
    pub view: &'a mut dyn View,
}

impl<'a> Context<'a> {
    /// Create a new action context.
    pub fn new(app: &'a dyn App, view: &'a mut dyn View) -> Self {
        Self { app, view }
    }

    /// Assign a view variable.
    pub fn assign(&mut self, key: &str, value: impl Into<String>) {
        self.view.assign(key, value.into());
    }
}

/// Context handed to a plugin hook.
pub struct HookContext<'a> {
    /// The running application.
    pub app: &'a dyn App,
    /// The controller serving the current request.
    pub controller: &'a mut dyn Controller,
    /// The view being prepared for this request.
    pub view: &'a mut dyn View,
    /// Parameters raised with the hook.
    pub params: &'a Params,
}

impl<'a> HookContext<'a> {
    /// Create a new hook context.
    pub fn new(
        app: &'a dyn App,
        controller: &'a mut dyn Controller,
        view: &'a mut dyn View,
        params: &'a Params,
    ) -> Self {
        Self {
            app,
            controller,
            view,
            params,
        }
    }
}
