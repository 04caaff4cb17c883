//! Guarded action invocation.

use crate::plugins::HookInvoker;
use tracing::debug;
use turnstile_core::{
    ACTION_AFTER, ACTION_BEFORE, App, Context, Controller, DispatchError, MethodDescriptor,
    Params, TurnstileError, View,
};

/// What an action invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Canonical name of the action that ran.
    pub action: String,
    /// Params passed to the action, without holes.
    pub params: Params,
    /// Set when the requested action was not invokable and the default ran.
    pub fell_back: bool,
    /// Hooks raised, in order.
    pub raised: Vec<&'static str>,
    /// Number of plugin hook calls across all raised hooks.
    pub plugin_calls: usize,
}

/// Validates an action and runs it between the `actionBefore` and
/// `actionAfter` hooks.
#[derive(Debug, Clone)]
pub struct ActionInvoker {
    default_action: String,
}

impl ActionInvoker {
    /// Create an invoker falling back to `default_action`.
    pub fn new(default_action: impl Into<String>) -> Self {
        Self {
            default_action: default_action.into(),
        }
    }

    /// The fallback action name.
    pub fn default_action(&self) -> &str {
        &self.default_action
    }

    /// Pick the action to run.
    ///
    /// An action that is not invokable silently falls back to the default
    /// action. The action segment (positional index 1) is vacated only when
    /// the requested action is used.
    pub fn validate(
        &self,
        controller: &dyn Controller,
        action: &str,
        params: &mut Params,
    ) -> Result<(&'static MethodDescriptor, bool), DispatchError> {
        if let Some(method) = controller.find_action(action) {
            params.vacate(1);
            return Ok((method, false));
        }

        debug!(
            controller = controller.name(),
            action,
            fallback = %self.default_action,
            "Action not invokable; falling back"
        );
        controller
            .find_action(&self.default_action)
            .map(|method| (method, true))
            .ok_or_else(|| DispatchError::MissingAction {
                controller: controller.name().to_string(),
                action: self.default_action.clone(),
            })
    }

    /// Validate and run an action.
    ///
    /// Always raises `actionBefore`, then the action, then `actionAfter`,
    /// whether or not the action fell back. Any failure aborts the rest.
    pub fn invoke(
        &self,
        controller: &mut dyn Controller,
        action: &str,
        mut params: Params,
        app: &dyn App,
        view: &mut dyn View,
        hooks: &HookInvoker,
    ) -> Result<Invocation, TurnstileError> {
        let (method, fell_back) = self.validate(controller, action, &mut params)?;
        let params = params.compact();
        let no_params = Params::new();

        let mut plugin_calls = hooks.invoke(ACTION_BEFORE, app, controller, view, &no_params)?;

        debug!(controller = controller.name(), action = method.name(), "Calling action");
        controller
            .call_action(method.name(), &mut Context::new(app, view), &params)
            .map_err(|source| DispatchError::ActionFailed {
                controller: controller.name().to_string(),
                action: method.name().to_string(),
                source,
            })?;

        plugin_calls += hooks.invoke(ACTION_AFTER, app, controller, view, &no_params)?;

        Ok(Invocation {
            action: method.name().to_string(),
            params,
            fell_back,
            raised: vec![ACTION_BEFORE, ACTION_AFTER],
            plugin_calls,
        })
    }
}

impl Default for ActionInvoker {
    fn default() -> Self {
        Self::new("index")
    }
}
