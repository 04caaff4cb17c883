//! Logging Plugin - Observability for dispatched actions.

use turnstile_core::{
    ACTION_AFTER, ACTION_BEFORE, BoxError, HookContext, MethodDescriptor, Plugin, unknown_hook,
};

/// A plugin that logs every action around which the pipeline raises hooks.
///
/// It declares both pipeline hooks and never fails.
///
/// # Example
///
/// ```rust,ignore
/// use turnstile::{PluginCatalog, hooks::LoggingPlugin};
///
/// let plugins = PluginCatalog::new()
///     .with(LoggingPlugin::NAME, || Box::new(LoggingPlugin::new()));
/// ```
#[derive(Debug, Clone)]
pub struct LoggingPlugin {
    label: &'static str,
}

impl LoggingPlugin {
    /// Identity under which the plugin is usually registered.
    pub const NAME: &'static str = "Logging";

    const METHODS: &'static [MethodDescriptor] = &[
        MethodDescriptor::public(ACTION_BEFORE),
        MethodDescriptor::public(ACTION_AFTER),
    ];

    /// Create a new `LoggingPlugin` with a default label.
    pub fn new() -> Self {
        Self { label: "dispatch" }
    }

    /// Create a new `LoggingPlugin` with a custom label.
    ///
    /// The label is used in log messages to tell pipelines apart.
    pub fn labeled(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for LoggingPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for LoggingPlugin {
    fn methods(&self) -> &'static [MethodDescriptor] {
        Self::METHODS
    }

    fn call_hook(&mut self, hook: &str, ctx: &mut HookContext<'_>) -> Result<(), BoxError> {
        let controller = ctx.controller.name();
        match hook {
            ACTION_BEFORE => {
                tracing::debug!(label = %self.label, controller, params = ?ctx.params, "Action starting");
            }
            ACTION_AFTER => {
                tracing::debug!(label = %self.label, controller, "Action finished");
            }
            other => return Err(unknown_hook(Self::NAME, other)),
        }
        Ok(())
    }
}
