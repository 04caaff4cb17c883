use super::registry::{PluginRegistry, SharedRegistry};
use std::sync::Arc;
use tracing::trace;
use turnstile_core::{App, Controller, HookContext, HookError, Params, View};

/// Raises hooks on a registry snapshot.
#[derive(Debug, Clone, Default)]
pub struct HookInvoker {
    registry: Arc<PluginRegistry>,
}

impl HookInvoker {
    /// Raise hooks on the given registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Raise hooks on the current snapshot of a shared registry.
    pub fn snapshot(shared: &SharedRegistry) -> Self {
        Self::new(shared.load())
    }

    /// The registry hooks are raised on.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Raise `hook` on every plugin declaring it, in registry order.
    ///
    /// Each plugin gets a fresh instance. The first failure aborts the
    /// remaining invocations. Returns how many plugins were invoked.
    pub fn invoke(
        &self,
        hook: &str,
        app: &dyn App,
        controller: &mut dyn Controller,
        view: &mut dyn View,
        params: &Params,
    ) -> Result<usize, HookError> {
        let mut invoked = 0;
        for descriptor in self.registry.declaring(hook) {
            trace!(plugin = descriptor.identity(), hook, "Invoking hook");

            let mut plugin = descriptor.instantiate();
            let mut ctx = HookContext::new(app, &mut *controller, &mut *view, params);
            plugin
                .call_hook(hook, &mut ctx)
                .map_err(|source| match source.downcast::<HookError>() {
                    Ok(err) => *err,
                    Err(source) => HookError::PluginFailed {
                        plugin: descriptor.identity().to_string(),
                        hook: hook.to_string(),
                        source,
                    },
                })?;
            invoked += 1;
        }
        Ok(invoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::PluginCatalog,
        testing::{CallLog, RecordingPlugin, RecordingView, ScriptedController, StaticApp},
    };
    use turnstile_core::{ACTION_AFTER, ACTION_BEFORE, MethodDescriptor};

    const ACTIONS: &[MethodDescriptor] = &[MethodDescriptor::public("index")];

    fn invoker(catalog: &PluginCatalog) -> HookInvoker {
        HookInvoker::new(Arc::new(PluginRegistry::discover(catalog, catalog)))
    }

    #[test]
    fn test_every_declaring_plugin_runs_in_identity_order() {
        let log = CallLog::new();
        let catalog = PluginCatalog::new()
            .with(
                "Zeta",
                RecordingPlugin::factory("Zeta", RecordingPlugin::BEFORE_AND_AFTER, log.clone()),
            )
            .with(
                "Alpha",
                RecordingPlugin::factory("Alpha", RecordingPlugin::BEFORE_ONLY, log.clone()),
            );
        let mut controller = ScriptedController::new("Home", ACTIONS, log.clone());
        let mut view = RecordingView::new(log.clone());

        let invoked = invoker(&catalog)
            .invoke(ACTION_BEFORE, &StaticApp::default(), &mut controller, &mut view, &Params::new())
            .unwrap();

        assert_eq!(invoked, 2);
        assert_eq!(log.entries(), vec!["Alpha.actionBefore()", "Zeta.actionBefore()"]);
    }

    #[test]
    fn test_non_declaring_plugins_are_skipped() {
        let log = CallLog::new();
        let catalog = PluginCatalog::new().with(
            "Alpha",
            RecordingPlugin::factory("Alpha", RecordingPlugin::BEFORE_ONLY, log.clone()),
        );
        let mut controller = ScriptedController::new("Home", ACTIONS, log.clone());
        let mut view = RecordingView::new(log.clone());

        let invoked = invoker(&catalog)
            .invoke(ACTION_AFTER, &StaticApp::default(), &mut controller, &mut view, &Params::new())
            .unwrap();

        assert_eq!(invoked, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_empty_registry_invokes_nobody() {
        let log = CallLog::new();
        let mut controller = ScriptedController::new("Home", ACTIONS, log.clone());
        let mut view = RecordingView::new(log.clone());

        let invoked = HookInvoker::default()
            .invoke(ACTION_BEFORE, &StaticApp::default(), &mut controller, &mut view, &Params::new())
            .unwrap();
        assert_eq!(invoked, 0);
    }

    #[test]
    fn test_failure_aborts_remaining_plugins() {
        let log = CallLog::new();
        let catalog = PluginCatalog::new()
            .with(
                "Alpha",
                RecordingPlugin::factory_failing_on(
                    "Alpha",
                    RecordingPlugin::BEFORE_ONLY,
                    log.clone(),
                    ACTION_BEFORE,
                ),
            )
            .with(
                "Beta",
                RecordingPlugin::factory("Beta", RecordingPlugin::BEFORE_ONLY, log.clone()),
            );
        let mut controller = ScriptedController::new("Home", ACTIONS, log.clone());
        let mut view = RecordingView::new(log.clone());

        let err = invoker(&catalog)
            .invoke(ACTION_BEFORE, &StaticApp::default(), &mut controller, &mut view, &Params::new())
            .unwrap_err();

        assert!(matches!(
            err,
            HookError::PluginFailed { ref plugin, ref hook, .. }
                if plugin == "Alpha" && hook == ACTION_BEFORE
        ));
        assert_eq!(log.entries(), vec!["Alpha.actionBefore()"]);
    }

    #[test]
    fn test_hook_sees_params_and_controller() {
        let log = CallLog::new();
        let catalog = PluginCatalog::new().with(
            "Alpha",
            RecordingPlugin::factory("Alpha", RecordingPlugin::BEFORE_ONLY, log.clone()),
        );
        let mut controller = ScriptedController::new("Home", ACTIONS, log.clone());
        let mut view = RecordingView::new(CallLog::new());
        let params: Params = [("page", "2")].into_iter().collect();

        invoker(&catalog)
            .invoke(ACTION_BEFORE, &StaticApp::default(), &mut controller, &mut view, &params)
            .unwrap();

        assert_eq!(log.entries(), vec!["Alpha.actionBefore(page=2)"]);
        assert_eq!(view.get("hook.controller"), Some("Home"));
    }
}
