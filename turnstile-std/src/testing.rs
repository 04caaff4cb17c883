//! Testing utilities for Turnstile.
//!
//! This module provides doubles for the collaborators of the dispatch
//! pipeline, so controllers, plugins and the pipeline itself can be tested
//! without a real application.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of calls
//! - [`RecordingPlugin`]: A plugin that logs every hook it receives
//! - [`ScriptedController`]: A controller that logs every action it runs
//! - [`RecordingView`]: A view that logs vendor pushes and renders
//! - [`StaticApp`]: A fixed application context

use crate::view::BufferView;
use std::{
    any::Any,
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use turnstile_core::{
    ACTION_AFTER, ACTION_BEFORE, App, BoxError, ComponentKind, ConfigValue, Context, Controller,
    DispatchError, HookContext, MethodDescriptor, Params, Plugin, Routes, View, unknown_action,
    unknown_hook,
};

/// Render params as `key=value` pairs, skipping vacated and empty entries.
pub fn format_params(params: &Params) -> String {
    params
        .iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| format!("{k}={v}")))
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered log of calls.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let plugin = RecordingPlugin::new("Audit", RecordingPlugin::BEFORE_ONLY, log.clone());
///
/// // Dispatch...
///
/// assert_eq!(log.entries(), vec!["Audit.actionBefore()"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// Get a copy of the entries.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Recording Plugin
// ============================================================================

/// A plugin that logs every hook it receives as `Name.hook(params)`.
///
/// It also assigns `hook.controller` on the view, so tests can check the
/// plugin saw the serving controller.
#[derive(Debug, Clone)]
pub struct RecordingPlugin {
    name: &'static str,
    methods: &'static [MethodDescriptor],
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl RecordingPlugin {
    /// Declares `actionBefore` only.
    pub const BEFORE_ONLY: &'static [MethodDescriptor] =
        &[MethodDescriptor::public(ACTION_BEFORE)];

    /// Declares `actionAfter` only.
    pub const AFTER_ONLY: &'static [MethodDescriptor] = &[MethodDescriptor::public(ACTION_AFTER)];

    /// Declares both pipeline hooks.
    pub const BEFORE_AND_AFTER: &'static [MethodDescriptor] = &[
        MethodDescriptor::public(ACTION_BEFORE),
        MethodDescriptor::public(ACTION_AFTER),
    ];

    /// Create a recording plugin declaring `methods`.
    pub fn new(name: &'static str, methods: &'static [MethodDescriptor], log: CallLog) -> Self {
        Self {
            name,
            methods,
            log,
            fail_on: None,
        }
    }

    /// Fail (after logging) when `hook` is raised.
    pub fn failing_on(mut self, hook: &'static str) -> Self {
        self.fail_on = Some(hook);
        self
    }

    /// A factory producing fresh recording plugins sharing `log`.
    pub fn factory(
        name: &'static str,
        methods: &'static [MethodDescriptor],
        log: CallLog,
    ) -> impl Fn() -> Box<dyn Plugin> + Send + Sync + 'static {
        move || -> Box<dyn Plugin> { Box::new(Self::new(name, methods, log.clone())) }
    }

    /// A factory producing plugins failing on `hook`.
    pub fn factory_failing_on(
        name: &'static str,
        methods: &'static [MethodDescriptor],
        log: CallLog,
        hook: &'static str,
    ) -> impl Fn() -> Box<dyn Plugin> + Send + Sync + 'static {
        move || -> Box<dyn Plugin> {
            Box::new(Self::new(name, methods, log.clone()).failing_on(hook))
        }
    }
}

impl Plugin for RecordingPlugin {
    fn methods(&self) -> &'static [MethodDescriptor] {
        self.methods
    }

    fn call_hook(&mut self, hook: &str, ctx: &mut HookContext<'_>) -> Result<(), BoxError> {
        if !self.hooks().iter().any(|h| *h == hook) {
            return Err(unknown_hook(self.name, hook));
        }

        self.log
            .push(format!("{}.{}({})", self.name, hook, format_params(ctx.params)));
        ctx.view
            .assign("hook.controller", ctx.controller.name().to_string());

        if self.fail_on == Some(hook) {
            return Err(format!("{} refused {}", self.name, hook).into());
        }
        Ok(())
    }
}

// ============================================================================
// Scripted Controller
// ============================================================================

/// A controller that logs every action it runs as `Name.action(params)`.
///
/// Every call also assigns `action` on the view.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    name: &'static str,
    actions: &'static [MethodDescriptor],
    routes: Routes,
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl ScriptedController {
    /// Create a controller declaring `actions`.
    pub fn new(name: &'static str, actions: &'static [MethodDescriptor], log: CallLog) -> Self {
        Self {
            name,
            actions,
            routes: Routes::new(),
            log,
            fail_on: None,
        }
    }

    /// Declare a custom route.
    pub fn with_route(mut self, pattern: &str, action: &str) -> Self {
        self.routes.insert(pattern, action);
        self
    }

    /// Fail (after logging) when `action` runs.
    pub fn failing_on(mut self, action: &'static str) -> Self {
        self.fail_on = Some(action);
        self
    }

    /// A factory producing fresh copies of this controller.
    pub fn factory(self) -> impl Fn() -> Box<dyn Controller> + Send + Sync + 'static {
        move || -> Box<dyn Controller> { Box::new(self.clone()) }
    }
}

impl Controller for ScriptedController {
    fn name(&self) -> &'static str {
        self.name
    }

    fn actions(&self) -> &'static [MethodDescriptor] {
        self.actions
    }

    fn routes(&self) -> Routes {
        self.routes.clone()
    }

    fn call_action(
        &mut self,
        action: &str,
        ctx: &mut Context<'_>,
        params: &Params,
    ) -> Result<(), BoxError> {
        if !self.actions.iter().any(|m| m.name() == action) {
            return Err(unknown_action(self.name, action));
        }

        self.log
            .push(format!("{}.{}({})", self.name, action, format_params(params)));
        ctx.assign("action", action);

        if self.fail_on == Some(action) {
            return Err(format!("{}::{} exploded", self.name, action).into());
        }
        Ok(())
    }
}

// ============================================================================
// Recording View
// ============================================================================

/// A [`BufferView`] that logs vendor pushes and renders.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    inner: BufferView,
    log: CallLog,
}

impl RecordingView {
    /// Create a view logging into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: BufferView::new(),
            log,
        }
    }

    /// The wrapped view.
    pub fn buffer(&self) -> &BufferView {
        &self.inner
    }
}

impl View for RecordingView {
    fn set_vendor(&mut self, vendor: &str, vendor_path: &Path) {
        self.log
            .push(format!("view.set_vendor({vendor}, {})", vendor_path.display()));
        self.inner.set_vendor(vendor, vendor_path);
    }

    fn assign(&mut self, key: &str, value: String) {
        self.inner.assign(key, value);
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key)
    }

    fn render(&mut self) -> Result<String, BoxError> {
        self.log.push("view.render");
        self.inner.render()
    }
}

// ============================================================================
// Static App
// ============================================================================

/// A fixed application context with no components.
#[derive(Debug, Clone)]
pub struct StaticApp {
    vendor: String,
    vendor_path: PathBuf,
    config: HashMap<String, ConfigValue>,
}

impl Default for StaticApp {
    fn default() -> Self {
        Self {
            vendor: "App".to_string(),
            vendor_path: PathBuf::from("vendor/"),
            config: HashMap::new(),
        }
    }
}

impl StaticApp {
    /// Set a configuration value.
    pub fn with_config(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }
}

impl App for StaticApp {
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
        Err(DispatchError::UnknownComponent {
            kind,
            name: name.to_string(),
        })
    }
}
