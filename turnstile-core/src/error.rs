//! Error types for Turnstile.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`TurnstileError`] - Top-level error type for all Turnstile operations
//! - [`RouteError`] - Malformed custom route patterns
//! - [`DispatchError`] - Errors while resolving and invoking controllers
//! - [`HookError`] - Errors from plugin hooks
//! - [`Fault`] - Runtime faults converted into structured failures

use crate::app::ComponentKind;
use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// A boxed error type for faults raised by user code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Turnstile operations.
#[derive(Error, Debug)]
pub enum TurnstileError {
    /// A custom route pattern could not be compiled.
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// An error occurred while dispatching to a controller.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A plugin hook failed.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// A runtime fault was converted into a structured failure.
    #[error(transparent)]
    Fault(#[from] Fault),

    /// The view failed to render.
    #[error("render failed: {0}")]
    Render(#[source] BoxError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while compiling custom route patterns.
///
/// A malformed pattern is a defect in controller code, so these are never
/// skipped: they abort the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The pattern has an empty segment (`a//b`, a leading or trailing `/`).
    #[error("route pattern `{pattern}` contains an empty segment")]
    EmptySegment {
        /// The offending pattern.
        pattern: String,
    },

    /// A `:` marker was not followed by a slot name.
    #[error("route pattern `{pattern}` has an unnamed slot at segment {segment}")]
    UnnamedSlot {
        /// The offending pattern.
        pattern: String,
        /// Zero-based segment index.
        segment: usize,
    },

    /// The compiled matcher was rejected by the regex engine.
    #[error("route pattern `{pattern}` does not compile: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A controller identity resolved but no factory is registered for it.
    #[error("no controller registered for `{0}`")]
    UnregisteredController(String),

    /// Neither the requested action nor the default action is invokable.
    #[error("controller `{controller}` has no invokable action `{action}`")]
    MissingAction {
        /// Controller identity.
        controller: String,
        /// Action name.
        action: String,
    },

    /// The action itself returned an error.
    #[error("action `{controller}::{action}` failed")]
    ActionFailed {
        /// Controller identity.
        controller: String,
        /// Action name.
        action: String,
        /// The error raised by the action.
        #[source]
        source: BoxError,
    },

    /// No model or library is registered under the name.
    #[error("no {kind} registered as `{name}`")]
    UnknownComponent {
        /// Component kind.
        kind: ComponentKind,
        /// Normalized component name.
        name: String,
    },

    /// The registered component is not of the requested type.
    #[error("{kind} `{name}` is not a `{expected}`")]
    ComponentType {
        /// Component kind.
        kind: ComponentKind,
        /// Normalized component name.
        name: String,
        /// Requested type name.
        expected: &'static str,
    },
}

/// Errors that can occur in plugin hooks.
#[derive(Error, Debug)]
pub enum HookError {
    /// A plugin's hook method returned an error.
    #[error("plugin `{plugin}` failed in hook `{hook}`")]
    PluginFailed {
        /// Plugin identity.
        plugin: String,
        /// Hook name.
        hook: String,
        /// The error raised by the plugin.
        #[source]
        source: BoxError,
    },

    /// A plugin was asked to run a hook it does not declare.
    #[error("plugin `{plugin}` does not declare hook `{hook}`")]
    Undeclared {
        /// Plugin identity.
        plugin: String,
        /// Hook name.
        hook: String,
    },
}

/// Severity of a runtime fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Deprecated usage.
    Deprecated,
    /// Informational notice.
    Notice,
    /// Recoverable warning.
    Warning,
    /// Unrecoverable error.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Deprecated => "deprecated",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// A runtime fault carrying severity, message and source location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{severity}: {message} ({file}:{line})")]
pub struct Fault {
    /// How bad it is.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Source file the fault was raised in.
    pub file: String,
    /// Source line the fault was raised at.
    pub line: u32,
}

impl Fault {
    /// Create a fault with an explicit location.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    /// Create a fault located at the caller.
    #[track_caller]
    pub fn here(severity: Severity, message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self::new(severity, message, location.file(), location.line())
    }
}

// Convenience conversions
impl From<BoxError> for TurnstileError {
    fn from(err: BoxError) -> Self {
        TurnstileError::Custom(err)
    }
}
