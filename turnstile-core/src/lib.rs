//! # turnstile-core
//!
//! Core contracts for the Turnstile request-dispatch pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! controllers and plugins that don't need the full `turnstile-std`
//! implementation.
//!
//! # Four-Stage Pipeline
//!
//! A request travels through four stages, each one owning a single concern:
//!
//! ## Stage 1: Resolution ([`Params`])
//!
//! A normalized request path is split into segments. The first segment names
//! a controller, the second an action, the rest become positional parameters.
//!
//! ## Stage 2: Custom Routes ([`Routes`])
//!
//! Controllers may declare route patterns (`user/:id/edit`) that override the
//! default mapping. The first pattern that matches wins and replaces the
//! parameters wholesale.
//!
//! ## Stage 3: Hooks ([`Plugin`])
//!
//! Plugins declare the hook names they observe. The pipeline raises
//! [`ACTION_BEFORE`] and [`ACTION_AFTER`] around every action call.
//!
//! ## Stage 4: Actions ([`Controller`])
//!
//! The terminal point. Only methods flagged invokable by their
//! [`MethodFlags`] can be reached from a request path.
//!
//! # Error Types
//!
//! - [`TurnstileError`] - Top-level error type
//! - [`RouteError`] - Malformed route patterns
//! - [`DispatchError`] - Controller, action and component failures
//! - [`HookError`] - Plugin failures
//! - [`Fault`] - Structured runtime faults

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod app;
mod context;
mod controller;
mod error;
mod method;
mod params;
mod plugin;
mod view;

// Re-exports
pub use app::{App, ComponentKind, ConfigValue};
pub use context::{Context, HookContext};
pub use controller::{Controller, Routes, unknown_action};
pub use error::{
    BoxError, DispatchError, Fault, HookError, RouteError, Severity, TurnstileError,
};
pub use method::{MethodDescriptor, MethodFlags};
pub use params::{ParamKey, Params};
pub use plugin::{ACTION_AFTER, ACTION_BEFORE, Plugin, unknown_hook};
pub use view::View;
