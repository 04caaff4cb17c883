#![allow(dead_code)]

use turnstile::{
    ACTION_AFTER, ACTION_BEFORE, ApplicationBuilder, MethodDescriptor, MethodFlags,
    testing::{CallLog, RecordingPlugin, ScriptedController},
};

// ============================================================================
// Action Tables
// ============================================================================

pub const INDEX_ONLY: &[MethodDescriptor] = &[MethodDescriptor::public("index")];

pub const BLOG_ACTIONS: &[MethodDescriptor] = &[
    MethodDescriptor::new("new", MethodFlags::PUBLIC.union(MethodFlags::CONSTRUCTOR)),
    MethodDescriptor::public("index"),
    MethodDescriptor::public("show"),
    MethodDescriptor::new("helper", MethodFlags::empty()),
];

pub const USER_ACTIONS: &[MethodDescriptor] = &[
    MethodDescriptor::public("index"),
    MethodDescriptor::public("edit"),
];

pub const HOOKS: &[MethodDescriptor] = &[
    MethodDescriptor::public(ACTION_BEFORE),
    MethodDescriptor::public(ACTION_AFTER),
];

// ============================================================================
// Builders
// ============================================================================

/// A builder with `Index`, `NotFound`, `Blog` and a routed `User` controller,
/// all logging into `log`.
pub fn site(log: &CallLog) -> ApplicationBuilder {
    ApplicationBuilder::new()
        .vendor("Game")
        .vendor_path("vendor")
        .controller(
            "Index",
            ScriptedController::new("Index", INDEX_ONLY, log.clone()).factory(),
        )
        .controller(
            "NotFound",
            ScriptedController::new("NotFound", INDEX_ONLY, log.clone()).factory(),
        )
        .controller(
            "Blog",
            ScriptedController::new("Blog", BLOG_ACTIONS, log.clone()).factory(),
        )
        .controller(
            "User",
            ScriptedController::new("User", USER_ACTIONS, log.clone())
                .with_route("user/:id/edit", "edit")
                .factory(),
        )
}

/// `site` plus a recording plugin observing both pipeline hooks.
pub fn site_with_audit(log: &CallLog) -> ApplicationBuilder {
    site(log).plugin(
        "Audit",
        RecordingPlugin::factory("Audit", HOOKS, log.clone()),
    )
}
