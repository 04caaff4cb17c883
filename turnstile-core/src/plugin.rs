//! # Hook Layer (Plugin)
//!
//! A plugin opts into hooks by declaring public methods whose names match
//! the hook names raised by the pipeline. The declaration is a static table
//! of [`MethodDescriptor`]s; only invokable entries count as hooks.
//!
//! Every raised hook reaches every plugin declaring it. There is no
//! "stop propagation": a plugin cannot short-circuit another.

use crate::{
    context::HookContext,
    error::{BoxError, HookError},
    method::MethodDescriptor,
};

/// Raised right before the action is called.
pub const ACTION_BEFORE: &str = "actionBefore";

/// Raised right after the action returns.
pub const ACTION_AFTER: &str = "actionAfter";

/// An observer of pipeline hooks.
///
/// A fresh instance is created for every hook call.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a plugin",
    label = "missing `Plugin` implementation",
    note = "Annotate an inherent impl with `#[turnstile::plugin]` or implement `Plugin` by hand."
)]
pub trait Plugin: Send + 'static {
    /// Every declared method, hook or not.
    fn methods(&self) -> &'static [MethodDescriptor];

    /// Run the hook with the given name.
    fn call_hook(&mut self, hook: &str, ctx: &mut HookContext<'_>) -> Result<(), BoxError>;

    /// Names of the declared hooks, deduplicated, in declaration order.
    fn hooks(&self) -> Vec<&'static str> {
        let mut hooks: Vec<&'static str> = Vec::new();
        for method in self.methods().iter().filter(|m| m.is_invokable()) {
            if !hooks.contains(&method.name()) {
                hooks.push(method.name());
            }
        }
        hooks
    }
}

/// Error returned by a plugin asked for a hook it does not declare.
pub fn unknown_hook(plugin: &str, hook: &str) -> BoxError {
    Box::new(HookError::Undeclared {
        plugin: plugin.to_string(),
        hook: hook.to_string(),
    })
}
