//! # Action Layer (Controller)
//!
//! A controller serves one conceptual endpoint. It exposes a static table
//! of declared methods, an ordered list of custom routes, and a single entry
//! point that calls an action by its canonical name.
//!
//! # Usage Patterns
//!
//! 1. **Macro**: `#[turnstile::controller]` on an inherent `impl` block
//!    generates the whole trait implementation.
//! 2. **Manual**: implement [`Controller`] directly, matching on the action
//!    name in [`Controller::call_action`].

use crate::{
    context::Context,
    error::{BoxError, DispatchError},
    method::MethodDescriptor,
    params::Params,
};

/// Ordered mapping from route pattern to action name.
///
/// Declaring the same pattern twice keeps its first position and takes the
/// last action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routes {
    entries: Vec<(String, String)>,
}

impl Routes {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route (builder style).
    pub fn route(mut self, pattern: impl Into<String>, action: impl Into<String>) -> Self {
        self.insert(pattern, action);
        self
    }

    /// Add a route.
    pub fn insert(&mut self, pattern: impl Into<String>, action: impl Into<String>) {
        let pattern = pattern.into();
        let action = action.into();
        match self.entries.iter_mut().find(|(p, _)| *p == pattern) {
            Some((_, existing)) => *existing = action,
            None => self.entries.push((pattern, action)),
        }
    }

    /// Iterate `(pattern, action)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no routes are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P, A> FromIterator<(P, A)> for Routes
where
    P: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, A)>>(iter: I) -> Self {
        let mut routes = Routes::new();
        for (p, a) in iter {
            routes.insert(p, a);
        }
        routes
    }
}

/// The terminal endpoint of the dispatch pipeline.
///
/// Instances are created fresh for every request by a factory registered
/// under the controller's identity; they never outlive the dispatch.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a controller",
    label = "missing `Controller` implementation",
    note = "Annotate an inherent impl with `#[turnstile::controller]` or implement `Controller` by hand."
)]
pub trait Controller: Send + 'static {
    /// Identity used in logs and errors.
    fn name(&self) -> &'static str;

    /// Every declared method, invokable or not.
    fn actions(&self) -> &'static [MethodDescriptor];

    /// Custom routes, in declaration order.
    fn routes(&self) -> Routes {
        Routes::new()
    }

    /// Call the action with the given canonical name.
    fn call_action(
        &mut self,
        action: &str,
        ctx: &mut Context<'_>,
        params: &Params,
    ) -> Result<(), BoxError>;

    /// Find an invokable action, ignoring ASCII case.
    fn find_action(&self, action: &str) -> Option<&'static MethodDescriptor> {
        self.actions()
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(action))
            .filter(|m| m.is_invokable())
    }
}

/// Error returned by a controller asked for an action it does not have.
pub fn unknown_action(controller: &str, action: &str) -> BoxError {
    Box::new(DispatchError::MissingAction {
        controller: controller.to_string(),
        action: action.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::MethodFlags;

    struct Probe;

    impl Controller for Probe {
        fn name(&self) -> &'static str {
            "Probe"
        }

        fn actions(&self) -> &'static [MethodDescriptor] {
            const ACTIONS: &[MethodDescriptor] = &[
                MethodDescriptor::public("index"),
                MethodDescriptor::public("editProfile"),
                MethodDescriptor::new("helper", MethodFlags::empty()),
                MethodDescriptor::new("locked", MethodFlags::PUBLIC.union(MethodFlags::FINAL)),
            ];
            ACTIONS
        }

        fn call_action(
            &mut self,
            action: &str,
            _ctx: &mut Context<'_>,
            _params: &Params,
        ) -> Result<(), BoxError> {
            Err(unknown_action(self.name(), action))
        }
    }

    #[test]
    fn test_find_action_ignores_case() {
        let found = Probe.find_action("editprofile").map(|m| m.name());
        assert_eq!(found, Some("editProfile"));
    }

    #[test]
    fn test_find_action_rejects_private_and_final() {
        assert!(Probe.find_action("helper").is_none());
        assert!(Probe.find_action("locked").is_none());
        assert!(Probe.find_action("missing").is_none());
    }

    #[test]
    fn test_routes_keep_first_position() {
        let routes = Routes::new()
            .route("a/:x", "one")
            .route("b", "two")
            .route("a/:x", "three");
        let collected: Vec<_> = routes.iter().collect();
        assert_eq!(collected, vec![("a/:x", "three"), ("b", "two")]);
    }
}
