use super::{
    naming,
    request::RequestPath,
    sources::SourceCheck,
};
use tracing::debug;
use turnstile_core::Params;

/// Designated default identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Controller serving the empty path.
    pub controller: String,
    /// Action used when none is given or the given one is not invokable.
    pub action: String,
    /// Controller serving unresolved paths.
    pub not_found: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            controller: "Index".to_string(),
            action: "index".to_string(),
            not_found: "NotFound".to_string(),
        }
    }
}

/// The result of resolving a request.
///
/// The path resolver fills it in; the route matcher may overwrite it as a
/// whole on the first matching route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Controller identity.
    pub controller: String,
    /// Action name.
    pub action: String,
    /// Parameters for the action.
    pub params: Params,
    /// Set when the implied controller does not exist.
    pub not_found: bool,
}

/// Resolves request paths into default dispatch triples.
pub struct PathResolver {
    defaults: Defaults,
    sources: Box<dyn SourceCheck>,
}

impl PathResolver {
    /// Create a resolver checking controller existence with `sources`.
    pub fn new(defaults: Defaults, sources: impl SourceCheck + 'static) -> Self {
        Self {
            defaults,
            sources: Box::new(sources),
        }
    }

    /// The designated defaults.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Resolve a path. Never fails: a miss sets `not_found` and keeps the
    /// default controller.
    ///
    /// Positional params are keyed by segment index. The controller segment
    /// (index 0) is vacated once the controller resolves.
    pub fn resolve(&self, path: &RequestPath) -> Resolution {
        let mut resolution = Resolution {
            controller: self.defaults.controller.clone(),
            action: self.defaults.action.clone(),
            params: Params::new(),
            not_found: false,
        };

        let segments = path.segments();
        let Some(first) = segments.first() else {
            return resolution;
        };

        resolution.params = Params::from_segments(segments.iter().map(String::as_str));
        if let Some(action) = segments.get(1) {
            resolution.action = naming::action_name(action);
        }

        let candidate = naming::controller_name(first);
        if self.sources.controller_exists(&candidate) {
            resolution.controller = candidate;
            resolution.params.vacate(0);
        } else {
            debug!(path = %path, controller = %candidate, "No source for controller");
            resolution.not_found = true;
        }

        resolution
    }
}
