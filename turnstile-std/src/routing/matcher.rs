use super::compiled::CompiledRoute;
use crate::path::Resolution;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;
use turnstile_core::{Params, RouteError, Routes};

/// Cache of compiled routes, one entry per distinct pattern.
#[derive(Debug, Default)]
pub struct RouteCache {
    compiled: Mutex<HashMap<String, Arc<CompiledRoute>>>,
}

impl RouteCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached route, compiling and caching it on first use.
    ///
    /// Failed compilations are not cached.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledRoute>, RouteError> {
        if let Some(route) = self.lock().get(pattern) {
            return Ok(Arc::clone(route));
        }

        let route = Arc::new(CompiledRoute::compile(pattern)?);
        self.lock()
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::clone(&route));
        Ok(route)
    }

    /// Number of cached patterns.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached pattern.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<CompiledRoute>>> {
        self.compiled.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The first declared route matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matching pattern.
    pub pattern: String,
    /// Target action.
    pub action: String,
    /// Named slot values.
    pub params: Params,
}

/// Finds the first declared route matching a request path.
#[derive(Debug, Default)]
pub struct RouteMatcher {
    cache: RouteCache,
}

impl RouteMatcher {
    /// Create a matcher with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled route cache.
    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Compile every declared route.
    ///
    /// A single malformed pattern fails the whole table, whether or not an
    /// earlier pattern would have matched.
    pub fn compile<'r>(
        &self,
        routes: &'r Routes,
    ) -> Result<Vec<(Arc<CompiledRoute>, &'r str)>, RouteError> {
        routes
            .iter()
            .map(|(pattern, action)| Ok((self.cache.get_or_compile(pattern)?, action)))
            .collect()
    }

    /// Find the first route, in declaration order, matching `path`.
    pub fn find(&self, routes: &Routes, path: &str) -> Result<Option<RouteMatch>, RouteError> {
        let table = self.compile(routes)?;
        Ok(table.into_iter().find_map(|(route, action)| {
            route.captures(path).map(|params| RouteMatch {
                pattern: route.pattern().to_string(),
                action: action.to_string(),
                params,
            })
        }))
    }

    /// Apply the first matching route to a resolution.
    ///
    /// On a match the action and params are replaced (never merged) and
    /// `not_found` is cleared. Without a match the resolution is untouched.
    /// Returns whether a route matched.
    pub fn apply(
        &self,
        routes: &Routes,
        path: &str,
        resolution: &mut Resolution,
    ) -> Result<bool, RouteError> {
        let Some(matched) = self.find(routes, path)? else {
            return Ok(false);
        };

        debug!(
            path,
            pattern = %matched.pattern,
            action = %matched.action,
            "Custom route matched"
        );
        resolution.action = matched.action;
        resolution.params = matched.params;
        resolution.not_found = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution() -> Resolution {
        Resolution {
            controller: "Index".into(),
            action: "index".into(),
            params: Params::from_segments(["user", "42", "edit"]),
            not_found: true,
        }
    }

    #[test]
    fn test_first_match_wins() {
        let matcher = RouteMatcher::new();
        let routes = Routes::new()
            .route("user/:id/edit", "edit")
            .route("user/:name/:verb", "generic");

        let found = matcher.find(&routes, "user/42/edit").unwrap().unwrap();
        assert_eq!(found.action, "edit");

        let reversed = Routes::new()
            .route("user/:name/:verb", "generic")
            .route("user/:id/edit", "edit");
        let found = matcher.find(&reversed, "user/42/edit").unwrap().unwrap();
        assert_eq!(found.action, "generic");
        assert_eq!(found.params.named("verb"), Some("edit"));
    }

    #[test]
    fn test_apply_replaces_params() {
        let matcher = RouteMatcher::new();
        let routes = Routes::new().route("user/:id/edit", "edit");
        let mut resolution = resolution();

        assert!(matcher.apply(&routes, "user/42/edit", &mut resolution).unwrap());
        assert_eq!(resolution.action, "edit");
        assert!(!resolution.not_found);
        assert_eq!(resolution.params.named("id"), Some("42"));
        assert_eq!(resolution.params.len(), 1);
        assert_eq!(resolution.params.positional(0), None);
    }

    #[test]
    fn test_no_match_leaves_resolution() {
        let matcher = RouteMatcher::new();
        let routes = Routes::new().route("blog/:slug", "show");
        let mut resolution = resolution();
        let before = resolution.clone();

        assert!(!matcher.apply(&routes, "user/42/edit", &mut resolution).unwrap());
        assert_eq!(resolution, before);
    }

    #[test]
    fn test_malformed_route_fails_even_after_a_match() {
        let matcher = RouteMatcher::new();
        let routes = Routes::new()
            .route("user/:id/edit", "edit")
            .route("broken/:", "never");
        let mut resolution = resolution();

        let err = matcher.apply(&routes, "user/42/edit", &mut resolution).unwrap_err();
        assert!(matches!(err, RouteError::UnnamedSlot { segment: 1, .. }));
        assert!(resolution.not_found);
    }

    #[test]
    fn test_cache_compiles_once_per_pattern() {
        let matcher = RouteMatcher::new();
        let routes = Routes::new().route("a/:x", "one").route("b/:y", "two");

        matcher.find(&routes, "a/1").unwrap();
        matcher.find(&routes, "b/2").unwrap();
        assert_eq!(matcher.cache().len(), 2);

        let first = matcher.cache().get_or_compile("a/:x").unwrap();
        let second = matcher.cache().get_or_compile("a/:x").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_compile_is_not_cached() {
        let cache = RouteCache::new();
        assert!(cache.get_or_compile("x/:").is_err());
        assert!(cache.is_empty());
    }
}
