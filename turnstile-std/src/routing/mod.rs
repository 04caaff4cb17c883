//! # Custom Routes
//!
//! Controllers declare route patterns that override the default
//! path-to-action mapping.
//!
//! A pattern is a `/`-separated list of segments. A segment written `:name`
//! captures one path segment under `name`; any other segment is literal text
//! that must equal one path segment exactly. The whole pattern is anchored to
//! the whole path, so the empty pattern matches only the empty path.
//!
//! | Pattern          | Path            | Params        |
//! |------------------|-----------------|---------------|
//! | `user/:id/edit`  | `user/42/edit`  | `{id: "42"}`  |
//! | `files/a.pdf`    | `files/a.pdf`   | `{}`          |
//!
//! The first declared pattern that matches wins; patterns are never ranked by
//! specificity.

mod compiled;
mod matcher;

pub use compiled::CompiledRoute;
pub use matcher::{RouteCache, RouteMatch, RouteMatcher};
