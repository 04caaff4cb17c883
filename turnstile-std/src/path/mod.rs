//! # Path Resolution
//!
//! Turns a normalized request path into a default `(controller, action,
//! params)` triple.
//!
//! - [`RequestPath`]: normalization and segment splitting
//! - [`naming`]: segment-to-identity folding rules
//! - [`PathResolver`]: the resolution itself, never failing
//! - [`SourceCheck`]: how controller existence is decided

pub mod naming;
mod request;
mod resolver;
mod sources;

pub use request::RequestPath;
pub use resolver::{Defaults, PathResolver, Resolution};
pub use sources::{FileSystemSources, SourceCheck, SourceLayout};
