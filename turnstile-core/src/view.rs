//! The view collaborator.
//!
//! Rendering internals are not part of the pipeline. The pipeline only hands
//! the view to actions and plugins, and pushes the vendor identity and base
//! path into it before [`View::render`].

use crate::error::BoxError;
use std::path::Path;

/// A renderable view.
pub trait View: Send {
    /// Receive the vendor name and base path before rendering.
    fn set_vendor(&mut self, vendor: &str, vendor_path: &Path);

    /// Assign a template variable.
    fn assign(&mut self, key: &str, value: String);

    /// Read back a template variable.
    fn get(&self, key: &str) -> Option<&str>;

    /// Produce the final output.
    fn render(&mut self) -> Result<String, BoxError>;
}
