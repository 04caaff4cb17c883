//! A plain in-memory view.

use std::{
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};
use turnstile_core::{BoxError, View};

/// A view collecting variables and rendering them as `key: value` lines.
///
/// Rendering starts with a `# vendor (path)` header once the vendor has been
/// pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferView {
    vars: BTreeMap<String, String>,
    vendor: Option<(String, PathBuf)>,
}

impl BufferView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vendor name, once pushed in.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_ref().map(|(name, _)| name.as_str())
    }

    /// Vendor base path, once pushed in.
    pub fn vendor_path(&self) -> Option<&Path> {
        self.vendor.as_ref().map(|(_, path)| path.as_path())
    }

    /// Assigned variables, sorted by key.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl View for BufferView {
    fn set_vendor(&mut self, vendor: &str, vendor_path: &Path) {
        self.vendor = Some((vendor.to_string(), vendor_path.to_path_buf()));
    }

    fn assign(&mut self, key: &str, value: String) {
        self.vars.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn render(&mut self) -> Result<String, BoxError> {
        let mut out = String::new();
        if let Some((vendor, path)) = &self.vendor {
            writeln!(out, "# {vendor} ({})", path.display())?;
        }
        for (key, value) in &self.vars {
            writeln!(out, "{key}: {value}")?;
        }
        Ok(out)
    }
}
