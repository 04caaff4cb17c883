//! Source layout and existence checks.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Decides whether a controller identity has a source to be served from.
pub trait SourceCheck: Send + Sync {
    /// Check if the named controller exists.
    fn controller_exists(&self, name: &str) -> bool;
}

impl<T: SourceCheck + ?Sized> SourceCheck for Arc<T> {
    fn controller_exists(&self, name: &str) -> bool {
        (**self).controller_exists(name)
    }
}

impl<T: SourceCheck + ?Sized> SourceCheck for Box<T> {
    fn controller_exists(&self, name: &str) -> bool {
        (**self).controller_exists(name)
    }
}

/// Maps qualified identities to source files under a vendor root.
///
/// Namespace separators become directories, and so do underscores in the
/// final class name: `Game\Controllers\Admin_User` lives at
/// `<root>/Game/Controllers/Admin/User.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    root: PathBuf,
    vendor: String,
    extension: String,
}

impl SourceLayout {
    /// Namespace holding controllers.
    pub const CONTROLLERS: &'static str = "Controllers";
    /// Namespace holding plugins.
    pub const PLUGINS: &'static str = "Plugins";

    /// Create a layout with the default `rs` extension.
    pub fn new(root: impl Into<PathBuf>, vendor: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            vendor: vendor.into(),
            extension: "rs".to_string(),
        }
    }

    /// Set the source file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Vendor root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vendor name.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Source file extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Qualify a name under the vendor and a namespace.
    pub fn qualify(&self, namespace: &str, name: &str) -> String {
        format!("{}\\{}\\{}", self.vendor, namespace, name)
    }

    /// File holding a qualified class.
    pub fn class_file(&self, qualified: &str) -> PathBuf {
        let qualified = qualified.trim_start_matches('\\');
        let (namespace, class) = qualified.rsplit_once('\\').unwrap_or(("", qualified));

        let mut relative = namespace.replace('\\', "/");
        if !relative.is_empty() {
            relative.push('/');
        }
        relative.push_str(&class.replace('_', "/"));
        relative.push('.');
        relative.push_str(&self.extension);

        self.root.join(relative)
    }

    /// File holding the named controller.
    pub fn controller_file(&self, name: &str) -> PathBuf {
        self.class_file(&self.qualify(Self::CONTROLLERS, name))
    }

    /// Directory scanned for plugins.
    pub fn plugin_dir(&self) -> PathBuf {
        self.root.join(&self.vendor).join(Self::PLUGINS)
    }
}

/// Controller existence by file presence.
#[derive(Debug, Clone)]
pub struct FileSystemSources {
    layout: SourceLayout,
}

impl FileSystemSources {
    /// Check files under the given layout.
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }

    /// The layout being checked.
    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }
}

impl SourceCheck for FileSystemSources {
    fn controller_exists(&self, name: &str) -> bool {
        !name.is_empty() && self.layout.controller_file(name).is_file()
    }
}
