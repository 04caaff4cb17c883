//! Application settings.
//!
//! Settings are read from TOML, with environment variable overrides for the
//! vendor identity:
//!
//! ```toml
//! vendor = "Game"
//! vendor_path = "vendor"
//! sources = "filesystem"
//!
//! [config]
//! site_name = "Example"
//! ```

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;
use turnstile_std::{Defaults, SourceLayout};

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("cannot read settings from {}", path.display())]
    Io {
        /// The settings file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings are not valid TOML or do not fit the schema.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where controllers or plugins are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Only the registered identities exist.
    #[default]
    Catalog,
    /// Identities exist when their source file does.
    Filesystem,
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vendor (namespace root) name.
    pub vendor: String,
    /// Base path of vendor sources, with exactly one trailing `/`.
    pub vendor_path: String,
    /// Controller serving the empty path.
    pub default_controller: String,
    /// Action used when none is given or it is not invokable.
    pub default_action: String,
    /// Controller serving unresolved paths.
    pub not_found_controller: String,
    /// Extension of controller and plugin source files.
    pub source_extension: String,
    /// How controller existence is checked.
    pub sources: SourceMode,
    /// How plugin candidates are enumerated.
    pub plugins: SourceMode,
    /// Initial configuration values.
    pub config: toml::Table,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vendor: "App".to_string(),
            vendor_path: "vendor/".to_string(),
            default_controller: "Index".to_string(),
            default_action: "index".to_string(),
            not_found_controller: "NotFound".to_string(),
            source_extension: "rs".to_string(),
            sources: SourceMode::default(),
            plugins: SourceMode::default(),
            config: toml::Table::new(),
        }
    }
}

impl Settings {
    /// Overrides [`Settings::vendor`].
    pub const VENDOR_ENV: &'static str = "TURNSTILE_VENDOR";
    /// Overrides [`Settings::vendor_path`].
    pub const VENDOR_PATH_ENV: &'static str = "TURNSTILE_VENDOR_PATH";

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), vendor = %settings.vendor, "Loaded settings");
        Ok(settings)
    }

    /// Parse settings from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(contents)?;
        settings.vendor_path = normalize_vendor_path(&settings.vendor_path);
        Ok(settings)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(vendor) = lookup(Self::VENDOR_ENV).filter(|v| !v.is_empty()) {
            self.vendor = vendor;
        }
        if let Some(path) = lookup(Self::VENDOR_PATH_ENV).filter(|v| !v.is_empty()) {
            self.vendor_path = normalize_vendor_path(&path);
        }
        self
    }

    /// Set the vendor path, normalizing its trailing separator.
    pub fn with_vendor_path(mut self, path: &str) -> Self {
        self.vendor_path = normalize_vendor_path(path);
        self
    }

    /// The designated default identities.
    pub fn defaults(&self) -> Defaults {
        Defaults {
            controller: self.default_controller.clone(),
            action: self.default_action.clone(),
            not_found: self.not_found_controller.clone(),
        }
    }

    /// The source layout under the vendor path.
    pub fn layout(&self) -> SourceLayout {
        SourceLayout::new(&self.vendor_path, &self.vendor).with_extension(&self.source_extension)
    }
}

/// Trim trailing separators and append exactly one.
pub(crate) fn normalize_vendor_path(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}
