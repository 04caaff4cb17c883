use crate::catalog::PluginCatalog;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Enumerates candidate plugin identities.
///
/// Enumeration order carries no meaning; the registry sorts candidates.
pub trait PluginSource {
    /// Candidate identities.
    fn candidates(&self) -> Vec<String>;
}

impl PluginSource for PluginCatalog {
    fn candidates(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }
}

impl<S: PluginSource + ?Sized> PluginSource for &S {
    fn candidates(&self) -> Vec<String> {
        (**self).candidates()
    }
}

/// Plugin candidates from the files of a directory.
///
/// Every `<Identity>.<extension>` file names a candidate. A missing
/// directory yields no candidates.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Scan `dir` for files with the given extension.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// The scanned directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn identity(&self, path: &Path) -> Option<String> {
        if path.extension()?.to_str()? != self.extension {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        (!stem.is_empty()).then(|| stem.to_string())
    }
}

impl PluginSource for DirectorySource {
    fn candidates(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "No plugin directory");
                return Vec::new();
            }
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "Cannot read plugin directory");
                return Vec::new();
            }
        };

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match self.identity(&path) {
                Some(identity) => candidates.push(identity),
                None => debug!(path = %path.display(), "Not a plugin source"),
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(root.path().join("Plugins"), "rs");
        assert!(source.candidates().is_empty());
    }

    #[test]
    fn test_files_become_candidates() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("Audit.rs"), "").unwrap();
        fs::write(root.path().join("Cache.rs"), "").unwrap();
        fs::write(root.path().join("README.md"), "").unwrap();
        fs::create_dir(root.path().join("Nested.rs")).unwrap();

        let mut candidates = DirectorySource::new(root.path(), "rs").candidates();
        candidates.sort();
        assert_eq!(candidates, vec!["Audit", "Cache"]);
    }
}
