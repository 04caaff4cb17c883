/// A normalized request path and its segments.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    path: String,
    segments: Vec<String>,
}

impl RequestPath {
    /// Prefix stripped from raw query paths.
    pub const PUBLIC_PREFIX: &'static str = "public/";

    /// Wrap an already normalized path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').map(str::to_string).collect()
        };
        Self { path, segments }
    }

    /// Normalize a raw query path: trailing `/` trimmed, then a leading
    /// `public/` stripped.
    pub fn from_query(raw: &str) -> Self {
        let trimmed = raw.trim_end_matches('/');
        let path = trimmed
            .strip_prefix(Self::PUBLIC_PREFIX)
            .unwrap_or(trimmed);
        Self::new(path)
    }

    /// The normalized path.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path segments, empty for the empty path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if this is the empty (root) path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for RequestPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}
