use regex::Regex;
use turnstile_core::{Params, RouteError};

/// Marker introducing a named slot segment.
const SLOT_MARKER: char = ':';

/// A route pattern compiled into an anchored matcher.
///
/// Every segment becomes its own capture group; only the groups of named
/// slots are read back. Literal segments are escaped and match only
/// themselves. The empty pattern matches only the empty path. Compiling is
/// deterministic and side-effect free.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pattern: String,
    regex: Regex,
    slots: Vec<Slot>,
}

#[derive(Debug, Clone)]
struct Slot {
    group: String,
    name: String,
}

impl CompiledRoute {
    /// Compile a route pattern.
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        let mut groups = Vec::new();
        let mut slots = Vec::new();

        if pattern.is_empty() {
            return Self::build(pattern, "^$", slots);
        }

        for (i, segment) in pattern.split('/').enumerate() {
            if segment.is_empty() {
                return Err(RouteError::EmptySegment {
                    pattern: pattern.to_string(),
                });
            }

            let group = format!("__seg{i}");
            match segment.strip_prefix(SLOT_MARKER) {
                Some("") => {
                    return Err(RouteError::UnnamedSlot {
                        pattern: pattern.to_string(),
                        segment: i,
                    });
                }
                Some(name) => {
                    groups.push(format!("(?P<{group}>[^/]+)"));
                    slots.push(Slot {
                        group,
                        name: name.to_string(),
                    });
                }
                None => groups.push(format!("(?P<{group}>{})", regex::escape(segment))),
            }
        }

        Self::build(pattern, &format!("^{}$", groups.join("/")), slots)
    }

    fn build(pattern: &str, source: &str, slots: Vec<Slot>) -> Result<Self, RouteError> {
        let regex = Regex::new(source).map_err(|e| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            slots,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Names of the slots, in segment order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    /// Check if the pattern matches the whole path.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match the whole path, returning the named slot values.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();
        for slot in &self.slots {
            if let Some(value) = captures.name(&slot.group) {
                params.insert(slot.name.as_str(), value.as_str());
            }
        }
        Some(params)
    }
}
