//! Request parameters.
//!
//! [`Params`] is an insertion-ordered map from [`ParamKey`] to an optional
//! string value. Positional keys keep the index of the path segment they were
//! taken from; named keys come from custom route slots. A vacated entry keeps
//! its position but holds no value, and is dropped by [`Params::compact`].

use std::fmt;

/// Key of a request parameter: a path segment index or a route slot name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    /// Index of the originating path segment.
    Index(usize),
    /// Name of a custom route slot.
    Name(String),
}

impl From<usize> for ParamKey {
    fn from(index: usize) -> Self {
        ParamKey::Index(index)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Index(i) => write!(f, "{i}"),
            ParamKey::Name(name) => f.write_str(name),
        }
    }
}

/// Parameters handed to a controller action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(ParamKey, Option<String>)>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build positional parameters, keyed by their index in `segments`.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: segments
                .into_iter()
                .enumerate()
                .map(|(i, s)| (ParamKey::Index(i), Some(s.into())))
                .collect(),
        }
    }

    /// Insert a value, replacing an existing entry in place.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<ParamKey>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = Some(value.into());
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => std::mem::replace(slot, value),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Clear the value of an entry while keeping its position.
    pub fn vacate(&mut self, key: impl Into<ParamKey>) {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *slot = None;
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &ParamKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Look up a named (route slot) value.
    pub fn named(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, ParamKey::Name(n) if n == name))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Look up a positional value by segment index.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.get(&ParamKey::Index(index))
    }

    /// Iterate entries in insertion order, including vacated ones.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k, v.as_deref()))
    }

    /// Iterate the values of non-empty entries in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter_map(|(_, v)| v)
            .filter(|v| !v.is_empty())
    }

    /// Copy of this map without vacated or empty entries.
    pub fn compact(&self) -> Params {
        Params {
            entries: self
                .entries
                .iter()
                .filter(|(_, v)| v.as_deref().is_some_and(|v| !v.is_empty()))
                .cloned()
                .collect(),
        }
    }

    /// Number of entries, including vacated ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<ParamKey>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
